pub use replace_transformer::*;

mod replace_transformer;

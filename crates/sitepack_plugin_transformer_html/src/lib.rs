pub use html_transformer::*;

mod attrs;
mod dom_visitor;
mod html_transformer;
mod tag_injection_visitor;

pub use copy_plugin::*;

mod copy_plugin;

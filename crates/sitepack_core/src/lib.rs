pub mod diagnostic;
pub mod plugin;
pub mod types;

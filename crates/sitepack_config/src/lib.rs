pub mod builtin_configs;
pub mod sitepack_config;
pub mod sitepack_rc;
pub mod sitepack_rc_config_loader;

pub use sitepack_config::PipelineDescriptor;
pub use sitepack_config::PluginConfig;
pub use sitepack_rc::SitepackRc;

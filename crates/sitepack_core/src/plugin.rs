use std::path::PathBuf;
use std::sync::Arc;

use sitepack_filesystem::FileSystemRef;

pub use resolver_plugin::*;
pub use transformer_plugin::*;

use crate::types::BuildMode;

mod resolver_plugin;
mod transformer_plugin;

#[derive(Clone, Debug)]
pub struct PluginContext {
  pub file_system: FileSystemRef,
  pub options: Arc<PluginOptions>,
}

#[derive(Debug, Default)]
pub struct PluginOptions {
  pub mode: BuildMode,
  pub project_root: PathBuf,
}

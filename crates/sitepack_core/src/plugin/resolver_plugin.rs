use std::fmt::Debug;
use std::path::Path;
use std::path::PathBuf;

pub struct ResolveContext<'a> {
  /// The specifier as written in source
  pub specifier: &'a str,
  /// The file containing the import
  pub importer: &'a Path,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Resolution {
  /// An absolute path to the resolved file
  Resolved(PathBuf),
  /// The reference is left untouched in the output
  External(String),
}

/// Converts a dependency specifier into a file path that will be processed by transformers
pub trait ResolverPlugin: Debug + Send + Sync {
  /// Determines what the dependency specifier resolves to
  fn resolve(&self, ctx: ResolveContext<'_>) -> Result<Resolution, anyhow::Error>;
}

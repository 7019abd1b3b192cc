use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use sitepack_core::diagnostic::CodeFrame;
use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::DiagnosticError;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_filesystem::FileSystem;

/// The subset of a package manifest used to locate the package entry
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct PackageJson {
  #[serde(skip)]
  pub path: PathBuf,
  pub name: Option<String>,
  pub module: Option<String>,
  pub main: Option<String>,
}

impl PackageJson {
  pub fn read(fs: &dyn FileSystem, path: &Path) -> Result<Self, DiagnosticError> {
    let contents = fs.read_to_string(path)?;

    let mut package: PackageJson = serde_json::from_str(&contents).map_err(|error| {
      diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::ParseError)
        .message(format!("Failed to parse {}: {error}", path.display()))
        .origin("sitepack_plugin_resolver")
        .code_frames(vec![CodeFrame {
          code: Some(contents.clone()),
          file_path: Some(path.to_path_buf()),
          code_highlights: vec![[error.line(), error.column()].into()],
        }]))
    })?;

    package.path = path.to_path_buf();
    Ok(package)
  }

  /// Candidate entry points relative to the package directory, ESM first
  pub fn entries(&self) -> impl Iterator<Item = &str> {
    self
      .module
      .as_deref()
      .into_iter()
      .chain(self.main.as_deref())
      .filter(|entry| !entry.is_empty())
  }
}

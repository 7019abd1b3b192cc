use std::path::Path;
use std::path::PathBuf;

use serde_json5::Location;
use sitepack_core::diagnostic::CodeFrame;
use sitepack_core::diagnostic::CodeHighlight;
use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::DiagnosticError;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_filesystem::search::find_ancestor_file;
use sitepack_filesystem::FileSystemRef;

use crate::builtin_configs::default_config;
use crate::sitepack_rc::SitepackRc;

pub const CONFIG_FILE_NAME: &str = "sitepack.json5";

#[derive(Default)]
pub struct LoadConfigOptions<'a> {
  /// A file path that will be used to load the config from instead of searching for one
  pub config: Option<&'a Path>,
}

/// Where the loaded configuration came from
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigSource {
  File(PathBuf),
  Builtin,
}

/// Loads sitepack.json5 config
pub struct SitepackRcConfigLoader {
  fs: FileSystemRef,
}

impl SitepackRcConfigLoader {
  pub fn new(fs: FileSystemRef) -> Self {
    SitepackRcConfigLoader { fs }
  }

  fn load_config(&self, path: PathBuf) -> Result<SitepackRc, DiagnosticError> {
    let raw = self.fs.read_to_string(&path).map_err(|source| {
      diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::NotFound)
        .message(format!(
          "Unable to read config {}: {source}",
          path.display()
        ))
        .code_frames(vec![CodeFrame::from(path.clone())]))
    })?;

    parse_config(&raw, path)
  }

  /// Finds and loads a sitepack.json5 file
  ///
  /// An explicit config path must exist. Otherwise the nearest sitepack.json5 from the project
  /// root upwards is used, falling back to the builtin config.
  pub fn load(
    &self,
    project_root: &Path,
    options: LoadConfigOptions,
  ) -> Result<(SitepackRc, ConfigSource), DiagnosticError> {
    let config_path = match options.config {
      Some(config) => Some(project_root.join(config)),
      None => find_ancestor_file(
        &*self.fs,
        &[CONFIG_FILE_NAME],
        project_root,
        Path::new("/"),
      ),
    };

    match config_path {
      Some(path) => {
        tracing::debug!(path = %path.display(), "Loading config");
        let rc = self.load_config(path.clone())?;
        Ok((rc, ConfigSource::File(path)))
      }
      None => {
        tracing::debug!("No {} found, using the builtin config", CONFIG_FILE_NAME);
        Ok((default_config()?, ConfigSource::Builtin))
      }
    }
  }
}

pub(crate) fn parse_config(raw: &str, path: PathBuf) -> Result<SitepackRc, DiagnosticError> {
  serde_json5::from_str::<SitepackRc>(raw)
    .map_err(|error| serde_to_diagnostic_error(error, raw, path))
}

fn serde_to_diagnostic_error(error: serde_json5::Error, raw: &str, path: PathBuf) -> DiagnosticError {
  let message = format!("Failed to parse {}", path.display());

  let code_frame = match error {
    serde_json5::Error::Message { msg, location } => {
      let location = location.unwrap_or(Location { column: 1, line: 1 });

      CodeFrame {
        code: Some(raw.to_string()),
        file_path: Some(path),
        code_highlights: vec![CodeHighlight {
          message: Some(msg),
          ..CodeHighlight::from([location.line, location.column])
        }],
      }
    }
  };

  diagnostic_error!(DiagnosticBuilder::default()
    .kind(ErrorKind::ParseError)
    .message(message)
    .code_frames(vec![code_frame]))
}

use std::fmt::Display;
use std::fmt::Formatter;

use derive_builder::Builder;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::CodeFrame;
use super::ErrorKind;

/// Errors surfaced to the user are `anyhow` errors wrapping a [`Diagnostic`]
pub type DiagnosticError = anyhow::Error;

/// This is a user facing error for sitepack.
///
/// Usually but not always this is linked to a file on disk.
#[derive(Builder, Error, Debug, Deserialize, PartialEq, Serialize, Clone, Default)]
#[builder(pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
  /// Classification used by callers that need to react to specific failures
  #[builder(default)]
  pub kind: ErrorKind,

  /// A summary user-facing message
  #[builder(setter(into))]
  pub message: String,

  /// Indicates where this diagnostic was emitted from
  #[builder(default, setter(into, strip_option))]
  pub origin: Option<String>,

  /// A list of files with source-code highlights
  #[builder(default, setter(strip_option))]
  pub code_frames: Option<Vec<CodeFrame>>,

  /// Hints for the user
  #[builder(default, setter(strip_option))]
  pub hints: Option<Vec<String>>,
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message)
  }
}

impl Diagnostic {
  /// Returns the diagnostic carried by an error, if any
  pub fn from_error(error: &anyhow::Error) -> Option<&Diagnostic> {
    error.downcast_ref::<Diagnostic>()
  }
}

/// Creates an `anyhow::Error` carrying a [`Diagnostic`]
///
/// Accepts either a format string or a `DiagnosticBuilder`.
#[macro_export]
macro_rules! diagnostic_error {
  ($fmt:literal $(, $arg:expr)* $(,)?) => {
    anyhow::Error::new($crate::diagnostic::Diagnostic {
      message: format!($fmt $(, $arg)*),
      ..$crate::diagnostic::Diagnostic::default()
    })
  };
  ($builder:expr) => {
    match $builder.build() {
      Ok(diagnostic) => anyhow::Error::new(diagnostic),
      Err(error) => anyhow::anyhow!(error),
    }
  };
}

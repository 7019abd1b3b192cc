use std::fmt::Display;
use std::fmt::Formatter;

use anyhow::anyhow;
use serde::Serialize;
use sitepack_core::diagnostic::Diagnostic;
use sitepack_core::diagnostic::Diagnostics;

/// A build failure in the shape reported to users
#[derive(Debug, PartialEq)]
pub enum SitepackError {
  Diagnostic(Diagnostic),
  Diagnostics(Diagnostics),
  Unknown(String),
}

impl SitepackError {
  pub fn diagnostics(&self) -> Vec<Diagnostic> {
    match self {
      SitepackError::Diagnostic(diagnostic) => vec![diagnostic.clone()],
      SitepackError::Diagnostics(diagnostics) => diagnostics.as_ref().clone(),
      SitepackError::Unknown(message) => vec![Diagnostic {
        message: message.clone(),
        ..Diagnostic::default()
      }],
    }
  }
}

impl Display for SitepackError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    for (index, diagnostic) in self.diagnostics().iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }

      write!(f, "{}", diagnostic.message)?;
      for hint in diagnostic.hints.iter().flatten() {
        write!(f, "\n  hint: {hint}")?;
      }
    }

    Ok(())
  }
}

impl Serialize for SitepackError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    match self {
      SitepackError::Diagnostic(diagnostic) => diagnostic.serialize(serializer),
      SitepackError::Diagnostics(diagnostics) => diagnostics.serialize(serializer),
      SitepackError::Unknown(message) => message.serialize(serializer),
    }
  }
}

impl From<&anyhow::Error> for SitepackError {
  fn from(error: &anyhow::Error) -> Self {
    if let Some(diagnostic) = error.downcast_ref::<Diagnostic>() {
      Self::Diagnostic(diagnostic.clone())
    } else if let Some(diagnostics) = error.downcast_ref::<Diagnostics>() {
      Self::Diagnostics(diagnostics.clone())
    } else if let Some(message) = error.downcast_ref::<String>() {
      Self::Unknown(message.clone())
    } else {
      Self::Unknown(format!("{error:#}"))
    }
  }
}

impl From<SitepackError> for anyhow::Error {
  fn from(value: SitepackError) -> Self {
    match value {
      SitepackError::Diagnostic(diagnostic) => anyhow!(diagnostic),
      SitepackError::Diagnostics(diagnostics) => anyhow!(diagnostics),
      SitepackError::Unknown(message) => anyhow!(message),
    }
  }
}

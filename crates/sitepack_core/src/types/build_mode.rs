use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::diagnostic::DiagnosticBuilder;
use crate::diagnostic::DiagnosticError;
use crate::diagnostic::ErrorKind;
use crate::diagnostic_error;

/// Environment variable selecting the build mode
pub const MODE_ENV_VAR: &str = "NODE_ENV";

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  #[default]
  Development,
  Production,
}

impl BuildMode {
  /// Reads the mode from `NODE_ENV`
  pub fn from_env() -> Self {
    Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
  }

  /// Only `"production"` selects production, any other or missing value builds in development
  pub fn from_env_value(value: Option<&str>) -> Self {
    match value {
      Some("production") => BuildMode::Production,
      Some("development") | Some("") | None => BuildMode::Development,
      Some(other) => {
        tracing::debug!(value = other, "Unrecognised {MODE_ENV_VAR}, building in development");
        BuildMode::Development
      }
    }
  }

  pub fn should_optimize(&self) -> bool {
    matches!(self, BuildMode::Production)
  }
}

impl Display for BuildMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BuildMode::Development => write!(f, "development"),
      BuildMode::Production => write!(f, "production"),
    }
  }
}

impl FromStr for BuildMode {
  type Err = DiagnosticError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "development" => Ok(BuildMode::Development),
      "production" => Ok(BuildMode::Production),
      other => Err(diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::InvalidConfig)
        .message(format!("Invalid build mode \"{other}\""))
        .hints(vec![String::from(
          "Expected either \"development\" or \"production\""
        )]))),
    }
  }
}

impl<'de> Deserialize<'de> for BuildMode {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
  }
}

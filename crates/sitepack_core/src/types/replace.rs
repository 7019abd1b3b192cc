use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use super::BuildMode;

/// Values that come from the build itself rather than from the config file
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplacementSource {
  /// The resolved build mode, as a string literal
  Mode,
}

/// A replacement as written in config
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplacementValue {
  /// Inserted verbatim
  Text(String),
  /// Serialised to JSON before insertion
  Json { json: serde_json::Value },
  From { from: ReplacementSource },
}

impl ReplacementValue {
  /// Materialises the literal text inserted in place of the token
  pub fn resolve(&self, mode: BuildMode) -> String {
    match self {
      ReplacementValue::Text(text) => text.clone(),
      ReplacementValue::Json { json } => json.to_string(),
      ReplacementValue::From {
        from: ReplacementSource::Mode,
      } => serde_json::Value::String(mode.to_string()).to_string(),
    }
  }
}

/// Token to literal text substitutions applied to every script module
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplacementTable {
  /// Reject sources that assign to a replaced token
  pub prevent_assignment: bool,
  pub values: IndexMap<String, String>,
}

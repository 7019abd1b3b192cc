use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
  /// A file the build depends on is missing
  NotFound,
  /// A config file or source could not be parsed
  ParseError,
  /// Two parts of the configuration contradict each other
  ConfigConflict,
  /// A config value is outside of its allowed range
  InvalidConfig,
  #[default]
  Unknown,
}

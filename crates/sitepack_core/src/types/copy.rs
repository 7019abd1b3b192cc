use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// A file produced outside of the pipeline that is duplicated into the output directory
#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyTarget {
  /// The file to copy, relative to the project root
  pub src: PathBuf,
  /// Destination directory, relative to the output directory
  pub dest: PathBuf,
}

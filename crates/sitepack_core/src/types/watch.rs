use std::path::Path;

use glob_match::glob_match;
use serde::Deserialize;
use serde::Serialize;

/// File-watch policy of the development loop
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchOptions {
  /// Globs of paths whose changes never trigger a rebuild
  pub ignored: Vec<String>,
}

impl WatchOptions {
  /// `path` is matched as given, use paths relative to the project root
  pub fn is_ignored(&self, path: &Path) -> bool {
    let path = path.to_string_lossy().replace('\\', "/");
    self
      .ignored
      .iter()
      .any(|pattern| glob_match(pattern, &path))
  }
}

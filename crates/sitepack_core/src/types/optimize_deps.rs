use serde::Deserialize;
use serde::Serialize;

/// Which dependencies are normalised eagerly before the main build and which are left alone
///
/// The two lists must not share entries.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DependencyOptimization {
  pub include: Vec<String>,
  pub exclude: Vec<String>,
}

impl DependencyOptimization {
  /// Names declared in both lists
  pub fn conflicts(&self) -> Vec<String> {
    self
      .include
      .iter()
      .filter(|name| self.exclude.contains(name))
      .cloned()
      .collect()
  }

  pub fn is_prebundled(&self, name: &str) -> bool {
    self.include.iter().any(|included| included == name)
  }

  pub fn is_excluded(&self, name: &str) -> bool {
    self.exclude.iter().any(|excluded| excluded == name)
  }
}

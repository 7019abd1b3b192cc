use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Forced resolution overrides from a logical module name to a fixed location
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AliasMap {
  map: IndexMap<String, PathBuf>,
}

impl AliasMap {
  pub fn new(map: IndexMap<String, PathBuf>) -> Self {
    Self { map }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
    self.map.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }

  /// Returns the aliased location for `specifier`
  ///
  /// An alias for `name` also applies to `name/subpath`, in which case the subpath is joined onto
  /// the alias target.
  pub fn resolve_alias(&self, specifier: &str) -> Option<PathBuf> {
    if let Some(target) = self.map.get(specifier) {
      return Some(target.clone());
    }

    self.map.iter().find_map(|(name, target)| {
      specifier
        .strip_prefix(name.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|subpath| !subpath.is_empty())
        .map(|subpath| target.join(subpath))
    })
  }

  /// Makes every relative target absolute against `base`
  pub fn with_base(self, base: &Path) -> Self {
    Self {
      map: self
        .map
        .into_iter()
        .map(|(name, target)| {
          let target = if target.is_absolute() {
            target
          } else {
            base.join(target)
          };
          (name, target)
        })
        .collect(),
    }
  }
}

impl FromIterator<(String, PathBuf)> for AliasMap {
  fn from_iter<T: IntoIterator<Item = (String, PathBuf)>>(iter: T) -> Self {
    Self {
      map: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn monaco_aliases() -> AliasMap {
    AliasMap::from_iter([
      (
        String::from("@monaco-editor/react"),
        PathBuf::from("/ws/node_modules/@monaco-editor/react"),
      ),
      (
        String::from("monaco-editor"),
        PathBuf::from("/ws/node_modules/monaco-editor"),
      ),
    ])
  }

  #[test]
  fn resolves_exact_names() {
    assert_eq!(
      monaco_aliases().resolve_alias("monaco-editor"),
      Some(PathBuf::from("/ws/node_modules/monaco-editor"))
    );
  }

  #[test]
  fn joins_subpaths_onto_the_target() {
    assert_eq!(
      monaco_aliases().resolve_alias("monaco-editor/esm/vs/editor/editor.api"),
      Some(PathBuf::from(
        "/ws/node_modules/monaco-editor/esm/vs/editor/editor.api"
      ))
    );
  }

  #[test]
  fn does_not_match_names_sharing_a_prefix() {
    assert_eq!(monaco_aliases().resolve_alias("monaco-editor-webpack"), None);
    assert_eq!(monaco_aliases().resolve_alias("react"), None);
  }

  #[test]
  fn with_base_only_rewrites_relative_targets() {
    let aliases = AliasMap::from_iter([
      (String::from("a"), PathBuf::from("node_modules/a")),
      (String::from("b"), PathBuf::from("/abs/b")),
    ])
    .with_base(Path::new("/ws"));

    assert_eq!(aliases.resolve_alias("a"), Some(PathBuf::from("/ws/node_modules/a")));
    assert_eq!(aliases.resolve_alias("b"), Some(PathBuf::from("/abs/b")));
  }
}

use glob_match::glob_match;
use serde::Deserialize;
use serde::Serialize;

/// Decides whether a module reference is left untouched in the output
///
/// Rules are data rather than closures so they can be loaded from config and compared in tests.
#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ExternalRule {
  /// Matches any identifier containing the value
  Substring(String),
  /// Matches the identifier exactly
  Exact(String),
  /// Matches the identifier against a glob
  Glob(String),
}

impl ExternalRule {
  pub fn matches(&self, id: &str) -> bool {
    match self {
      ExternalRule::Substring(value) => id.contains(value.as_str()),
      ExternalRule::Exact(value) => id == value,
      ExternalRule::Glob(pattern) => glob_match(pattern, id),
    }
  }

  pub fn value(&self) -> &str {
    match self {
      ExternalRule::Substring(value) | ExternalRule::Exact(value) | ExternalRule::Glob(value) => {
        value
      }
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, Hash, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExternalRules(Vec<ExternalRule>);

impl ExternalRules {
  pub fn new(rules: Vec<ExternalRule>) -> Self {
    Self(rules)
  }

  pub fn rules(&self) -> &[ExternalRule] {
    &self.0
  }

  pub fn is_external(&self, id: &str) -> bool {
    self.0.iter().any(|rule| rule.matches(id))
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn substring_rule_matches_any_identifier_containing_the_marker() {
    let rule = ExternalRule::Substring(String::from("js.bc.js"));

    for id in [
      "js.bc.js",
      "../../js/js.bc.js",
      "/project/_build/default/js/js.bc.js",
      "js.bc.js?worker",
    ] {
      assert!(rule.matches(id), "{id} should be external");
    }

    for id in ["react", "./Index.ml.js", "js.bc", "monaco-editor", ""] {
      assert!(!rule.matches(id), "{id} should be bundled");
    }
  }

  #[test]
  fn exact_and_glob_rules() {
    assert!(ExternalRule::Exact(String::from("react")).matches("react"));
    assert!(!ExternalRule::Exact(String::from("react")).matches("react-dom"));

    let glob = ExternalRule::Glob(String::from("**/*.bc.js"));
    assert!(glob.matches("_build/default/js/js.bc.js"));
    assert!(!glob.matches("_build/default/js/index.js"));
  }

  #[test]
  fn rules_deserialize_as_tagged_data() {
    let rules: ExternalRules =
      serde_json::from_str(r#"[{ "kind": "substring", "value": "js.bc.js" }]"#).unwrap();

    assert_eq!(
      rules,
      ExternalRules::new(vec![ExternalRule::Substring(String::from("js.bc.js"))])
    );
    assert!(rules.is_external("./js.bc.js"));
    assert!(!ExternalRules::default().is_external("./js.bc.js"));
  }
}

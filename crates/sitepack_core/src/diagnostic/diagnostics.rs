use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;
use thiserror::Error;

use super::Diagnostic;

/// Several diagnostics reported together, e.g. every failed config check
#[derive(Clone, Debug, Default, Error, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
  pub fn as_ref(&self) -> &Vec<Diagnostic> {
    &self.0
  }

  pub fn push(&mut self, diagnostic: Diagnostic) {
    self.0.push(diagnostic);
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// One message per line
impl Display for Diagnostics {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let messages = self
      .0
      .iter()
      .map(|diagnostic| diagnostic.message.as_str())
      .collect::<Vec<_>>();

    f.write_str(&messages.join("\n"))
  }
}

impl From<Vec<Diagnostic>> for Diagnostics {
  fn from(diagnostics: Vec<Diagnostic>) -> Self {
    Self(diagnostics)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn displays_every_message() {
    let mut diagnostics = Diagnostics::default();
    diagnostics.push(Diagnostic {
      message: String::from("Entry module missing"),
      ..Diagnostic::default()
    });
    diagnostics.push(Diagnostic {
      message: String::from("Copy source missing"),
      ..Diagnostic::default()
    });

    assert_eq!(
      diagnostics.to_string(),
      "Entry module missing\nCopy source missing"
    );
  }
}

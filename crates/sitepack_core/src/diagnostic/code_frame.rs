use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHighlight {
  /// 1-based line of the highlight
  pub line: usize,
  /// 1-based column of the highlight
  pub column: usize,
  pub message: Option<String>,
}

impl From<[usize; 2]> for CodeHighlight {
  fn from([line, column]: [usize; 2]) -> Self {
    CodeHighlight {
      line,
      column,
      message: None,
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFrame {
  /// Source-code of the file at the time of error
  pub code: Option<String>,

  /// Path to the source file if applicable.
  pub file_path: Option<PathBuf>,

  /// List of source-code highlight messages
  pub code_highlights: Vec<CodeHighlight>,
}

impl From<PathBuf> for CodeFrame {
  fn from(path: PathBuf) -> Self {
    CodeFrame {
      file_path: Some(path),
      ..CodeFrame::default()
    }
  }
}

impl CodeFrame {
  /// Builds a frame highlighting the byte `offset` within `code`
  pub fn at_offset(path: PathBuf, code: &str, offset: usize) -> Self {
    let prefix = &code[..offset.min(code.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix
      .rfind('\n')
      .map_or(prefix.len(), |newline| prefix.len() - newline - 1)
      + 1;

    CodeFrame {
      code: Some(code.to_string()),
      file_path: Some(path),
      code_highlights: vec![CodeHighlight::from([line, column])],
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn at_offset_computes_line_and_column() {
    let code = "const a = 1;\nprocess.env.NODE_ENV = 'x';\n";
    let offset = code.find("process").unwrap();

    let frame = CodeFrame::at_offset(PathBuf::from("/a.js"), code, offset);

    assert_eq!(frame.code_highlights, vec![CodeHighlight::from([2, 1])]);
  }
}

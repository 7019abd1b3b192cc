use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static STATIC_IMPORT_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"(?m)^[ \t]*(?:import|export)\s+(?:[\w*${}\s,]+?\s+from\s+)?["']([^"'\n]+)["'][ \t]*;?"#)
    .expect("static import regex should compile")
});

static DYNAMIC_IMPORT_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"\bimport\s*\(\s*["']([^"'\n]+)["']\s*\)"#).expect("dynamic import regex should compile")
});

static WORKER_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r#"new\s+(?:Shared)?Worker\s*\(\s*new\s+URL\s*\(\s*["']([^"'\n]+)["']\s*,\s*import\.meta\.url\s*\)"#,
  )
  .expect("worker regex should compile")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
  /// `import ... from "x"`, `import "x"` and `export ... from "x"`
  Static,
  /// `import("x")`
  Dynamic,
  /// `new Worker(new URL("x", import.meta.url))`
  Worker,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportStatement {
  pub kind: ImportKind,
  pub specifier: String,
  /// Byte range of the whole statement or expression
  pub range: Range<usize>,
  /// Byte range of the specifier, without quotes
  pub specifier_range: Range<usize>,
}

/// Finds module references in script source, ordered by position
pub fn scan_imports(code: &str) -> Vec<ImportStatement> {
  let mut imports = Vec::new();

  let patterns: [(&Regex, ImportKind); 3] = [
    (&STATIC_IMPORT_REGEX, ImportKind::Static),
    (&DYNAMIC_IMPORT_REGEX, ImportKind::Dynamic),
    (&WORKER_REGEX, ImportKind::Worker),
  ];

  for (regex, kind) in patterns {
    for captures in regex.captures_iter(code) {
      let (Some(statement), Some(specifier)) = (captures.get(0), captures.get(1)) else {
        continue;
      };

      imports.push(ImportStatement {
        kind,
        specifier: specifier.as_str().to_string(),
        range: statement.range(),
        specifier_range: specifier.range(),
      });
    }
  }

  imports.sort_by_key(|import| import.range.start);
  imports
}

/// Kind of source file, inferred from its extension
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileType {
  #[default]
  Js,
  Jsx,
  Mjs,
  Json,
  Html,
  /// Anything the pipeline passes through untouched, keyed by lowercase extension
  Other(String),
}

impl FileType {
  pub fn from_extension(ext: &str) -> Self {
    let ext = ext.to_ascii_lowercase();
    match ext.as_str() {
      "js" | "cjs" => FileType::Js,
      "jsx" => FileType::Jsx,
      "mjs" => FileType::Mjs,
      "json" => FileType::Json,
      "htm" | "html" => FileType::Html,
      _ => FileType::Other(ext),
    }
  }

  /// Whether sources of this type are script modules the engine scans for imports
  pub fn is_script(&self) -> bool {
    matches!(self, FileType::Js | FileType::Jsx | FileType::Mjs)
  }
}

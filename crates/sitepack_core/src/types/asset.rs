use std::path::PathBuf;

use super::FileType;

/// A source file flowing through the transformer stages
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Asset {
  pub code: String,
  pub file_path: PathBuf,
  pub file_type: FileType,
}

impl Asset {
  pub fn new(file_path: PathBuf, code: String) -> Self {
    let file_type = file_path
      .extension()
      .map(|ext| FileType::from_extension(&ext.to_string_lossy()))
      .unwrap_or_default();

    Self {
      code,
      file_path,
      file_type,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn infers_the_file_type_from_the_extension() {
    let asset = Asset::new(PathBuf::from("/src/index.html"), String::new());
    assert_eq!(asset.file_type, FileType::Html);

    let asset = Asset::new(PathBuf::from("/src/Index.ml.js"), String::new());
    assert_eq!(asset.file_type, FileType::Js);
  }
}

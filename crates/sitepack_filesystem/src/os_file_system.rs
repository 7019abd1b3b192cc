use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::FileSystem;

/// `FileSystem` backed by `std::fs`
#[derive(Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn cwd(&self) -> std::io::Result<PathBuf> {
    std::env::current_dir()
  }

  fn create_directory(&self, path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
  }

  fn remove_directory(&self, path: &Path) -> std::io::Result<()> {
    fs::remove_dir_all(path)
  }

  fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path)
  }

  fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)
  }

  fn is_file(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }
}

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::normalize_path;
use crate::FileSystem;

#[derive(Debug)]
enum Node {
  Directory,
  File(Vec<u8>),
}

/// A `FileSystem` kept entirely in memory
///
/// Writing a file implicitly creates its parent directories, like `OsFileSystem::write` does.
#[derive(Debug)]
pub struct InMemoryFileSystem {
  nodes: RwLock<BTreeMap<PathBuf, Node>>,
  cwd: RwLock<PathBuf>,
}

impl Default for InMemoryFileSystem {
  fn default() -> Self {
    let root = if cfg!(windows) {
      PathBuf::from("C:/")
    } else {
      PathBuf::from("/")
    };

    Self {
      nodes: RwLock::new(BTreeMap::from([(root.clone(), Node::Directory)])),
      cwd: RwLock::new(root),
    }
  }
}

impl InMemoryFileSystem {
  /// Relative paths are resolved against `cwd` from now on
  pub fn set_current_working_directory(&self, cwd: &Path) {
    let cwd = self.absolute(cwd);
    *self.cwd.write() = cwd;
  }

  pub fn write_file(&self, path: &Path, contents: String) {
    self.insert(self.absolute(path), Node::File(contents.into_bytes()));
  }

  fn absolute(&self, path: &Path) -> PathBuf {
    normalize_path(&self.cwd.read().join(path))
  }

  fn insert(&self, path: PathBuf, node: Node) {
    let mut nodes = self.nodes.write();
    for ancestor in path.ancestors().skip(1) {
      nodes
        .entry(ancestor.to_path_buf())
        .or_insert(Node::Directory);
    }
    nodes.insert(path, node);
  }
}

impl FileSystem for InMemoryFileSystem {
  fn cwd(&self) -> io::Result<PathBuf> {
    Ok(self.cwd.read().clone())
  }

  fn create_directory(&self, path: &Path) -> io::Result<()> {
    let path = self.absolute(path);
    if let Some(Node::File(_)) = self.nodes.read().get(&path) {
      return Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} is a file", path.display()),
      ));
    }

    self.insert(path, Node::Directory);
    Ok(())
  }

  fn remove_directory(&self, path: &Path) -> io::Result<()> {
    let path = self.absolute(path);
    let mut nodes = self.nodes.write();

    match nodes.get(&path) {
      Some(Node::Directory) => {
        nodes.retain(|node, _| !node.starts_with(&path));
        Ok(())
      }
      Some(Node::File(_)) => Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} is not a directory", path.display()),
      )),
      None => Err(io::Error::new(
        io::ErrorKind::NotFound,
        "Directory not found",
      )),
    }
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    match self.nodes.read().get(&self.absolute(path)) {
      Some(Node::File(contents)) => Ok(contents.clone()),
      Some(Node::Directory) => Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Path is a directory",
      )),
      None => Err(io::Error::new(io::ErrorKind::NotFound, "File not found")),
    }
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    String::from_utf8(self.read(path)?)
      .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
  }

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    let path = self.absolute(path);
    if let Some(Node::Directory) = self.nodes.read().get(&path) {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Path is a directory",
      ));
    }

    self.insert(path, Node::File(contents.to_vec()));
    Ok(())
  }

  fn is_file(&self, path: &Path) -> bool {
    matches!(
      self.nodes.read().get(&self.absolute(path)),
      Some(Node::File(_))
    )
  }

  fn is_dir(&self, path: &Path) -> bool {
    matches!(
      self.nodes.read().get(&self.absolute(path)),
      Some(Node::Directory)
    )
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn writes_create_parent_directories() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/ws/website/index.html"), String::from("<html>"));

    assert!(fs.is_dir(Path::new("/ws")));
    assert!(fs.is_dir(Path::new("/ws/website")));
    assert!(fs.is_file(Path::new("/ws/website/index.html")));
    assert!(!fs.is_dir(Path::new("/ws/website/index.html")));
    assert_eq!(
      fs.read_to_string(Path::new("/ws/website/./index.html")).unwrap(),
      "<html>"
    );
  }

  #[test]
  fn missing_files_are_not_found() {
    let fs = InMemoryFileSystem::default();

    assert_eq!(
      fs.read(Path::new("/ws/js.bc.js")).map_err(|e| e.kind()),
      Err(io::ErrorKind::NotFound)
    );
  }

  #[test]
  fn relative_paths_resolve_against_the_cwd() {
    let fs = InMemoryFileSystem::default();
    fs.set_current_working_directory(Path::new("/ws/website"));
    fs.write(Path::new("../node_modules/react/index.js"), b"")
      .unwrap();

    assert!(fs.is_file(Path::new("/ws/node_modules/react/index.js")));
    assert_eq!(fs.cwd().unwrap(), PathBuf::from("/ws/website"));

    fs.set_current_working_directory(Path::new("/ws"));
    assert!(fs.is_file(Path::new("node_modules/react/index.js")));
  }

  #[test]
  fn removing_a_directory_removes_everything_below_it() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/ws/website/dist/index.html"), String::new());
    fs.write_file(Path::new("/ws/website/dist/assets/Index.ml.js"), String::new());
    fs.write_file(Path::new("/ws/website/dist-notes.txt"), String::new());

    fs.remove_directory(Path::new("/ws/website/dist")).unwrap();

    assert!(!fs.is_dir(Path::new("/ws/website/dist")));
    assert!(!fs.is_file(Path::new("/ws/website/dist/assets/Index.ml.js")));
    assert!(fs.is_file(Path::new("/ws/website/dist-notes.txt")));
  }

  #[test]
  fn removing_a_missing_directory_fails() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/ws/index.html"), String::new());

    assert!(fs.remove_directory(Path::new("/ws/dist")).is_err());
    assert!(fs.remove_directory(Path::new("/ws/index.html")).is_err());
  }

  #[test]
  fn files_and_directories_do_not_overwrite_each_other() {
    let fs = InMemoryFileSystem::default();
    fs.create_directory(Path::new("/ws/dist")).unwrap();
    fs.write_file(Path::new("/ws/index.html"), String::new());

    assert!(fs.write(Path::new("/ws/dist"), b"").is_err());
    assert!(fs.create_directory(Path::new("/ws/index.html")).is_err());
  }
}

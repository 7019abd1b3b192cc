use std::path::Path;
use std::path::PathBuf;

use crate::FileSystem;

/// Walks up from `from` looking for the first directory that contains one of `filenames`
///
/// The search stops once `root` has been checked.
pub fn find_ancestor_file<P: AsRef<Path>>(
  fs: &dyn FileSystem,
  filenames: &[&str],
  from: P,
  root: P,
) -> Option<PathBuf> {
  let root = root.as_ref();

  for dir in from.as_ref().ancestors() {
    for name in filenames {
      let candidate = dir.join(name);
      if fs.is_file(&candidate) {
        return Some(candidate);
      }
    }

    if dir == root {
      break;
    }
  }

  None
}

/// Walks up from `from` yielding every existing `<ancestor>/<dirname>` directory
pub fn find_ancestor_directories(
  fs: &dyn FileSystem,
  dirname: &str,
  from: &Path,
) -> Vec<PathBuf> {
  from
    .ancestors()
    .map(|dir| dir.join(dirname))
    .filter(|candidate| fs.is_dir(candidate))
    .collect()
}

#[cfg(test)]
mod test {
  use crate::in_memory_file_system::InMemoryFileSystem;

  use super::*;

  #[test]
  fn finds_the_nearest_ancestor_file() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/project/sitepack.json5"), String::from("{}"));
    fs.write_file(Path::new("/sitepack.json5"), String::from("{}"));

    assert_eq!(
      find_ancestor_file(
        &fs,
        &["sitepack.json5"],
        Path::new("/project/website"),
        Path::new("/")
      ),
      Some(PathBuf::from("/project/sitepack.json5"))
    );
  }

  #[test]
  fn stops_searching_at_the_root() {
    let fs = InMemoryFileSystem::default();
    fs.write_file(Path::new("/sitepack.json5"), String::from("{}"));

    assert_eq!(
      find_ancestor_file(
        &fs,
        &["sitepack.json5"],
        Path::new("/project/website"),
        Path::new("/project")
      ),
      None
    );
  }

  #[test]
  fn finds_every_ancestor_directory() {
    let fs = InMemoryFileSystem::default();
    fs.create_directory(Path::new("/project/node_modules")).unwrap();
    fs.create_directory(Path::new("/project/website/node_modules"))
      .unwrap();

    assert_eq!(
      find_ancestor_directories(&fs, "node_modules", Path::new("/project/website/src")),
      vec![
        PathBuf::from("/project/website/node_modules"),
        PathBuf::from("/project/node_modules"),
      ]
    );
  }
}

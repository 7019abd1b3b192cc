use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Files held in memory, used by tests
pub mod in_memory_file_system;

pub mod os_file_system;

pub mod search;

/// Shared handle to the file-system a build reads sources from and writes output to
pub type FileSystemRef = Arc<dyn FileSystem + Send + Sync>;

/// Every file-system access made by the pipeline
///
/// Paths may be relative, in which case they are resolved against [`FileSystem::cwd`].
#[mockall::automock]
pub trait FileSystem: std::fmt::Debug {
  fn cwd(&self) -> io::Result<PathBuf>;

  /// Creates `path` and any missing parent directories
  fn create_directory(&self, path: &Path) -> io::Result<()>;

  /// Deletes `path` recursively, failing when it is not a directory
  fn remove_directory(&self, path: &Path) -> io::Result<()>;

  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  /// Writes `contents` to `path`, creating parent directories as needed
  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;
}

/// Lexically removes `.` and `..` components without touching the disk
///
/// `..` never climbs above the root.
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut components: Vec<Component<'_>> = Vec::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match components.last().copied() {
        Some(Component::Normal(_)) => {
          components.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        Some(Component::ParentDir) | Some(Component::CurDir) | None => components.push(component),
      },
      Component::Prefix(_) => {
        components.clear();
        components.push(component);
      }
      Component::RootDir | Component::Normal(_) => components.push(component),
    }
  }

  components.iter().collect()
}

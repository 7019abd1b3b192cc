use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_core::plugin::PluginContext;
use sitepack_core::plugin::Resolution;
use sitepack_core::plugin::ResolveContext;
use sitepack_core::plugin::ResolverPlugin;
use sitepack_core::types::AliasMap;
use sitepack_core::types::ExternalRules;
use sitepack_filesystem::normalize_path;
use sitepack_filesystem::search::find_ancestor_directories;
use sitepack_filesystem::FileSystemRef;

use crate::package_json::PackageJson;

/// Extensions tried, in order, when a specifier omits one
pub const EXTENSIONS: [&str; 4] = ["js", "mjs", "jsx", "json"];

#[derive(Clone, Debug, Default)]
pub struct ResolverOptions {
  pub alias: AliasMap,
  pub external: ExternalRules,
  /// Enables bare specifier lookup through `node_modules`
  pub node_resolution: bool,
}

/// Resolves module specifiers to files on disk
///
/// External rules are checked first, then aliases, then relative and absolute paths, and finally
/// `node_modules` packages when node resolution is enabled.
#[derive(Debug)]
pub struct SitepackResolver {
  file_system: FileSystemRef,
  options: ResolverOptions,
}

impl SitepackResolver {
  pub fn new(ctx: &PluginContext, options: ResolverOptions) -> Self {
    Self {
      file_system: ctx.file_system.clone(),
      options,
    }
  }

  fn resolve_path(&self, path: &Path) -> Option<PathBuf> {
    let path = normalize_path(path);
    if self.file_system.is_file(&path) {
      return Some(path);
    }

    if let Some(file) = self.try_extensions(&path) {
      return Some(file);
    }

    if self.file_system.is_dir(&path) {
      return self.resolve_directory(&path);
    }

    None
  }

  fn try_extensions(&self, path: &Path) -> Option<PathBuf> {
    EXTENSIONS.iter().find_map(|extension| {
      let mut candidate = OsString::from(path.as_os_str());
      candidate.push(".");
      candidate.push(extension);

      let candidate = PathBuf::from(candidate);
      self.file_system.is_file(&candidate).then_some(candidate)
    })
  }

  fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
    let package_path = dir.join("package.json");
    if self.file_system.is_file(&package_path) {
      match PackageJson::read(&*self.file_system, &package_path) {
        Ok(package) => {
          for entry in package.entries() {
            let target = normalize_path(&dir.join(entry));
            if let Some(file) = self
              .file_system
              .is_file(&target)
              .then(|| target.clone())
              .or_else(|| self.try_extensions(&target))
            {
              return Some(file);
            }
          }
        }
        Err(error) => {
          tracing::warn!(path = %package_path.display(), "Ignoring package.json: {error}");
        }
      }
    }

    self.try_extensions(&dir.join("index"))
  }

  fn resolve_bare(&self, specifier: &str, importer: &Path) -> Option<PathBuf> {
    let (name, subpath) = split_package_specifier(specifier);
    let from = importer.parent().unwrap_or(importer);

    find_ancestor_directories(&*self.file_system, "node_modules", from)
      .into_iter()
      .find_map(|node_modules| {
        let package_dir = node_modules.join(name);
        if !self.file_system.is_dir(&package_dir) {
          return None;
        }

        match subpath {
          Some(subpath) => self.resolve_path(&package_dir.join(subpath)),
          None => self.resolve_directory(&package_dir),
        }
      })
  }

  fn not_found(&self, ctx: &ResolveContext<'_>) -> anyhow::Error {
    let mut hints = Vec::new();
    if is_bare(ctx.specifier) && !self.options.node_resolution {
      hints.push(String::from(
        "Add the nodeResolve plugin to resolve packages from node_modules",
      ));
    }

    let builder = DiagnosticBuilder::default()
      .kind(ErrorKind::NotFound)
      .message(format!(
        "Failed to resolve '{}' from '{}'",
        ctx.specifier,
        ctx.importer.display()
      ))
      .origin("sitepack_plugin_resolver")
      .code_frames(vec![ctx.importer.to_path_buf().into()]);

    if hints.is_empty() {
      diagnostic_error!(builder)
    } else {
      diagnostic_error!(builder.hints(hints))
    }
  }
}

impl ResolverPlugin for SitepackResolver {
  fn resolve(&self, ctx: ResolveContext<'_>) -> Result<Resolution, anyhow::Error> {
    let specifier = ctx.specifier;
    if self.options.external.is_external(specifier) {
      return Ok(Resolution::External(specifier.to_string()));
    }

    let resolved = if let Some(target) = self.options.alias.resolve_alias(specifier) {
      tracing::trace!(specifier, target = %target.display(), "Resolving alias");
      self.resolve_path(&target)
    } else if is_bare(specifier) {
      if self.options.node_resolution {
        self.resolve_bare(specifier, ctx.importer)
      } else {
        None
      }
    } else {
      let base = ctx.importer.parent().unwrap_or(Path::new("/"));
      self.resolve_path(&base.join(specifier))
    };

    let Some(path) = resolved else {
      return Err(self.not_found(&ctx));
    };

    // Externals are matched against the resolved location as well as the specifier
    if self
      .options
      .external
      .is_external(&path.to_string_lossy().replace('\\', "/"))
    {
      return Ok(Resolution::External(specifier.to_string()));
    }

    Ok(Resolution::Resolved(path))
  }
}

fn is_bare(specifier: &str) -> bool {
  !(specifier.starts_with("./")
    || specifier.starts_with("../")
    || specifier == "."
    || specifier == ".."
    || Path::new(specifier).is_absolute())
}

/// Splits `@scope/name/sub/path` into the package name and the optional subpath
fn split_package_specifier(specifier: &str) -> (&str, Option<&str>) {
  let name_segments = if specifier.starts_with('@') { 2 } else { 1 };

  let mut end = 0;
  for (index, segment) in specifier.split('/').enumerate() {
    if index == name_segments {
      return (&specifier[..end - 1], Some(&specifier[end..]).filter(|s| !s.is_empty()));
    }
    end += segment.len() + 1;
  }

  (specifier, None)
}

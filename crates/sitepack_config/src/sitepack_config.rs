use std::collections::HashSet;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use sitepack_core::diagnostic::Diagnostic;
use sitepack_core::diagnostic::DiagnosticError;
use sitepack_core::diagnostic::Diagnostics;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::types::AliasMap;
use sitepack_core::types::BuildMode;
use sitepack_core::types::ChunkingPolicy;
use sitepack_core::types::CommonJsOptions;
use sitepack_core::types::CopyTarget;
use sitepack_core::types::DependencyOptimization;
use sitepack_core::types::ExternalRules;
use sitepack_core::types::HtmlTag;
use sitepack_core::types::ReplacementTable;
use sitepack_core::types::WatchOptions;
use sitepack_core::types::WorkerFormat;
use sitepack_filesystem::normalize_path;
use sitepack_filesystem::FileSystem;

use crate::sitepack_rc::PluginEntry;
use crate::sitepack_rc::SitepackRc;

/// A validated stage of the pipeline, in declaration order
#[derive(Clone, Debug, PartialEq)]
pub enum PluginConfig {
  Copy(Vec<CopyTarget>),
  Replace(ReplacementTable),
  NodeResolve,
  Html(Vec<HtmlTag>),
}

/// Represents a fully resolved and validated pipeline
///
/// Every path is absolute. The descriptor is built once per build and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineDescriptor {
  pub project_root: PathBuf,
  pub entry: PathBuf,
  pub mode: BuildMode,
  pub alias: AliasMap,
  pub optimize_deps: DependencyOptimization,
  pub external: ExternalRules,
  pub chunking: ChunkingPolicy,
  pub worker_format: WorkerFormat,
  pub commonjs: CommonJsOptions,
  pub watch: WatchOptions,
  pub html_template: PathBuf,
  pub dist_dir: PathBuf,
  pub plugins: Vec<PluginConfig>,
}

impl PipelineDescriptor {
  /// Resolves `rc` against `project_root` and checks it against the file-system
  ///
  /// Every problem found is reported at once.
  pub fn new(
    rc: SitepackRc,
    mode: BuildMode,
    project_root: &Path,
    fs: &dyn FileSystem,
  ) -> Result<Self, DiagnosticError> {
    let mut diagnostics = Diagnostics::default();
    let resolve = |path: &Path| normalize_path(&project_root.join(path));

    let entry = resolve(&rc.entry);
    if !fs.is_file(&entry) {
      diagnostics.push(error(
        ErrorKind::NotFound,
        format!("Entry module {} does not exist", entry.display()),
      ));
    }

    let alias_root = resolve(rc.resolve.alias_root.as_deref().unwrap_or(Path::new(".")));
    let alias = rc.resolve.alias.with_base(&alias_root);
    for (name, target) in alias.iter() {
      if !fs.is_file(target) && !fs.is_dir(target) {
        diagnostics.push(error(
          ErrorKind::NotFound,
          format!(
            "Alias target for \"{name}\" does not exist: {}",
            target.display()
          ),
        ));
      }
    }

    let conflicts = rc.optimize_deps.conflicts();
    if !conflicts.is_empty() {
      diagnostics.push(error(
        ErrorKind::ConfigConflict,
        format!(
          "Dependencies cannot be both included in and excluded from pre-bundling: {}",
          conflicts.join(", ")
        ),
      ));
    }

    for rule in &rc.build.external {
      if rule.value().is_empty() {
        diagnostics.push(error(
          ErrorKind::InvalidConfig,
          String::from("External rules must have a non-empty value"),
        ));
      }
    }

    if !rc.build.output.is_engine_default() {
      diagnostics.push(error(
        ErrorKind::InvalidConfig,
        String::from("Manual chunks are not supported, remove build.output.manualChunks"),
      ));
    }

    let dist_dir = resolve(&rc.build.out_dir);
    if dist_dir == normalize_path(project_root) {
      diagnostics.push(error(
        ErrorKind::InvalidConfig,
        String::from("build.outDir cannot be the project root"),
      ));
    }

    let html_template = resolve(&rc.html.template);
    let plugins = validate_plugins(rc.plugins, mode, project_root, fs, &mut diagnostics);

    let has_html = plugins
      .iter()
      .any(|plugin| matches!(plugin, PluginConfig::Html(_)));
    if has_html && !fs.is_file(&html_template) {
      diagnostics.push(error(
        ErrorKind::NotFound,
        format!("HTML template {} does not exist", html_template.display()),
      ));
    }

    if !diagnostics.is_empty() {
      return Err(anyhow::Error::new(diagnostics));
    }

    tracing::debug!(%mode, entry = %entry.display(), "Pipeline descriptor validated");

    Ok(PipelineDescriptor {
      project_root: normalize_path(project_root),
      entry,
      mode,
      alias,
      optimize_deps: rc.optimize_deps,
      external: ExternalRules::new(rc.build.external),
      chunking: rc.build.output,
      worker_format: rc.worker.format,
      commonjs: rc.build.commonjs_options,
      watch: rc.server.watch,
      html_template,
      dist_dir,
      plugins,
    })
  }

  pub fn copy_targets(&self) -> impl Iterator<Item = &CopyTarget> {
    self.plugins.iter().flat_map(|plugin| match plugin {
      PluginConfig::Copy(targets) => targets.as_slice(),
      _ => &[][..],
    })
  }

  pub fn replacements(&self) -> impl Iterator<Item = &ReplacementTable> {
    self.plugins.iter().filter_map(|plugin| match plugin {
      PluginConfig::Replace(table) => Some(table),
      _ => None,
    })
  }

  pub fn node_resolution(&self) -> bool {
    self
      .plugins
      .iter()
      .any(|plugin| matches!(plugin, PluginConfig::NodeResolve))
  }

  pub fn html_tags(&self) -> Option<&[HtmlTag]> {
    self.plugins.iter().find_map(|plugin| match plugin {
      PluginConfig::Html(tags) => Some(tags.as_slice()),
      _ => None,
    })
  }
}

fn validate_plugins(
  entries: Vec<PluginEntry>,
  mode: BuildMode,
  project_root: &Path,
  fs: &dyn FileSystem,
  diagnostics: &mut Diagnostics,
) -> Vec<PluginConfig> {
  let mut plugins = Vec::with_capacity(entries.len());
  let mut replaced_tokens = HashSet::new();
  let mut html_plugins = 0;

  for entry in entries {
    match entry {
      PluginEntry::Copy { targets } => {
        for target in &targets {
          let src = normalize_path(&project_root.join(&target.src));
          if !fs.is_file(&src) {
            diagnostics.push(error(
              ErrorKind::NotFound,
              format!("Copy source {} does not exist", src.display()),
            ));
          }

          if target.dest.is_absolute() {
            diagnostics.push(error(
              ErrorKind::InvalidConfig,
              format!(
                "Copy destination {} must be relative to the output directory",
                target.dest.display()
              ),
            ));
          } else if normalize_path(&target.dest)
            .components()
            .any(|component| component == Component::ParentDir)
          {
            diagnostics.push(error(
              ErrorKind::InvalidConfig,
              format!(
                "Copy destination {} must stay inside the output directory",
                target.dest.display()
              ),
            ));
          }
        }

        plugins.push(PluginConfig::Copy(targets));
      }
      PluginEntry::Replace {
        prevent_assignment,
        values,
      } => {
        let mut resolved = IndexMap::with_capacity(values.len());
        for (token, value) in values {
          if token.is_empty() {
            diagnostics.push(error(
              ErrorKind::InvalidConfig,
              String::from("Replacement tokens cannot be empty"),
            ));
            continue;
          }

          if !replaced_tokens.insert(token.clone()) {
            diagnostics.push(error(
              ErrorKind::ConfigConflict,
              format!("\"{token}\" is replaced by more than one replace plugin"),
            ));
          }

          resolved.insert(token, value.resolve(mode));
        }

        plugins.push(PluginConfig::Replace(ReplacementTable {
          prevent_assignment,
          values: resolved,
        }));
      }
      PluginEntry::NodeResolve {} => plugins.push(PluginConfig::NodeResolve),
      PluginEntry::Html { tags } => {
        html_plugins += 1;
        if html_plugins > 1 {
          diagnostics.push(error(
            ErrorKind::ConfigConflict,
            String::from("Only one html plugin may be configured"),
          ));
        }

        for tag in &tags {
          if tag.tag.trim().is_empty() {
            diagnostics.push(error(
              ErrorKind::InvalidConfig,
              String::from("Injected html tags must have a tag name"),
            ));
          }
        }

        plugins.push(PluginConfig::Html(tags));
      }
    }
  }

  plugins
}

fn error(kind: ErrorKind, message: String) -> Diagnostic {
  Diagnostic {
    kind,
    message,
    origin: Some(String::from("sitepack_config")),
    ..Diagnostic::default()
  }
}

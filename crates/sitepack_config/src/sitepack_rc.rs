use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use sitepack_core::types::AliasMap;
use sitepack_core::types::BuildMode;
use sitepack_core::types::ChunkingPolicy;
use sitepack_core::types::CommonJsOptions;
use sitepack_core::types::CopyTarget;
use sitepack_core::types::DependencyOptimization;
use sitepack_core::types::ExternalRule;
use sitepack_core::types::HtmlTag;
use sitepack_core::types::ReplacementValue;
use sitepack_core::types::WatchOptions;
use sitepack_core::types::WorkerFormat;

/// Represents the contents of a sitepack.json5 file, before validation
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SitepackRc {
  /// Entry module, relative to the project root
  pub entry: PathBuf,

  /// Overrides the mode read from the environment
  #[serde(default)]
  pub mode: Option<BuildMode>,

  #[serde(default)]
  pub resolve: ResolveOptions,

  #[serde(default)]
  pub optimize_deps: DependencyOptimization,

  #[serde(default)]
  pub server: ServerOptions,

  #[serde(default)]
  pub worker: WorkerOptions,

  #[serde(default)]
  pub build: BuildOptions,

  #[serde(default)]
  pub html: HtmlOptions,

  #[serde(default)]
  pub plugins: Vec<PluginEntry>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ResolveOptions {
  /// Directory relative alias targets are resolved against, relative to the project root
  pub alias_root: Option<PathBuf>,
  pub alias: AliasMap,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ServerOptions {
  pub watch: WatchOptions,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct WorkerOptions {
  pub format: WorkerFormat,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct BuildOptions {
  /// Output directory, relative to the project root
  pub out_dir: PathBuf,
  pub commonjs_options: CommonJsOptions,
  pub external: Vec<ExternalRule>,
  pub output: ChunkingPolicy,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      out_dir: PathBuf::from("dist"),
      commonjs_options: CommonJsOptions::default(),
      external: Vec::new(),
      output: ChunkingPolicy::default(),
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HtmlOptions {
  /// HTML shell, relative to the project root
  pub template: PathBuf,
}

impl Default for HtmlOptions {
  fn default() -> Self {
    Self {
      template: PathBuf::from("index.html"),
    }
  }
}

/// One entry of the ordered `plugins` list
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub enum PluginEntry {
  Copy {
    targets: Vec<CopyTarget>,
  },
  #[serde(rename_all = "camelCase")]
  Replace {
    #[serde(default)]
    prevent_assignment: bool,
    values: IndexMap<String, ReplacementValue>,
  },
  NodeResolve {},
  Html {
    tags: Vec<HtmlTag>,
  },
}

impl PluginEntry {
  pub fn name(&self) -> &'static str {
    match self {
      PluginEntry::Copy { .. } => "copy",
      PluginEntry::Replace { .. } => "replace",
      PluginEntry::NodeResolve {} => "nodeResolve",
      PluginEntry::Html { .. } => "html",
    }
  }
}

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexSet;
use sitepack_core::plugin::Resolution;
use sitepack_core::plugin::ResolveContext;
use sitepack_core::types::Asset;

use crate::engine::import_scanner::scan_imports;
use crate::engine::import_scanner::ImportKind;
use crate::engine::import_scanner::ImportStatement;
use crate::plugins::ConfigPlugins;

/// A transformed module and what each of its references resolved to
#[derive(Debug)]
pub struct Module {
  pub asset: Asset,
  pub imports: Vec<(ImportStatement, Resolution)>,
}

/// Every module reachable from one entry, ordered so that dependencies come first
#[derive(Debug, Default)]
pub struct ModuleGraph {
  pub entry: PathBuf,
  pub modules: Vec<Module>,
  pub externals: IndexSet<String>,
  /// Entries of worker chunks referenced by this graph
  pub workers: IndexSet<PathBuf>,
}

pub struct ModuleGraphBuilder<'a> {
  plugins: &'a ConfigPlugins,
  graph: ModuleGraph,
  visiting: HashSet<PathBuf>,
  visited: HashSet<PathBuf>,
}

impl<'a> ModuleGraphBuilder<'a> {
  pub fn new(plugins: &'a ConfigPlugins) -> Self {
    Self {
      plugins,
      graph: ModuleGraph::default(),
      visiting: HashSet::new(),
      visited: HashSet::new(),
    }
  }

  /// Reads, transforms and resolves every module reachable from `entry`
  ///
  /// Worker references are recorded but not followed, they are built as separate graphs.
  pub fn build(mut self, entry: &Path) -> anyhow::Result<ModuleGraph> {
    self.graph.entry = entry.to_path_buf();
    self.visit(entry)?;

    tracing::debug!(
      entry = %entry.display(),
      modules = self.graph.modules.len(),
      externals = self.graph.externals.len(),
      "Built module graph"
    );

    Ok(self.graph)
  }

  fn visit(&mut self, path: &Path) -> anyhow::Result<()> {
    if self.visited.contains(path) || !self.visiting.insert(path.to_path_buf()) {
      // Already emitted, or part of a cycle that is being emitted
      return Ok(());
    }

    let plugins = self.plugins;
    let asset = plugins.load(path)?;
    let statements = if asset.file_type.is_script() {
      scan_imports(&asset.code)
    } else {
      Vec::new()
    };

    let resolver = plugins.resolver();
    let mut imports = Vec::with_capacity(statements.len());
    for statement in statements {
      let resolution = resolver.resolve(ResolveContext {
        specifier: &statement.specifier,
        importer: path,
      })?;

      match &resolution {
        Resolution::External(id) => {
          self.graph.externals.insert(id.clone());
        }
        Resolution::Resolved(dependency) if statement.kind == ImportKind::Worker => {
          self.graph.workers.insert(dependency.clone());
        }
        Resolution::Resolved(dependency) => {
          self.visit(dependency)?;
        }
      }

      imports.push((statement, resolution));
    }

    self.visiting.remove(path);
    self.visited.insert(path.to_path_buf());
    self.graph.modules.push(Module { asset, imports });

    Ok(())
  }
}

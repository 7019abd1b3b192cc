//! Single-chunk reference engine
//!
//! Every entry is concatenated into one chunk and every worker into its own chunk. Real module
//! bundling (scope hoisting, tree shaking, code splitting) is out of scope.
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use indexmap::IndexSet;
use sitepack_config::PipelineDescriptor;
use sitepack_core::plugin::Resolution;
use sitepack_core::plugin::ResolveContext;

use crate::engine::chunk::emit_chunk;
use crate::engine::chunk::Chunk;
use crate::engine::chunk::ChunkKind;
use crate::engine::chunk::ChunkOptions;
use crate::engine::module_graph::ModuleGraph;
use crate::engine::module_graph::ModuleGraphBuilder;
use crate::plugins::ConfigPlugins;

pub mod chunk;
pub mod import_scanner;
pub mod module_graph;

#[derive(Debug, Default)]
pub struct Bundle {
  /// Worker chunks first, the entry chunk last
  pub chunks: Vec<Chunk>,
  pub externals: IndexSet<String>,
}

impl Bundle {
  pub fn entry_chunk(&self) -> Option<&Chunk> {
    self.chunks.iter().find(|chunk| !chunk.is_worker)
  }
}

/// Resolves every dependency marked for pre-bundling
///
/// Pre-bundled dependencies must be resolvable up front, a failure here fails the build.
pub fn prebundle_dependencies(
  descriptor: &PipelineDescriptor,
  plugins: &ConfigPlugins,
) -> anyhow::Result<Vec<PathBuf>> {
  let mut prebundled = Vec::new();

  for dependency in &descriptor.optimize_deps.include {
    let resolution = plugins.resolver().resolve(ResolveContext {
      specifier: dependency,
      importer: &descriptor.entry,
    })?;

    match resolution {
      Resolution::Resolved(path) => {
        tracing::debug!(dependency = %dependency, path = %path.display(), "Pre-bundled dependency");
        prebundled.push(path);
      }
      Resolution::External(id) => {
        tracing::debug!(id = %id, "Skipping external dependency during pre-bundling");
      }
    }
  }

  Ok(prebundled)
}

pub fn bundle(descriptor: &PipelineDescriptor, plugins: &ConfigPlugins) -> anyhow::Result<Bundle> {
  let mut graphs = IndexMap::new();
  let mut pending = vec![descriptor.entry.clone()];

  while let Some(entry) = pending.pop() {
    if graphs.contains_key(&entry) {
      continue;
    }

    let graph = ModuleGraphBuilder::new(plugins).build(&entry)?;
    pending.extend(graph.workers.iter().cloned());
    graphs.insert(entry, graph);
  }

  let mut emitter = ChunkEmitter {
    descriptor,
    graphs: &graphs,
    file_names: HashMap::new(),
    in_progress: HashSet::new(),
    bundle: Bundle::default(),
  };
  emitter.emit(&descriptor.entry, ChunkKind::Entry)?;

  for graph in graphs.values() {
    emitter.bundle.externals.extend(graph.externals.iter().cloned());
  }

  Ok(emitter.bundle)
}

/// Emits chunks so that every worker chunk exists before the chunks referencing it
struct ChunkEmitter<'a> {
  descriptor: &'a PipelineDescriptor,
  graphs: &'a IndexMap<PathBuf, ModuleGraph>,
  file_names: HashMap<PathBuf, String>,
  in_progress: HashSet<PathBuf>,
  bundle: Bundle,
}

impl ChunkEmitter<'_> {
  fn emit(&mut self, entry: &Path, kind: ChunkKind) -> anyhow::Result<()> {
    let graphs = self.graphs;
    let Some(graph) = graphs.get(entry) else {
      return Ok(());
    };

    if self.file_names.contains_key(entry) || !self.in_progress.insert(entry.to_path_buf()) {
      return Ok(());
    }

    for worker in &graph.workers {
      self.emit(worker, ChunkKind::Worker(self.descriptor.worker_format))?;
    }

    let chunk = emit_chunk(
      graph,
      ChunkOptions {
        kind,
        mode: self.descriptor.mode,
        project_root: &self.descriptor.project_root,
        worker_file_names: &self.file_names,
      },
    )?;

    tracing::debug!(
      file_name = %chunk.file_name,
      modules = chunk.modules.len(),
      "Emitted chunk"
    );

    self.in_progress.remove(entry);
    self.file_names.insert(entry.to_path_buf(), chunk.file_name.clone());
    self.bundle.chunks.push(chunk);

    Ok(())
  }
}

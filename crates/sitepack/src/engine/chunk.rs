use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_core::plugin::Resolution;
use sitepack_core::types::BuildMode;
use sitepack_core::types::WorkerFormat;
use xxhash_rust::xxh3::xxh3_64;

use crate::engine::import_scanner::ImportKind;
use crate::engine::module_graph::Module;
use crate::engine::module_graph::ModuleGraph;

/// Directory of the output where chunks are placed
pub const ASSETS_DIR: &str = "assets";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChunkKind {
  Entry,
  Worker(WorkerFormat),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
  pub file_name: String,
  pub entry: PathBuf,
  pub modules: Vec<PathBuf>,
  pub is_worker: bool,
  #[serde(skip)]
  pub code: String,
}

impl Chunk {
  /// Location of the chunk relative to the output directory
  pub fn output_path(&self) -> PathBuf {
    Path::new(ASSETS_DIR).join(&self.file_name)
  }
}

pub struct ChunkOptions<'a> {
  pub kind: ChunkKind,
  pub mode: BuildMode,
  pub project_root: &'a Path,
  /// File names of the worker chunks this graph references
  pub worker_file_names: &'a HashMap<PathBuf, String>,
}

/// Concatenates a module graph into one file
///
/// Statements importing bundled modules are dropped, since those modules are already part of the
/// chunk. References to externals are kept verbatim.
pub fn emit_chunk(graph: &ModuleGraph, options: ChunkOptions<'_>) -> anyhow::Result<Chunk> {
  let mut sections = Vec::with_capacity(graph.modules.len());
  let mut modules = Vec::with_capacity(graph.modules.len());

  for module in &graph.modules {
    modules.push(module.asset.file_path.clone());

    if !module.asset.file_type.is_script() {
      tracing::debug!(
        path = %module.asset.file_path.display(),
        "Skipping non-script module in chunk"
      );
      continue;
    }

    let code = rewrite_module(module, options.worker_file_names)?;
    if options.mode.should_optimize() {
      sections.push(code);
    } else {
      let name = pathdiff::diff_paths(&module.asset.file_path, options.project_root)
        .unwrap_or_else(|| module.asset.file_path.clone());
      sections.push(format!("// {}\n{}", name.display(), code));
    }
  }

  let mut code = sections.join("\n");

  if let ChunkKind::Worker(WorkerFormat::Iife) = options.kind {
    if !graph.externals.is_empty() {
      return Err(diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::InvalidConfig)
        .message(format!(
          "Worker {} imports externals, which iife workers cannot load: {}",
          graph.entry.display(),
          graph
            .externals
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        ))
        .hints(vec![String::from("Use the es worker format")])));
    }

    code = format!("(function () {{\n{code}\n}})();\n");
  }

  let file_name = chunk_file_name(&graph.entry, &code, options.mode);

  Ok(Chunk {
    file_name,
    entry: graph.entry.clone(),
    modules,
    is_worker: matches!(options.kind, ChunkKind::Worker(_)),
    code,
  })
}

fn rewrite_module(module: &Module, worker_file_names: &HashMap<PathBuf, String>) -> anyhow::Result<String> {
  let code = module.asset.code.as_str();
  let mut output = String::with_capacity(code.len());
  let mut last = 0;

  for (statement, resolution) in &module.imports {
    let Resolution::Resolved(dependency) = resolution else {
      continue;
    };

    if statement.range.start < last {
      continue;
    }

    match statement.kind {
      ImportKind::Static => {
        output.push_str(&code[last..statement.range.start]);
        last = statement.range.end;
      }
      ImportKind::Dynamic => {
        output.push_str(&code[last..statement.range.start]);
        output.push_str("Promise.resolve()");
        last = statement.range.end;
      }
      ImportKind::Worker => {
        let Some(file_name) = worker_file_names.get(dependency) else {
          return Err(diagnostic_error!(
            "Worker {} has no chunk, workers cannot reference each other in a cycle",
            dependency.display()
          ));
        };

        output.push_str(&code[last..statement.specifier_range.start]);
        output.push_str("./");
        output.push_str(file_name);
        last = statement.specifier_range.end;
      }
    }
  }

  output.push_str(&code[last..]);
  Ok(output)
}

/// `<entry stem>.js`, with a content hash when optimizing
fn chunk_file_name(entry: &Path, code: &str, mode: BuildMode) -> String {
  let stem = entry
    .file_stem()
    .map(|stem| stem.to_string_lossy().to_string())
    .unwrap_or_else(|| String::from("index"));

  if mode.should_optimize() {
    let hash = format!("{:016x}", xxh3_64(code.as_bytes()));
    format!("{stem}.{}.js", &hash[..8])
  } else {
    format!("{stem}.js")
  }
}

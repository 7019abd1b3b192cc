use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Module format used for background-worker chunks
#[derive(Clone, Copy, Debug, Default, Deserialize, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerFormat {
  /// Native ES module workers, spawned with `{ type: "module" }`
  #[default]
  Es,
  /// Classic workers wrapped in an immediately invoked function
  Iife,
}

/// How modules are grouped into output files
///
/// Only the engine default is supported: every entry produces exactly one chunk, so the output
/// grouping is identical across builds with identical inputs.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkingPolicy {
  /// User supplied chunk groups, rejected when present
  pub manual_chunks: Option<IndexMap<String, Vec<String>>>,
}

impl ChunkingPolicy {
  pub fn is_engine_default(&self) -> bool {
    self.manual_chunks.is_none()
  }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonJsOptions {
  /// Treat externals imported from CommonJS as ES modules
  pub esm_externals: bool,
}

/// A file staged for the output directory
///
/// Outputs are held in memory until every stage has succeeded.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputFile {
  /// Location relative to the output directory
  pub path: PathBuf,
  pub contents: Vec<u8>,
}

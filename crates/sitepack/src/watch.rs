use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use sitepack_config::PipelineDescriptor;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchEventType {
  Create,
  Update,
  Delete,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEvent {
  pub path: PathBuf,
  pub kind: WatchEventType,
}

pub type WatchEvents = Vec<WatchEvent>;

/// True when any event touches a file that is neither ignored nor build output
///
/// Ignore globs are matched against paths relative to the project root.
pub fn should_rebuild(descriptor: &PipelineDescriptor, events: &WatchEvents) -> bool {
  events.iter().any(|event| {
    if event.path.starts_with(&descriptor.dist_dir) {
      return false;
    }

    let relative = pathdiff::diff_paths(&event.path, &descriptor.project_root)
      .unwrap_or_else(|| event.path.clone());

    !descriptor.watch.is_ignored(&relative) && !descriptor.watch.is_ignored(&event.path)
  })
}

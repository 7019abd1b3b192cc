use std::path::PathBuf;
use std::sync::Arc;

use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_core::plugin::PluginContext;
use sitepack_core::plugin::PluginOptions;
use sitepack_core::types::CopyTarget;
use sitepack_core::types::OutputFile;
use sitepack_filesystem::normalize_path;
use sitepack_filesystem::FileSystemRef;

/// Duplicates files produced outside of the pipeline into the output directory
///
/// Each source lands at `<dest>/<file name>` with its bytes unchanged.
#[derive(Debug)]
pub struct CopyPlugin {
  file_system: FileSystemRef,
  options: Arc<PluginOptions>,
  targets: Vec<CopyTarget>,
}

impl CopyPlugin {
  pub fn new(ctx: &PluginContext, targets: Vec<CopyTarget>) -> Self {
    Self {
      file_system: ctx.file_system.clone(),
      options: ctx.options.clone(),
      targets,
    }
  }

  pub fn run(&self) -> Result<Vec<OutputFile>, anyhow::Error> {
    self
      .targets
      .iter()
      .map(|target| self.copy(target))
      .collect()
  }

  fn copy(&self, target: &CopyTarget) -> Result<OutputFile, anyhow::Error> {
    let src = normalize_path(&self.options.project_root.join(&target.src));

    let contents = self.file_system.read(&src).map_err(|error| {
      diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::NotFound)
        .message(format!("Unable to copy {}: {error}", src.display()))
        .origin("sitepack_plugin_copy")
        .hints(vec![String::from(
          "Run the compiler that produces this file before building the site"
        )]))
    })?;

    let Some(file_name) = src.file_name() else {
      return Err(diagnostic_error!(
        "Copy source {} has no file name",
        src.display()
      ));
    };

    let path: PathBuf = normalize_path(&target.dest.join(file_name));

    tracing::debug!(
      src = %src.display(),
      dest = %path.display(),
      bytes = contents.len(),
      "Copied static file"
    );

    Ok(OutputFile { path, contents })
  }
}

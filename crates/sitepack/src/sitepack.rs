use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use sitepack_config::sitepack_rc_config_loader::LoadConfigOptions;
use sitepack_config::sitepack_rc_config_loader::SitepackRcConfigLoader;
use sitepack_config::PipelineDescriptor;
use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_core::plugin::PluginContext;
use sitepack_core::plugin::PluginOptions;
use sitepack_core::plugin::TransformerPlugin;
use sitepack_core::types::Asset;
use sitepack_core::types::BuildMode;
use sitepack_core::types::CommonJsOptions;
use sitepack_core::types::HtmlTag;
use sitepack_core::types::InjectTo;
use sitepack_core::types::OutputFile;
use sitepack_core::types::WorkerFormat;
use sitepack_filesystem::normalize_path;
use sitepack_filesystem::os_file_system::OsFileSystem;
use sitepack_filesystem::FileSystem;
use sitepack_filesystem::FileSystemRef;

use crate::engine::bundle;
use crate::engine::chunk::Chunk;
use crate::engine::prebundle_dependencies;
use crate::plugins::ConfigPlugins;
use crate::watch::should_rebuild;
use crate::watch::WatchEvents;

/// Location of the build manifest, relative to the output directory
pub const MANIFEST_PATH: &str = ".sitepack/manifest.json";

#[derive(Clone, Debug, Default)]
pub struct SitepackOptions {
  /// Explicit config file, relative to the project root
  pub config: Option<PathBuf>,
  /// Overrides `build.outDir`
  pub dist_dir: Option<PathBuf>,
  /// Overrides both the config file and `NODE_ENV`
  pub mode: Option<BuildMode>,
}

pub struct Sitepack {
  pub fs: FileSystemRef,
  pub options: SitepackOptions,
  pub project_root: PathBuf,
}

/// Summary of a successful build, also written to the output directory as the manifest
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
  pub mode: BuildMode,
  pub dist_dir: PathBuf,
  pub chunks: Vec<Chunk>,
  pub externals: Vec<String>,
  pub prebundled: Vec<PathBuf>,
  pub commonjs: CommonJsOptions,
  pub worker_format: WorkerFormat,
  /// Every written file, relative to `dist_dir`
  pub files: Vec<PathBuf>,
}

impl Sitepack {
  pub fn new(
    fs: Option<FileSystemRef>,
    project_root: &Path,
    options: SitepackOptions,
  ) -> Result<Self, anyhow::Error> {
    let fs = fs.unwrap_or_else(|| Arc::new(OsFileSystem));
    let project_root = if project_root.is_absolute() {
      normalize_path(project_root)
    } else {
      normalize_path(&fs.cwd()?.join(project_root))
    };

    Ok(Self {
      fs,
      options,
      project_root,
    })
  }

  /// Loads and validates the pipeline descriptor
  ///
  /// The mode comes from the options, then the config file, then `NODE_ENV`.
  pub fn descriptor(&self) -> anyhow::Result<PipelineDescriptor> {
    let (mut rc, source) = SitepackRcConfigLoader::new(self.fs.clone()).load(
      &self.project_root,
      LoadConfigOptions {
        config: self.options.config.as_deref(),
      },
    )?;

    let mode = self
      .options
      .mode
      .or(rc.mode)
      .unwrap_or_else(BuildMode::from_env);

    if let Some(dist_dir) = &self.options.dist_dir {
      rc.build.out_dir = dist_dir.clone();
    }

    tracing::info!(?source, %mode, "Loaded config");

    PipelineDescriptor::new(rc, mode, &self.project_root, &*self.fs)
  }

  pub fn build(&self) -> anyhow::Result<BuildResult> {
    let descriptor = self.descriptor()?;
    let plugins = ConfigPlugins::new(&descriptor, self.plugin_context(&descriptor))?;

    let mut outputs = Vec::new();
    for copy in plugins.copy() {
      outputs.extend(copy.run()?);
    }

    let prebundled = prebundle_dependencies(&descriptor, &plugins)?;

    tracing::info!(entry = %descriptor.entry.display(), "Bundling");
    let bundle = bundle(&descriptor, &plugins)?;

    for chunk in &bundle.chunks {
      outputs.push(OutputFile {
        path: chunk.output_path(),
        contents: chunk.code.clone().into_bytes(),
      });
    }

    if let Some(html) = self.render_html(&descriptor, &plugins, bundle.entry_chunk())? {
      outputs.push(html);
    }

    let mut result = BuildResult {
      mode: descriptor.mode,
      dist_dir: descriptor.dist_dir.clone(),
      chunks: bundle.chunks,
      externals: bundle.externals.into_iter().collect(),
      prebundled,
      commonjs: descriptor.commonjs.clone(),
      worker_format: descriptor.worker_format,
      files: outputs.iter().map(|output| output.path.clone()).collect(),
    };
    result.files.push(PathBuf::from(MANIFEST_PATH));

    outputs.push(OutputFile {
      path: PathBuf::from(MANIFEST_PATH),
      contents: serde_json::to_vec_pretty(&result)?,
    });

    self.write_outputs(&descriptor.dist_dir, &outputs)?;

    tracing::info!(
      dist_dir = %descriptor.dist_dir.display(),
      files = outputs.len(),
      "Build complete"
    );

    Ok(result)
  }

  /// True when `events` should trigger another build
  pub fn should_rebuild(&self, events: &WatchEvents) -> anyhow::Result<bool> {
    let descriptor = self.descriptor()?;
    Ok(should_rebuild(&descriptor, events))
  }

  fn plugin_context(&self, descriptor: &PipelineDescriptor) -> PluginContext {
    PluginContext {
      file_system: self.fs.clone(),
      options: Arc::new(PluginOptions {
        mode: descriptor.mode,
        project_root: descriptor.project_root.clone(),
      }),
    }
  }

  fn render_html(
    &self,
    descriptor: &PipelineDescriptor,
    plugins: &ConfigPlugins,
    entry_chunk: Option<&Chunk>,
  ) -> anyhow::Result<Option<OutputFile>> {
    if !self.fs.is_file(&descriptor.html_template) {
      tracing::warn!(
        template = %descriptor.html_template.display(),
        "No HTML template, skipping the HTML stage"
      );
      return Ok(None);
    }

    let code = self.fs.read_to_string(&descriptor.html_template)?;
    let asset = Asset::new(descriptor.html_template.clone(), code);

    let bundle_tags = entry_chunk
      .map(|chunk| {
        let src = format!("/{}", chunk.output_path().to_string_lossy().replace('\\', "/"));
        HtmlTag::new("script", InjectTo::Head)
          .with_attr("type", "module")
          .with_attr("src", &src)
      })
      .into_iter()
      .collect();

    let asset = plugins.html(bundle_tags).transform(asset)?.asset;

    let path = pathdiff::diff_paths(&descriptor.html_template, &descriptor.project_root)
      .filter(|path| !path.starts_with(".."))
      .unwrap_or_else(|| PathBuf::from("index.html"));

    Ok(Some(OutputFile {
      path,
      contents: asset.code.into_bytes(),
    }))
  }

  /// Replaces the output directory with `outputs`
  ///
  /// Nothing is written until every stage succeeded. A failed write removes the partial output.
  fn write_outputs(&self, dist_dir: &Path, outputs: &[OutputFile]) -> anyhow::Result<()> {
    if self.fs.is_dir(dist_dir) {
      tracing::debug!(dist_dir = %dist_dir.display(), "Removing previous output");
      self.fs.remove_directory(dist_dir)?;
    }

    let write = || -> std::io::Result<()> {
      self.fs.create_directory(dist_dir)?;
      for output in outputs {
        self.fs.write(&dist_dir.join(&output.path), &output.contents)?;
      }
      Ok(())
    };

    if let Err(error) = write() {
      remove_partial_output(&*self.fs, dist_dir);

      return Err(diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::Unknown)
        .message(format!(
          "Failed to write output to {}: {error}",
          dist_dir.display()
        ))));
    }

    Ok(())
  }
}

/// Returns whether `dist_dir` is gone afterwards
fn remove_partial_output(fs: &dyn FileSystem, dist_dir: &Path) -> bool {
  if !fs.is_dir(dist_dir) {
    return true;
  }

  match fs.remove_directory(dist_dir) {
    Ok(()) => true,
    Err(error) => {
      tracing::warn!(
        dist_dir = %dist_dir.display(),
        %error,
        "Failed to remove partial output"
      );
      false
    }
  }
}

#[cfg(test)]
mod tests;

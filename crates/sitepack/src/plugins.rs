use std::path::Path;

use sitepack_config::PipelineDescriptor;
use sitepack_config::PluginConfig;
use sitepack_core::diagnostic::CodeFrame;
use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_core::plugin::PluginContext;
use sitepack_core::plugin::ResolverPlugin;
use sitepack_core::plugin::TransformerPlugin;
use sitepack_core::types::Asset;
use sitepack_core::types::HtmlTag;
use sitepack_plugin_copy::CopyPlugin;
use sitepack_plugin_resolver::ResolverOptions;
use sitepack_plugin_resolver::SitepackResolver;
use sitepack_plugin_transformer_html::HtmlTransformer;
use sitepack_plugin_transformer_replace::ReplaceTransformer;

/// The stages of a pipeline, instantiated from its descriptor
#[derive(Debug)]
pub struct ConfigPlugins {
  ctx: PluginContext,
  copy: Vec<CopyPlugin>,
  html_tags: Vec<HtmlTag>,
  resolver: Box<dyn ResolverPlugin>,
  transformers: Vec<Box<dyn TransformerPlugin>>,
}

impl ConfigPlugins {
  pub fn new(descriptor: &PipelineDescriptor, ctx: PluginContext) -> anyhow::Result<Self> {
    let mut copy = Vec::new();
    let mut html_tags = Vec::new();
    let mut transformers: Vec<Box<dyn TransformerPlugin>> = Vec::new();

    for plugin in &descriptor.plugins {
      match plugin {
        PluginConfig::Copy(targets) => copy.push(CopyPlugin::new(&ctx, targets.clone())),
        PluginConfig::Replace(table) => {
          transformers.push(Box::new(ReplaceTransformer::new(table.clone())?));
        }
        PluginConfig::Html(tags) => html_tags.extend(tags.iter().cloned()),
        PluginConfig::NodeResolve => {}
      }
    }

    let resolver = SitepackResolver::new(
      &ctx,
      ResolverOptions {
        alias: descriptor.alias.clone(),
        external: descriptor.external.clone(),
        node_resolution: descriptor.node_resolution(),
      },
    );

    Ok(Self {
      ctx,
      copy,
      html_tags,
      resolver: Box::new(resolver),
      transformers,
    })
  }

  pub fn copy(&self) -> &[CopyPlugin] {
    &self.copy
  }

  pub fn resolver(&self) -> &dyn ResolverPlugin {
    self.resolver.as_ref()
  }

  /// The HTML stage, with `extra_tags` injected after the configured ones
  pub fn html(&self, extra_tags: Vec<HtmlTag>) -> HtmlTransformer {
    let mut tags = self.html_tags.clone();
    tags.extend(extra_tags);
    HtmlTransformer::new(tags)
  }

  /// Reads a module and runs it through every transformer in plugin order
  pub fn load(&self, path: &Path) -> anyhow::Result<Asset> {
    let code = self.ctx.file_system.read_to_string(path).map_err(|error| {
      diagnostic_error!(DiagnosticBuilder::default()
        .kind(ErrorKind::NotFound)
        .message(format!("Unable to read {}: {error}", path.display()))
        .code_frames(vec![CodeFrame::from(path.to_path_buf())]))
    })?;

    let mut asset = Asset::new(path.to_path_buf(), code);
    for transformer in &self.transformers {
      asset = transformer.transform(asset)?.asset;
    }

    Ok(asset)
  }
}

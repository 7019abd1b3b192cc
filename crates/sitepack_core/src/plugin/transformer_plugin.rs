use std::fmt::Debug;

use crate::types::Asset;

#[derive(Debug, PartialEq)]
pub struct TransformResult {
  pub asset: Asset,
}

/// Rewrites the contents of a single asset
///
/// Transformers receive every asset and leave the ones they do not handle unchanged.
pub trait TransformerPlugin: Debug + Send + Sync {
  fn transform(&self, input: Asset) -> Result<TransformResult, anyhow::Error>;
}

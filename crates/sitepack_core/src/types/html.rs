use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Where a tag is inserted into the HTML shell
#[derive(Clone, Copy, Debug, Default, Deserialize, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectTo {
  /// Last child of `<head>`
  Head,
  /// First child of `<head>`
  HeadPrepend,
  /// Last child of `<body>`
  #[default]
  Body,
  /// First child of `<body>`
  BodyPrepend,
}

impl InjectTo {
  pub fn is_head(&self) -> bool {
    matches!(self, InjectTo::Head | InjectTo::HeadPrepend)
  }

  pub fn is_prepend(&self) -> bool {
    matches!(self, InjectTo::HeadPrepend | InjectTo::BodyPrepend)
  }
}

/// An element inserted into the HTML shell
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlTag {
  #[serde(default)]
  pub inject_to: InjectTo,
  pub tag: String,
  #[serde(default)]
  pub attrs: IndexMap<String, String>,
  /// Text content of the element
  #[serde(default)]
  pub children: Option<String>,
}

impl HtmlTag {
  pub fn new(tag: &str, inject_to: InjectTo) -> Self {
    Self {
      inject_to,
      tag: tag.to_string(),
      ..HtmlTag::default()
    }
  }

  pub fn with_attr(mut self, name: &str, value: &str) -> Self {
    self.attrs.insert(name.to_string(), value.to_string());
    self
  }
}

use std::io::BufReader;

use anyhow::Error;
use html5ever::serialize;
use html5ever::serialize::SerializeOpts;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::RcDom;
use markup5ever_rcdom::SerializableHandle;
use sitepack_core::plugin::TransformResult;
use sitepack_core::plugin::TransformerPlugin;
use sitepack_core::types::Asset;
use sitepack_core::types::FileType;
use sitepack_core::types::HtmlTag;

use crate::dom_visitor::walk;
use crate::tag_injection_visitor::TagInjectionVisitor;

/// Injects configured tags into the HTML shell
#[derive(Debug)]
pub struct HtmlTransformer {
  tags: Vec<HtmlTag>,
}

impl HtmlTransformer {
  pub fn new(tags: Vec<HtmlTag>) -> Self {
    HtmlTransformer { tags }
  }
}

impl TransformerPlugin for HtmlTransformer {
  fn transform(&self, input: Asset) -> Result<TransformResult, Error> {
    if input.file_type != FileType::Html {
      return Ok(TransformResult { asset: input });
    }

    let mut dom = parse_html(input.code.as_bytes())?;
    run_html_transformations(&self.tags, &mut dom);

    let code = String::from_utf8(serialize_html(dom)?)?;

    tracing::debug!(
      path = %input.file_path.display(),
      tags = self.tags.len(),
      "Injected HTML tags"
    );

    Ok(TransformResult {
      asset: Asset { code, ..input },
    })
  }
}

fn serialize_html(dom: RcDom) -> Result<Vec<u8>, Error> {
  let document: SerializableHandle = dom.document.clone().into();
  let mut output_bytes = vec![];
  let options = SerializeOpts::default();
  serialize(&mut output_bytes, &document, options)?;
  Ok(output_bytes)
}

fn parse_html(bytes: &[u8]) -> Result<RcDom, Error> {
  let mut bytes = BufReader::new(bytes);
  let options = ParseOpts::default();
  let dom = RcDom::default();
  let dom = html5ever::parse_document(dom, options)
    .from_utf8()
    .read_from(&mut bytes)?;
  Ok(dom)
}

/// Note that html5ever rc-dom uses interior mutability, so the document is
/// changed in place.
fn run_html_transformations(tags: &[HtmlTag], dom: &mut RcDom) {
  let mut visitor = TagInjectionVisitor::default();
  walk(dom.document.clone(), &mut visitor);
  visitor.inject(tags);
}

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use html5ever::namespace_url;
use markup5ever::expanded_name;
use markup5ever::local_name;
use markup5ever::ns;
use markup5ever::LocalName;
use markup5ever::QualName;
use markup5ever_rcdom::Handle;
use markup5ever_rcdom::Node;
use markup5ever_rcdom::NodeData;
use sitepack_core::types::HtmlTag;

use crate::attrs::Attrs;
use crate::dom_visitor::DomTraversalOperation;
use crate::dom_visitor::DomVisitor;

/// Finds the insertion points of a document and the ids already in use
#[derive(Default)]
pub struct TagInjectionVisitor {
  pub head: Option<Handle>,
  pub body: Option<Handle>,
  pub ids: HashSet<String>,
}

impl DomVisitor for TagInjectionVisitor {
  fn visit_node(&mut self, node: Handle) -> DomTraversalOperation {
    if let NodeData::Element { name, attrs, .. } = &node.data {
      if name.expanded() == expanded_name!(html "head") && self.head.is_none() {
        self.head = Some(node.clone());
      } else if name.expanded() == expanded_name!(html "body") && self.body.is_none() {
        self.body = Some(node.clone());
      }

      let mut attrs = attrs.borrow_mut();
      if let Some(id) = Attrs::new(&mut attrs).get(expanded_name!("", "id")) {
        self.ids.insert(id.to_string());
      }
    }

    DomTraversalOperation::Continue
  }
}

impl TagInjectionVisitor {
  /// Inserts `tags` at their insertion points
  ///
  /// Prepended tags keep their relative order, so the first prepended tag ends up first.
  pub fn inject(&self, tags: &[HtmlTag]) {
    let mut prepended_to_head = 0;
    let mut prepended_to_body = 0;

    for tag in tags {
      let parent = if tag.inject_to.is_head() {
        &self.head
      } else {
        &self.body
      };

      let Some(parent) = parent else {
        tracing::warn!(tag = %tag.tag, "Document has no insertion point for tag");
        continue;
      };

      if let Some(id) = tag.attrs.get("id") {
        if self.ids.contains(id) {
          tracing::warn!(id = %id, "Injecting a tag whose id is already used in the document");
        }
      }

      let node = create_element(tag);
      node.parent.set(Some(Rc::downgrade(parent)));

      let mut children = parent.children.borrow_mut();
      if tag.inject_to.is_prepend() {
        let index = if tag.inject_to.is_head() {
          &mut prepended_to_head
        } else {
          &mut prepended_to_body
        };
        children.insert(*index, node);
        *index += 1;
      } else {
        children.push(node);
      }
    }
  }
}

fn create_element(tag: &HtmlTag) -> Handle {
  let mut attributes = vec![];
  {
    let mut attrs = Attrs::new(&mut attributes);
    for (name, value) in &tag.attrs {
      attrs.set(name, value);
    }
  }

  let element = Node::new(NodeData::Element {
    name: QualName::new(None, ns!(html), LocalName::from(tag.tag.as_str())),
    attrs: RefCell::new(attributes),
    template_contents: RefCell::new(None),
    mathml_annotation_xml_integration_point: false,
  });

  if let Some(children) = tag.children.as_deref() {
    let text = Node::new(NodeData::Text {
      contents: RefCell::new(children.into()),
    });
    text.parent.set(Some(Rc::downgrade(&element)));
    element.children.borrow_mut().push(text);
  }

  element
}

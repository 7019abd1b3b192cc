use html5ever::namespace_url;
use html5ever::tendril::fmt::UTF8;
use markup5ever::ns;
use markup5ever::tendril::Tendril;
use markup5ever::Attribute;
use markup5ever::ExpandedName;
use markup5ever::LocalName;
use markup5ever::QualName;

pub struct Attrs<'a> {
  attributes: &'a mut Vec<Attribute>,
}

impl<'a> Attrs<'a> {
  pub fn new(attributes: &'a mut Vec<Attribute>) -> Self {
    Self { attributes }
  }

  pub fn get(&self, name: ExpandedName<'_>) -> Option<&Tendril<UTF8>> {
    self
      .attributes
      .iter()
      .find(|attr| attr.name.expanded() == name)
      .map(|attr| &attr.value)
  }

  /// Sets an attribute without a namespace, as written in an HTML document
  pub fn set(&mut self, name: &str, value: &str) {
    if let Some(attribute) = self
      .attributes
      .iter_mut()
      .find(|attr| attr.name.ns.is_empty() && &*attr.name.local == name)
    {
      attribute.value = value.into();
    } else {
      self.attributes.push(Attribute {
        name: QualName::new(None, ns!(), LocalName::from(name)),
        value: value.into(),
      });
    }
  }
}

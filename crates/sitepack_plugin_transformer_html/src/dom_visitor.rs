use markup5ever_rcdom::Handle;

#[derive(PartialEq, Eq)]
pub enum DomTraversalOperation {
  Continue,
  Stop,
}

pub trait DomVisitor {
  fn visit_node(&mut self, node: Handle) -> DomTraversalOperation;
}

/// Visits every node depth-first until the visitor asks to stop
pub fn walk(node: Handle, visitor: &mut impl DomVisitor) {
  let mut queue = vec![node];
  while let Some(node) = queue.pop() {
    let operation = visitor.visit_node(node.clone());
    if operation == DomTraversalOperation::Stop {
      break;
    }

    let children = node.children.borrow();
    for child in children.iter().rev() {
      queue.push(child.clone());
    }
  }
}

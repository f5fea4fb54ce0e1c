use super::{Element, Node};

/// Name of the element holding named-color declarations.
pub const RESOURCES_ELEMENT: &str = "resources";

/// One parsed layout document (storyboard or xib).
///
/// `nodes` are the top-level nodes in source order: the XML declaration,
/// any comments, and exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(Node::as_element)
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(Node::as_element_mut)
    }

    /// The resource table (`<resources>` under the root), if present.
    pub fn resources(&self) -> Option<&Element> {
        self.root()?
            .child_elements()
            .find(|e| e.name == RESOURCES_ELEMENT)
    }

    pub fn resources_mut(&mut self) -> Option<&mut Element> {
        self.root_mut()?.find_child_mut(RESOURCES_ELEMENT)
    }

    /// The resource table, appended to the root first when missing.
    ///
    /// Returns `None` only for a document without a root element.
    pub fn resources_or_insert(&mut self) -> Option<&mut Element> {
        let root = self.root_mut()?;
        if !root.child_elements().any(|e| e.name == RESOURCES_ELEMENT) {
            root.push_child(Element::new(RESOURCES_ELEMENT));
        }
        root.find_child_mut(RESOURCES_ELEMENT)
    }
}

//! Synthetic in-memory element tree.

use std::rc::Rc;

use super::DomNode;

/// An element built in code rather than parsed from markup.
///
/// Children are reference-counted so walking the tree is cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Rc<MemoryNode>>,
}

impl MemoryNode {
    /// New element with the given tag name (stored lowercase).
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an earlier value of the same name.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        self.attributes.retain(|(n, _)| *n != name);
        self.attributes.push((name, value.to_string()));
        self
    }

    /// Sets the element's own text, rendered before any children.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: MemoryNode) -> Self {
        self.children.push(Rc::new(child));
        self
    }

    pub fn with_children(mut self, children: Vec<MemoryNode>) -> Self {
        self.children.extend(children.into_iter().map(Rc::new));
        self
    }
}

impl DomNode for MemoryNode {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    fn element_children(&self) -> Vec<Self> {
        self.children.iter().map(|c| c.as_ref().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_includes_descendants() {
        let node = MemoryNode::element("P")
            .with_text("Hello ")
            .with_child(MemoryNode::element("b").with_text("world"));
        assert_eq!(node.tag_name(), "p");
        assert_eq!(node.text_content(), "Hello world");
    }

    #[test]
    fn test_with_attr_replaces_existing() {
        let node = MemoryNode::element("img")
            .with_attr("alt", "first")
            .with_attr("ALT", "second");
        assert_eq!(node.attribute("alt"), Some("second"));
    }
}

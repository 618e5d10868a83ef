//! Minimal DOM capability interface.
//!
//! Extraction code never talks to an HTML parser directly. It is generic over
//! [`DomNode`], which offers just enough to walk a tree: tag name, attribute
//! lookup, text content and child elements. Two implementations exist:
//!
//! - `scraper::ElementRef`, for documents parsed from real markup
//! - [`MemoryNode`], a synthetic in-memory tree for tests

mod html;
mod memory;

pub use html::{parse_html, HtmlDocument};
pub use memory::MemoryNode;

/// Read-only view of an element in a document tree.
pub trait DomNode: Clone {
    /// Lowercase local tag name (`"script"`, `"meta"`, ...).
    fn tag_name(&self) -> &str;

    /// Raw attribute value, if the attribute is present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text of this element and all of its descendants.
    fn text_content(&self) -> String;

    /// Direct element children, in document order.
    fn element_children(&self) -> Vec<Self>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Whether the tag name matches, ignoring ASCII case.
    fn is_tag(&self, name: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(name)
    }

    /// All descendant elements in document (pre-)order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// Descendant elements matching `predicate`, in document order.
    fn find_all<F>(&self, predicate: F) -> Vec<Self>
    where
        F: Fn(&Self) -> bool,
    {
        self.descendants()
            .into_iter()
            .filter(|node| predicate(node))
            .collect()
    }

    /// First descendant matching `predicate`.
    fn find_first<F>(&self, predicate: F) -> Option<Self>
    where
        F: Fn(&Self) -> bool,
    {
        self.descendants().into_iter().find(|node| predicate(node))
    }
}

fn collect_descendants<N: DomNode>(node: &N, out: &mut Vec<N>) {
    for child in node.element_children() {
        out.push(child.clone());
        collect_descendants(&child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryNode {
        MemoryNode::element("html").with_children(vec![
            MemoryNode::element("head").with_children(vec![
                MemoryNode::element("title").with_text("Hello"),
                MemoryNode::element("meta")
                    .with_attr("name", "description")
                    .with_attr("content", "A page"),
            ]),
            MemoryNode::element("body").with_children(vec![
                MemoryNode::element("h1").with_text("One"),
                MemoryNode::element("div")
                    .with_children(vec![MemoryNode::element("h1").with_text("Two")]),
            ]),
        ])
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let root = sample();
        let tags: Vec<String> = root
            .descendants()
            .iter()
            .map(|n| n.tag_name().to_string())
            .collect();
        assert_eq!(tags, vec!["head", "title", "meta", "body", "h1", "div", "h1"]);
    }

    #[test]
    fn test_find_all_by_predicate() {
        let root = sample();
        let h1s = root.find_all(|n| n.is_tag("h1"));
        let texts: Vec<String> = h1s.iter().map(|n| n.text_content()).collect();
        assert_eq!(texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_find_first_and_attributes() {
        let root = sample();
        let meta = root
            .find_first(|n| n.is_tag("meta") && n.attribute("name") == Some("description"))
            .expect("meta description present");
        assert_eq!(meta.attribute("content"), Some("A page"));
        assert!(meta.has_attribute("name"));
        assert!(!meta.has_attribute("charset"));
    }

    #[test]
    fn test_memory_and_html_trees_agree() {
        let html = r#"<html><head><title>Hello</title></head>
            <body><h1>One</h1><div><h1>Two</h1></div></body></html>"#;
        let document = parse_html(html);
        let parsed: Vec<String> = document
            .root()
            .find_all(|n| n.is_tag("h1"))
            .iter()
            .map(|n| n.text_content())
            .collect();
        let synthetic: Vec<String> = sample()
            .find_all(|n| n.is_tag("h1"))
            .iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(parsed, synthetic);
    }
}

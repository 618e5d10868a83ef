//! `DomNode` backed by the `scraper` HTML parser.

use scraper::{ElementRef, Html};

use super::DomNode;

/// An owned, parsed HTML document.
///
/// `scraper::Html` is not `Send`, so documents are parsed after the body has
/// been fetched and dropped before the next `.await`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// The `<html>` root element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Parse errors reported by html5ever (the document is still usable).
    pub fn parse_errors(&self) -> usize {
        self.html.errors.len()
    }
}

/// Parses a full HTML document. Never fails; malformed markup is recovered.
pub fn parse_html(markup: &str) -> HtmlDocument {
    let html = Html::parse_document(markup);
    if !html.errors.is_empty() {
        log::trace!("html5ever reported {} parse errors", html.errors.len());
    }
    HtmlDocument { html }
}

impl<'a> DomNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn element_children(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }
}

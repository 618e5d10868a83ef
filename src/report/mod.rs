//! Report rendering.
//!
//! JSON is the serde representation of a result. Text and HTML share one
//! intermediate model: every result type describes itself as a title, a
//! summary of key/value pairs and a list of [`Section`]s.

mod csv;
mod html;
mod sections;
mod text;

pub use self::csv::{render_bulk_csv, render_meta_csv};
pub use html::render_html;
pub use text::render_text;

use serde::Serialize;

use crate::config::OutputFormat;

/// Severity of a section's items, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Info,
    Error,
    Warning,
    Recommendation,
}

impl SectionKind {
    fn css_class(&self) -> &'static str {
        match self {
            SectionKind::Info => "info",
            SectionKind::Error => "error",
            SectionKind::Warning => "warning",
            SectionKind::Recommendation => "recommendation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub kind: SectionKind,
    pub items: Vec<String>,
    /// Show at most this many items, followed by an "and N more" line
    pub limit: Option<usize>,
}

impl Section {
    pub fn new(heading: impl Into<String>, kind: SectionKind, items: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            kind,
            items,
            limit: None,
        }
    }

    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Items to display and the number hidden by the limit.
    pub fn visible_items(&self) -> (&[String], usize) {
        match self.limit {
            Some(limit) if self.items.len() > limit => {
                (&self.items[..limit], self.items.len() - limit)
            }
            _ => (&self.items, 0),
        }
    }
}

/// A result that can be rendered as a text or HTML report.
pub trait Renderable: Serialize {
    fn title(&self) -> String;

    fn summary(&self) -> Vec<(&'static str, String)>;

    /// Non-empty sections only; empty lists are skipped by the renderers anyway.
    fn sections(&self) -> Vec<Section>;
}

/// Pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Renders `value` in `format`. CSV is handled by the table renderers and is
/// not accepted here.
///
/// # Errors
///
/// Returns an error if JSON serialization fails or `format` is CSV.
pub fn render<T: Renderable>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(render_json(value)?),
        OutputFormat::Text => Ok(render_text(value)),
        OutputFormat::Html => Ok(render_html(value)),
        OutputFormat::Csv => anyhow::bail!("CSV output is only available for meta and bulk reports"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_items() {
        let items: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let section = Section::new("ERRORS", SectionKind::Error, items).limited(10);
        let (shown, hidden) = section.visible_items();
        assert_eq!(shown.len(), 10);
        assert_eq!(hidden, 2);

        let section = Section::new("INFO", SectionKind::Info, vec!["a".to_string()]).limited(10);
        assert_eq!(section.visible_items().1, 0);
    }
}

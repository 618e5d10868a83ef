//! Meta/content audit result types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error_handling::AuditStatus;

/// Known meta values; absent tags serialise as `null`.
///
/// Open Graph and Twitter Card tags are flattened in under their own keys
/// (`"og:title"`, `"twitter:card"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
    pub viewport: Option<String>,
    pub charset: Option<String>,
    #[serde(flatten)]
    pub open_graph: BTreeMap<String, String>,
    #[serde(flatten)]
    pub twitter: BTreeMap<String, String>,
}

/// Heading texts by level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Mutable list for `level` (1..=6).
    pub(crate) fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageInfo {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl ImageInfo {
    /// Alt text present and not blank.
    pub fn has_alt(&self) -> bool {
        self.alt.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    pub images: Vec<ImageInfo>,
}

impl ImageSummary {
    pub fn missing_dimensions(&self) -> usize {
        self.images.iter().filter(|i| !i.has_dimensions()).count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub internal: usize,
    pub external: usize,
    pub total: usize,
    /// External links with neither `rel="nofollow"` nor `rel="noopener"`.
    pub external_without_rel: usize,
}

/// Everything harvested from one document before scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSignals {
    pub meta: MetaTags,
    pub headings: Headings,
    pub images: ImageSummary,
    pub links: LinkSummary,
}

/// Issues, warnings and the deduction-based score for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assessment {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    /// Starts at 100 and is not clamped.
    pub score: i32,
}

/// Meta/content audit of one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAuditResult {
    pub url: String,
    pub timestamp: String,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub meta: MetaTags,
    pub headings: Headings,
    pub images: ImageSummary,
    pub links: LinkSummary,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub score: i32,
}

impl MetaAuditResult {
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: AuditStatus::Error,
            error: Some(error.into()),
            meta: MetaTags::default(),
            headings: Headings::default(),
            images: ImageSummary::default(),
            links: LinkSummary::default(),
            issues: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            score: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == AuditStatus::Error
    }
}

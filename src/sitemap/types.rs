//! Sitemap document and report types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error_handling::AuditStatus;

/// Root element of a sitemap document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SitemapKind {
    #[default]
    Unknown,
    /// `<urlset>`
    UrlSitemap,
    /// `<sitemapindex>`
    SitemapIndex,
}

impl SitemapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SitemapKind::Unknown => "unknown",
            SitemapKind::UrlSitemap => "url_sitemap",
            SitemapKind::SitemapIndex => "sitemap_index",
        }
    }
}

/// One `<url>` or `<sitemap>` element. Empty child elements are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSitemap {
    pub kind: SitemapKind,
    pub entries: Vec<SitemapEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SitemapIssues {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapStats {
    pub total_urls: usize,
    /// Only set for sitemap indexes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_sitemaps: Option<usize>,
    pub with_lastmod: usize,
    pub with_changefreq: usize,
    pub with_priority: usize,
    pub duplicate_urls: usize,
    pub invalid_urls: usize,
    pub lastmod_percentage: f64,
    pub changefreq_percentage: f64,
    pub priority_percentage: f64,
    /// HEAD status histogram of the checked URLs
    pub status_codes: BTreeMap<u16, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapReport {
    pub url: String,
    pub timestamp: String,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub kind: SitemapKind,
    pub urls_count: usize,
    pub issues: SitemapIssues,
    pub stats: SitemapStats,
    pub recommendations: Vec<String>,
}

impl SitemapReport {
    pub(crate) fn new(url: &str, kind: SitemapKind) -> Self {
        Self {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: AuditStatus::Completed,
            error: None,
            kind,
            urls_count: 0,
            issues: SitemapIssues::default(),
            stats: SitemapStats::default(),
            recommendations: Vec::new(),
        }
    }

    /// Error-shaped report; the message is also recorded as the single error issue.
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        let error = error.into();
        let mut report = Self::new(url, SitemapKind::Unknown);
        report.status = AuditStatus::Error;
        report.issues.errors.push(error.clone());
        report.error = Some(error);
        report.recommendations = super::analyze::recommendations(&report);
        report
    }

    pub fn is_error(&self) -> bool {
        self.status == AuditStatus::Error
    }
}

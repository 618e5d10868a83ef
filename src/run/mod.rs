//! Bulk processing of URL lists.
//!
//! URLs are audited strictly one after another with a courtesy delay in
//! between. A failed URL becomes an error entry and the run moves on.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{info, warn};
use serde::Serialize;

use crate::audit::SeoAuditor;
use crate::dom::parse_html;
use crate::error_handling::ProcessingStats;
use crate::meta::{self, MetaAuditResult};
use crate::mobile::{self, MobileReport};
use crate::performance::{PerformanceReport, Strategy};
use crate::structured::{self, AuditResult};

/// Analysis selectable for each URL of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BulkCheck {
    Schema,
    Meta,
    Mobile,
    Performance,
}

/// Results for one URL of a bulk run. Unselected checks are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEntry {
    pub url: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<AuditResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaAuditResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<MobileReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkEntry {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of a bulk run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReport {
    pub total_urls: usize,
    pub successful: usize,
    pub failed: usize,
    pub elapsed_seconds: f64,
    /// Failure counts by category, e.g. `"Not Found (404)": 2`
    pub failures_by_type: BTreeMap<String, usize>,
    pub entries: Vec<BulkEntry>,
    #[serde(skip)]
    pub stats: ProcessingStats,
}

/// Reads a URL list: one URL per line, blank lines and `#` comments skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read URL list: {}", path.display()))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    info!("Total URLs in file: {}", urls.len());
    Ok(urls)
}

/// Audits `urls` in order, sleeping `delay` between consecutive URLs.
pub async fn run_bulk(
    auditor: &SeoAuditor,
    urls: &[String],
    checks: &[BulkCheck],
    delay: Duration,
) -> BulkReport {
    let start_time = Instant::now();
    let mut stats = ProcessingStats::new();
    let mut entries = Vec::with_capacity(urls.len());

    for (i, url) in urls.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        info!("[{}/{}] Analyzing {}", i + 1, urls.len(), url);

        let entry = audit_one(auditor, url, checks, &mut stats).await;
        entries.push(entry);
    }

    let failed = entries.iter().filter(|e| e.is_error()).count();
    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    info!(
        "Processed {} URLs in {:.2} seconds ({} failed)",
        entries.len(),
        elapsed_seconds,
        failed
    );

    BulkReport {
        total_urls: urls.len(),
        successful: entries.len() - failed,
        failed,
        elapsed_seconds,
        failures_by_type: stats
            .summary()
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count))
            .collect(),
        entries,
        stats,
    }
}

async fn audit_one(
    auditor: &SeoAuditor,
    url: &str,
    checks: &[BulkCheck],
    stats: &mut ProcessingStats,
) -> BulkEntry {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let wants_page = checks
        .iter()
        .any(|c| matches!(c, BulkCheck::Schema | BulkCheck::Meta));

    let mut entry = BulkEntry {
        url: url.to_string(),
        timestamp,
        schema: None,
        meta: None,
        mobile: None,
        performance: None,
        error: None,
    };

    if wants_page {
        match auditor.fetch(url).await {
            Ok(page) => {
                let document = parse_html(&page.body);
                let root = document.root();
                if checks.contains(&BulkCheck::Schema) {
                    entry.schema = Some(structured::analyze_document(&page.final_url, &root));
                }
                if checks.contains(&BulkCheck::Meta) {
                    entry.meta = Some(meta::analyze_document(&page.final_url, &root));
                }
            }
            Err(e) => {
                warn!("Failed to audit {}: {}", url, e);
                stats.increment_error(e.error_type());
                let message = e.to_string();
                if checks.contains(&BulkCheck::Schema) {
                    entry.schema = Some(AuditResult::failed(url, message.clone()));
                }
                if checks.contains(&BulkCheck::Meta) {
                    entry.meta = Some(MetaAuditResult::failed(url, message.clone()));
                }
                entry.error = Some(message);
                return entry;
            }
        }
    }

    if checks.contains(&BulkCheck::Mobile) {
        match auditor.fetch_mobile(url).await {
            Ok(page) => {
                let document = parse_html(&page.body);
                entry.mobile = Some(mobile::analyze_document(&page.final_url, &document.root()));
            }
            Err(e) => {
                warn!("Failed mobile check for {}: {}", url, e);
                stats.increment_error(e.error_type());
                let message = e.to_string();
                entry.mobile = Some(MobileReport::failed(url, message.clone()));
                entry.error.get_or_insert(message);
            }
        }
    }

    if checks.contains(&BulkCheck::Performance) {
        let report = auditor.performance(url, Strategy::Mobile).await;
        if let Some(error) = report.error.clone() {
            entry.error.get_or_insert(error);
        }
        entry.performance = Some(report);
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_read_url_list_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# targets").expect("write");
        writeln!(file, "https://example.com/").expect("write");
        writeln!(file).expect("write");
        writeln!(file, "   example.org  ").expect("write");
        writeln!(file, "  # indented comment").expect("write");

        let urls = read_url_list(file.path()).await.expect("readable");
        assert_eq!(urls, vec!["https://example.com/", "example.org"]);
    }

    #[tokio::test]
    async fn test_read_url_list_missing_file() {
        let err = read_url_list(Path::new("/nonexistent/urls.txt"))
            .await
            .expect_err("missing file");
        assert!(err.to_string().contains("Failed to read URL list"));
    }

    #[tokio::test]
    async fn test_invalid_url_does_not_stop_the_run() {
        let auditor = SeoAuditor::new(crate::config::Config::default()).expect("client builds");
        let urls = vec!["ftp://bad.example".to_string(), "http://".to_string()];
        let report = run_bulk(&auditor, &urls, &[BulkCheck::Meta], Duration::ZERO).await;

        assert_eq!(report.total_urls, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.entries.len(), 2);
        assert!(report.entries.iter().all(|e| e.schema.is_none()));
        assert!(report.entries[0]
            .meta
            .as_ref()
            .is_some_and(MetaAuditResult::is_error));
        assert_eq!(report.failures_by_type.get("Invalid URL"), Some(&2));
    }

    #[tokio::test]
    async fn test_mobile_only_run_records_failures() {
        let auditor = SeoAuditor::new(crate::config::Config::default()).expect("client builds");
        let urls = vec!["mailto:someone@example.com".to_string()];
        let report = run_bulk(&auditor, &urls, &[BulkCheck::Mobile], Duration::ZERO).await;

        assert_eq!(report.failed, 1);
        let entry = &report.entries[0];
        assert!(entry.meta.is_none());
        assert!(entry.mobile.as_ref().is_some_and(MobileReport::is_error));
        assert!(entry.error.as_deref().is_some_and(|e| e.contains("unsupported scheme")));
        assert_eq!(report.failures_by_type.get("Invalid URL"), Some(&1));
    }
}

//! `Renderable` implementations for every result type.

use super::{Renderable, Section, SectionKind};
use crate::audit::FullAudit;
use crate::meta::MetaAuditResult;
use crate::mobile::MobileReport;
use crate::performance::{MetricResult, PerformanceReport};
use crate::run::BulkReport;
use crate::sitemap::SitemapReport;
use crate::structured::AuditResult;

/// Sitemap issue lists can hold thousands of entries
const SITEMAP_ISSUE_LIMIT: usize = 10;

fn push_error(summary: &mut Vec<(&'static str, String)>, error: Option<&String>) {
    if let Some(error) = error {
        summary.push(("Error", error.clone()));
    }
}

fn prefixed(prefix: &str, sections: Vec<Section>) -> Vec<Section> {
    sections
        .into_iter()
        .map(|mut s| {
            s.heading = format!("{prefix} {}", s.heading);
            s
        })
        .collect()
}

impl Renderable for AuditResult {
    fn title(&self) -> String {
        "STRUCTURED DATA AUDIT REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("URL", self.url.clone()),
            ("Timestamp", self.timestamp.clone()),
            ("Status", self.status.as_str().to_string()),
        ];
        push_error(&mut summary, self.error.as_ref());
        if let Some(page_type) = self.page_type {
            summary.push(("Page Type", page_type.as_str().to_string()));
        }
        summary.extend([
            ("Score", format!("{}/100", self.score)),
            ("Schemas Found", self.schemas.len().to_string()),
            ("Critical Issues", self.issues.critical.to_string()),
            ("Warnings", self.issues.warnings.to_string()),
            ("Passed", self.issues.passed.to_string()),
        ]);
        summary
    }

    fn sections(&self) -> Vec<Section> {
        vec![
            Section::new(
                "SCHEMAS",
                SectionKind::Info,
                self.schemas
                    .iter()
                    .map(|s| format!("{} ({})", s.schema_type, s.format.as_str()))
                    .collect(),
            ),
            Section::new("ERRORS", SectionKind::Error, self.validation.errors.clone()),
            Section::new("WARNINGS", SectionKind::Warning, self.validation.warnings.clone()),
            Section::new(
                "RECOMMENDATIONS",
                SectionKind::Recommendation,
                self.recommendations.clone(),
            ),
        ]
    }
}

impl Renderable for MetaAuditResult {
    fn title(&self) -> String {
        "META TAG AUDIT REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("URL", self.url.clone()),
            ("Timestamp", self.timestamp.clone()),
            ("Status", self.status.as_str().to_string()),
        ];
        push_error(&mut summary, self.error.as_ref());
        let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| "(missing)".to_string());
        summary.extend([
            ("Score", self.score.to_string()),
            ("Title", or_missing(&self.meta.title)),
            ("Description", or_missing(&self.meta.description)),
            ("Canonical", or_missing(&self.meta.canonical)),
            ("H1 Count", self.headings.h1.len().to_string()),
            (
                "Images",
                format!(
                    "{} total, {} without alt",
                    self.images.total, self.images.without_alt
                ),
            ),
            (
                "Links",
                format!(
                    "{} internal, {} external",
                    self.links.internal, self.links.external
                ),
            ),
        ]);
        summary
    }

    fn sections(&self) -> Vec<Section> {
        vec![
            Section::new("ISSUES", SectionKind::Error, self.issues.clone()),
            Section::new("WARNINGS", SectionKind::Warning, self.warnings.clone()),
            Section::new(
                "RECOMMENDATIONS",
                SectionKind::Recommendation,
                self.recommendations.clone(),
            ),
        ]
    }
}

impl Renderable for SitemapReport {
    fn title(&self) -> String {
        "SITEMAP ANALYSIS REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("URL", self.url.clone()),
            ("Type", self.kind.as_str().to_string()),
            ("Total URLs", self.urls_count.to_string()),
            ("Status", self.status.as_str().to_string()),
            ("Timestamp", self.timestamp.clone()),
        ];
        push_error(&mut summary, self.error.as_ref());
        summary
    }

    fn sections(&self) -> Vec<Section> {
        let stats = &self.stats;
        let mut lines = Vec::new();
        if let Some(children) = stats.child_sitemaps {
            lines.push(format!("Child sitemaps: {children}"));
        }
        if stats.total_urls > 0 {
            lines.extend([
                format!("Duplicate URLs: {}", stats.duplicate_urls),
                format!("Invalid URLs: {}", stats.invalid_urls),
                format!("URLs with lastmod: {}%", stats.lastmod_percentage),
                format!("URLs with changefreq: {}%", stats.changefreq_percentage),
                format!("URLs with priority: {}%", stats.priority_percentage),
            ]);
        }
        lines.extend(
            stats
                .status_codes
                .iter()
                .map(|(code, count)| format!("HTTP {code}: {count}")),
        );

        vec![
            Section::new("STATISTICS", SectionKind::Info, lines),
            Section::new("ERRORS", SectionKind::Error, self.issues.errors.clone())
                .limited(SITEMAP_ISSUE_LIMIT),
            Section::new("WARNINGS", SectionKind::Warning, self.issues.warnings.clone())
                .limited(SITEMAP_ISSUE_LIMIT),
            Section::new("INFO", SectionKind::Info, self.issues.info.clone()),
            Section::new(
                "RECOMMENDATIONS",
                SectionKind::Recommendation,
                self.recommendations.clone(),
            ),
        ]
    }
}

fn metric_line(name: &str, metric: &MetricResult) -> String {
    let shown = if metric.display_value.is_empty() {
        format!("{:.2}", metric.value)
    } else {
        metric.display_value.clone()
    };
    format!("{name}: {shown} ({})", metric.status.as_str())
}

impl Renderable for PerformanceReport {
    fn title(&self) -> String {
        "PERFORMANCE REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("URL", self.url.clone()),
            ("Strategy", self.strategy.as_str().to_string()),
            ("Timestamp", self.timestamp.clone()),
            ("Status", self.status.as_str().to_string()),
        ];
        push_error(&mut summary, self.error.as_ref());
        summary.push(("Score", format!("{}/100", self.score)));
        summary
    }

    fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::new();
        if !self.is_error() {
            let m = &self.metrics;
            sections.push(Section::new(
                "CORE WEB VITALS",
                SectionKind::Info,
                vec![
                    metric_line("LCP", &m.lcp),
                    metric_line("TBT", &m.fid),
                    metric_line("CLS", &m.cls),
                    metric_line("FCP", &m.fcp),
                    metric_line("TTFB", &m.ttfb),
                    metric_line("TTI", &m.tti),
                ],
            ));
        }
        if let Some(field) = &self.field_data {
            let mut lines = vec![format!("Overall: {}", field.overall_category)];
            lines.extend(
                field
                    .metrics
                    .iter()
                    .map(|(key, m)| format!("{key}: p75 {} ({})", m.p75, m.category)),
            );
            sections.push(Section::new("FIELD DATA", SectionKind::Info, lines));
        }
        sections.push(Section::new(
            "RECOMMENDATIONS",
            SectionKind::Recommendation,
            self.recommendations.clone(),
        ));
        sections
    }
}

impl Renderable for MobileReport {
    fn title(&self) -> String {
        "MOBILE-FRIENDLINESS REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("URL", self.url.clone()),
            ("Timestamp", self.timestamp.clone()),
            ("Status", self.status.as_str().to_string()),
        ];
        push_error(&mut summary, self.error.as_ref());
        if !self.is_error() {
            let yes_no = |b: bool| if b { "yes" } else { "no" }.to_string();
            summary.push(("Mobile Friendly", yes_no(self.mobile_friendly)));
            summary.push(("Score", format!("{}/100", self.score)));
            let viewport = if self.viewport.present {
                self.viewport.content.clone()
            } else {
                "(missing)".to_string()
            };
            summary.push(("Viewport", viewport));
        }
        summary
    }

    fn sections(&self) -> Vec<Section> {
        vec![
            Section::new("ISSUES", SectionKind::Error, self.issues.clone()),
            Section::new("WARNINGS", SectionKind::Warning, self.warnings.clone()),
            Section::new(
                "RECOMMENDATIONS",
                SectionKind::Recommendation,
                self.recommendations.clone(),
            ),
        ]
    }
}

impl Renderable for FullAudit {
    fn title(&self) -> String {
        "SEO AUDIT REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("URL", self.url.clone()),
            ("Timestamp", self.timestamp.clone()),
            ("Status", self.status.as_str().to_string()),
        ];
        push_error(&mut summary, self.error.as_ref());
        if !self.is_error() {
            summary.push(("Schema Score", format!("{}/100", self.schema.score)));
            summary.push(("Meta Score", self.meta.score.to_string()));
        }
        if let Some(performance) = &self.performance {
            summary.push(("Performance Score", format!("{}/100", performance.score)));
        }
        summary
    }

    fn sections(&self) -> Vec<Section> {
        let mut sections = prefixed("SCHEMA", self.schema.sections());
        sections.extend(prefixed("META", self.meta.sections()));
        if let Some(performance) = &self.performance {
            sections.extend(prefixed("PERFORMANCE", performance.sections()));
        }
        sections
    }
}

impl Renderable for BulkReport {
    fn title(&self) -> String {
        "BULK AUDIT REPORT".to_string()
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total URLs", self.total_urls.to_string()),
            ("Successful", self.successful.to_string()),
            ("Failed", self.failed.to_string()),
            ("Elapsed", format!("{:.1}s", self.elapsed_seconds)),
        ]
    }

    fn sections(&self) -> Vec<Section> {
        let results = self
            .entries
            .iter()
            .filter(|e| !e.is_error())
            .map(|e| {
                let mut parts = Vec::new();
                if let Some(meta) = &e.meta {
                    parts.push(format!("meta {}", meta.score));
                }
                if let Some(schema) = &e.schema {
                    parts.push(format!("schema {}", schema.score));
                }
                if let Some(mobile) = &e.mobile {
                    parts.push(format!("mobile {}", mobile.score));
                }
                if let Some(performance) = &e.performance {
                    parts.push(format!("performance {}", performance.score));
                }
                format!("{}: {}", e.url, parts.join(", "))
            })
            .collect();
        let failures = self
            .entries
            .iter()
            .filter_map(|e| e.error.as_ref().map(|err| format!("{}: {}", e.url, err)))
            .collect();
        let categories = self
            .failures_by_type
            .iter()
            .map(|(kind, count)| format!("{kind}: {count}"))
            .collect();

        vec![
            Section::new("RESULTS", SectionKind::Info, results),
            Section::new("FAILURES", SectionKind::Error, failures),
            Section::new("FAILURE CATEGORIES", SectionKind::Warning, categories),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::render_text;
    use crate::sitemap::analyze_content;

    #[test]
    fn test_sitemap_issues_are_truncated() {
        let body: String = (0..13)
            .map(|i| format!("<url><loc>/relative/{i}</loc></url>"))
            .collect();
        let report = analyze_content(
            "https://example.com/sitemap.xml",
            &format!("<urlset>{body}</urlset>"),
        );
        let text = render_text(&report);
        assert!(text.contains("  - Invalid URL: /relative/9"));
        assert!(!text.contains("/relative/10"));
        assert!(text.contains("  ... and 3 more"));
        assert!(text.contains("Type: url_sitemap"));
    }

    #[test]
    fn test_full_audit_sections_are_prefixed() {
        let failed = FullAudit {
            url: "https://example.com".to_string(),
            timestamp: String::new(),
            status: crate::error_handling::AuditStatus::Error,
            error: Some("HTTP 503 for https://example.com/".to_string()),
            schema: AuditResult::failed("https://example.com", "HTTP 503"),
            meta: MetaAuditResult::failed("https://example.com", "HTTP 503"),
            performance: None,
        };
        let summary = failed.summary();
        assert!(summary.iter().any(|(k, _)| *k == "Error"));
        assert!(!summary.iter().any(|(k, _)| *k == "Schema Score"));
        assert!(failed
            .sections()
            .iter()
            .all(|s| s.heading.starts_with("SCHEMA ") || s.heading.starts_with("META ")));
    }

    #[test]
    fn test_mobile_report_summary() {
        let doc = crate::dom::parse_html("<html><body><p>Hi</p></body></html>");
        let report = crate::mobile::analyze_document("https://example.com/", &doc.root());
        let text = render_text(&report);
        assert!(text.contains("MOBILE-FRIENDLINESS REPORT"));
        assert!(text.contains("Viewport: (missing)"));
        assert!(text.contains("Missing viewport meta tag"));

        let failed = MobileReport::failed("https://example.com/", "HTTP 404");
        let summary = failed.summary();
        assert!(summary.iter().any(|(k, v)| *k == "Error" && v == "HTTP 404"));
        assert!(!summary.iter().any(|(k, _)| *k == "Score"));
    }
}

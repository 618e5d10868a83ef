//! Sitemap content checks and recommendations.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;
use url::Url;

use super::parse::parse_sitemap;
use super::types::{ParsedSitemap, SitemapKind, SitemapReport};
use crate::config::{
    SITEMAP_CHANGE_FREQUENCIES, SITEMAP_MAX_BYTES, SITEMAP_MAX_URLS, SITEMAP_URL_CHECK_LIMIT,
};
use crate::error_handling::{AuditStatus, FetchError};
use crate::structured::is_iso_date;

/// URL count above which splitting is suggested
const SPLIT_SUGGESTION_URLS: usize = 45_000;
/// URL count above which a sitemap index is suggested
const INDEX_SUGGESTION_URLS: usize = 10_000;
const LASTMOD_COVERAGE_TARGET: f64 = 50.0;

/// Parses and analyses a sitemap document fetched from `sitemap_url`.
///
/// Unreadable documents produce an error-shaped report.
pub fn analyze_content(sitemap_url: &str, xml: &str) -> SitemapReport {
    match parse_sitemap(xml) {
        Ok(parsed) => analyze_parsed(sitemap_url, xml.len(), &parsed),
        Err(e) => SitemapReport::failed(sitemap_url, e.to_string()),
    }
}

/// Analyses an already parsed document. `size_bytes` is the raw document size.
pub fn analyze_parsed(sitemap_url: &str, size_bytes: usize, parsed: &ParsedSitemap) -> SitemapReport {
    let mut report = SitemapReport::new(sitemap_url, parsed.kind);
    report.urls_count = parsed.entries.len();

    match parsed.kind {
        SitemapKind::SitemapIndex => check_index(&mut report, parsed),
        _ => check_urlset(&mut report, sitemap_url, size_bytes, parsed),
    }

    report.recommendations = recommendations(&report);
    debug!(
        "Sitemap {}: {} entries, {} errors, {} warnings",
        sitemap_url,
        report.urls_count,
        report.issues.errors.len(),
        report.issues.warnings.len()
    );
    report
}

fn check_index(report: &mut SitemapReport, parsed: &ParsedSitemap) {
    report.stats.child_sitemaps = Some(parsed.entries.len());
    report.stats.total_urls = parsed.entries.len();

    if parsed.entries.is_empty() {
        report.issues.errors.push("No sitemaps found in index".to_string());
        return;
    }

    for entry in &parsed.entries {
        let Some(loc) = entry.loc.as_deref() else {
            report
                .issues
                .errors
                .push("Sitemap entry missing <loc> tag".to_string());
            continue;
        };

        if !loc.starts_with("http://") && !loc.starts_with("https://") {
            report
                .issues
                .warnings
                .push(format!("Relative URL in sitemap index: {loc}"));
        }

        if let Some(lastmod) = entry.lastmod.as_deref() {
            report.stats.with_lastmod += 1;
            if !is_w3c_datetime(lastmod) {
                report
                    .issues
                    .warnings
                    .push(format!("Invalid lastmod date format: {lastmod}"));
            }
        }
    }

    report.stats.lastmod_percentage = percentage(report.stats.with_lastmod, parsed.entries.len());
}

fn check_urlset(report: &mut SitemapReport, sitemap_url: &str, size_bytes: usize, parsed: &ParsedSitemap) {
    let total = parsed.entries.len();
    report.stats.total_urls = total;

    if total == 0 {
        report.issues.errors.push("No URLs found in sitemap".to_string());
        return;
    }
    if total > SITEMAP_MAX_URLS {
        report
            .issues
            .errors
            .push(format!("Sitemap exceeds 50,000 URL limit ({total} URLs)"));
    }
    if size_bytes > SITEMAP_MAX_BYTES {
        report
            .issues
            .errors
            .push("Sitemap exceeds 50MB size limit".to_string());
    }

    let base = Url::parse(sitemap_url).ok();
    let base_authority = base.as_ref().map(authority);
    let mut seen = HashSet::new();

    for (i, entry) in parsed.entries.iter().enumerate() {
        let Some(loc) = entry.loc.as_deref() else {
            report
                .issues
                .errors
                .push(format!("URL entry {i} missing <loc> tag"));
            continue;
        };

        if !seen.insert(loc) {
            report.stats.duplicate_urls += 1;
            report.issues.warnings.push(format!("Duplicate URL: {loc}"));
        }

        let Some(parsed_loc) = absolute_url(loc) else {
            report.stats.invalid_urls += 1;
            report.issues.errors.push(format!("Invalid URL: {loc}"));
            continue;
        };

        if base_authority.as_ref().is_some_and(|a| *a != authority(&parsed_loc)) {
            report
                .issues
                .warnings
                .push(format!("URL from different domain: {loc}"));
        }

        if let Some(lastmod) = entry.lastmod.as_deref() {
            report.stats.with_lastmod += 1;
            if !is_w3c_datetime(lastmod) {
                report
                    .issues
                    .warnings
                    .push(format!("Invalid lastmod date: {lastmod} for {loc}"));
            }
        }

        if let Some(changefreq) = entry.changefreq.as_deref() {
            report.stats.with_changefreq += 1;
            if !SITEMAP_CHANGE_FREQUENCIES.contains(&changefreq.to_lowercase().as_str()) {
                report
                    .issues
                    .warnings
                    .push(format!("Invalid changefreq: {changefreq}"));
            }
        }

        if let Some(priority) = entry.priority.as_deref() {
            report.stats.with_priority += 1;
            match priority.parse::<f64>() {
                Ok(value) if (0.0..=1.0).contains(&value) => {}
                Ok(_) => report
                    .issues
                    .warnings
                    .push(format!("Invalid priority value: {priority}")),
                Err(_) => report
                    .issues
                    .warnings
                    .push(format!("Invalid priority format: {priority}")),
            }
        }
    }

    report.stats.lastmod_percentage = percentage(report.stats.with_lastmod, total);
    report.stats.changefreq_percentage = percentage(report.stats.with_changefreq, total);
    report.stats.priority_percentage = percentage(report.stats.with_priority, total);
}

/// Valid absolute locations among the first `SITEMAP_URL_CHECK_LIMIT` entries.
pub fn url_check_candidates(parsed: &ParsedSitemap) -> Vec<String> {
    if parsed.kind != SitemapKind::UrlSitemap {
        return Vec::new();
    }
    parsed
        .entries
        .iter()
        .take(SITEMAP_URL_CHECK_LIMIT)
        .filter_map(|e| e.loc.as_deref())
        .filter(|loc| absolute_url(loc).is_some())
        .map(str::to_string)
        .collect()
}

/// Folds one HEAD probe into the report's status histogram and issues.
pub fn record_url_status(report: &mut SitemapReport, url: &str, outcome: Result<u16, FetchError>) {
    match outcome {
        Ok(status) => {
            *report.stats.status_codes.entry(status).or_insert(0) += 1;
            if status >= 400 {
                report
                    .issues
                    .warnings
                    .push(format!("URL returns {status}: {url}"));
            }
        }
        Err(e) => {
            debug!("Could not check {}: {}", url, e);
            report.issues.info.push(format!("Could not check URL: {url}"));
        }
    }
}

/// Recommendations derived from a finished report.
pub fn recommendations(report: &SitemapReport) -> Vec<String> {
    if report.status == AuditStatus::Error {
        return vec!["Fix sitemap errors before proceeding with optimization".to_string()];
    }

    let stats = &report.stats;
    let mut out = Vec::new();

    if report.urls_count == 0 {
        out.push("Add URLs to your sitemap".to_string());
    } else if report.urls_count > SPLIT_SUGGESTION_URLS {
        out.push("Consider splitting sitemap (approaching 50,000 URL limit)".to_string());
    }

    if stats.lastmod_percentage < LASTMOD_COVERAGE_TARGET {
        out.push(format!(
            "Add lastmod dates to more URLs (currently {}%)",
            stats.lastmod_percentage
        ));
    }
    if stats.duplicate_urls > 0 {
        out.push(format!(
            "Remove {} duplicate URLs from sitemap",
            stats.duplicate_urls
        ));
    }
    if stats.invalid_urls > 0 {
        out.push(format!("Fix {} invalid URLs in sitemap", stats.invalid_urls));
    }
    for (code, count) in stats.status_codes.iter().filter(|(code, _)| **code >= 400) {
        out.push(format!("Fix {count} URLs returning {code} status codes"));
    }

    if report.kind == SitemapKind::UrlSitemap && report.urls_count > 0 {
        if stats.with_priority == report.urls_count {
            out.push("Vary priority values to indicate relative importance of pages".to_string());
        } else if stats.with_priority == 0 {
            out.push("Consider adding priority values to indicate page importance".to_string());
        }
        if report.urls_count > INDEX_SUGGESTION_URLS {
            out.push("Consider using a sitemap index for better organization".to_string());
        }
    }

    out
}

/// Extracts `Sitemap:` directives from a robots.txt body, deduplicated in order.
pub fn sitemaps_from_robots(robots_txt: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in robots_txt.lines() {
        let line = line.trim();
        let Some((directive, value)) = line.split_once(':') else {
            continue;
        };
        if !directive.trim().eq_ignore_ascii_case("sitemap") {
            continue;
        }
        let value = value.trim();
        if !value.is_empty() && !found.iter().any(|f| f == value) {
            found.push(value.to_string());
        }
    }
    found
}

/// W3C datetime as used by `<lastmod>`: `YYYY`, `YYYY-MM`, a date, or a
/// date-time with optional offset.
pub fn is_w3c_datetime(text: &str) -> bool {
    let text = text.trim();
    let year_only = text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit());
    let year_month =
        text.len() == 7 && NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").is_ok();
    year_only
        || year_month
        || is_iso_date(&serde_json::Value::String(text.to_string()))
}

fn absolute_url(loc: &str) -> Option<Url> {
    Url::parse(loc)
        .ok()
        .filter(|u| u.host_str().is_some_and(|h| !h.is_empty()))
}

fn authority(url: &Url) -> (Option<String>, Option<u16>) {
    (
        url.host_str().map(str::to_ascii_lowercase),
        url.port_or_known_default(),
    )
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITEMAP_URL: &str = "https://example.com/sitemap.xml";

    fn urlset(body: &str) -> String {
        format!(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{body}</urlset>"#)
    }

    #[test]
    fn test_clean_sitemap() {
        let xml = urlset(
            "<url><loc>https://example.com/</loc><lastmod>2024-01-01</lastmod><changefreq>daily</changefreq><priority>1.0</priority></url>
             <url><loc>https://example.com/about</loc><lastmod>2024-01-02T08:30:00Z</lastmod><changefreq>monthly</changefreq><priority>0.5</priority></url>",
        );
        let report = analyze_content(SITEMAP_URL, &xml);
        assert_eq!(report.status, AuditStatus::Completed);
        assert_eq!(report.kind, SitemapKind::UrlSitemap);
        assert_eq!(report.urls_count, 2);
        assert!(report.issues.errors.is_empty());
        assert!(report.issues.warnings.is_empty());
        assert_eq!(report.stats.lastmod_percentage, 100.0);
        assert_eq!(
            report.recommendations,
            vec!["Vary priority values to indicate relative importance of pages".to_string()]
        );
    }

    #[test]
    fn test_entry_problems() {
        let xml = urlset(
            "<url><loc>https://example.com/a</loc><changefreq>sometimes</changefreq><priority>1.5</priority></url>
             <url><loc>https://example.com/a</loc><priority>high</priority></url>
             <url><lastmod>2024-01-01</lastmod></url>
             <url><loc>/relative</loc></url>
             <url><loc>https://other.example.org/x</loc><lastmod>yesterday</lastmod></url>",
        );
        let report = analyze_content(SITEMAP_URL, &xml);
        let errors = &report.issues.errors;
        let warnings = &report.issues.warnings;

        assert!(errors.contains(&"URL entry 2 missing <loc> tag".to_string()));
        assert!(errors.contains(&"Invalid URL: /relative".to_string()));
        assert!(warnings.contains(&"Duplicate URL: https://example.com/a".to_string()));
        assert!(warnings.contains(&"Invalid changefreq: sometimes".to_string()));
        assert!(warnings.contains(&"Invalid priority value: 1.5".to_string()));
        assert!(warnings.contains(&"Invalid priority format: high".to_string()));
        assert!(warnings.contains(&"URL from different domain: https://other.example.org/x".to_string()));
        assert!(warnings
            .contains(&"Invalid lastmod date: yesterday for https://other.example.org/x".to_string()));

        assert_eq!(report.stats.duplicate_urls, 1);
        assert_eq!(report.stats.invalid_urls, 1);
        assert_eq!(report.stats.with_lastmod, 1);
        assert_eq!(report.stats.lastmod_percentage, 20.0);
        assert_eq!(report.stats.priority_percentage, 40.0);
        assert!(report
            .recommendations
            .contains(&"Add lastmod dates to more URLs (currently 20%)".to_string()));
        assert!(report
            .recommendations
            .contains(&"Remove 1 duplicate URLs from sitemap".to_string()));
        assert!(report
            .recommendations
            .contains(&"Fix 1 invalid URLs in sitemap".to_string()));
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        let xml = urlset(
            "<url><loc>https://example.com/1</loc><lastmod>2024-01-01</lastmod></url>
             <url><loc>https://example.com/2</loc></url>
             <url><loc>https://example.com/3</loc></url>",
        );
        let report = analyze_content(SITEMAP_URL, &xml);
        assert_eq!(report.stats.lastmod_percentage, 33.3);
        assert!(report
            .recommendations
            .contains(&"Add lastmod dates to more URLs (currently 33.3%)".to_string()));
        assert!(report
            .recommendations
            .contains(&"Consider adding priority values to indicate page importance".to_string()));
    }

    #[test]
    fn test_empty_urlset() {
        let report = analyze_content(SITEMAP_URL, &urlset(""));
        assert_eq!(report.status, AuditStatus::Completed);
        assert_eq!(report.issues.errors, vec!["No URLs found in sitemap".to_string()]);
        assert_eq!(report.recommendations[0], "Add URLs to your sitemap");
    }

    #[test]
    fn test_sitemap_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/posts.xml</loc><lastmod>2024-03-01</lastmod></sitemap>
  <sitemap><loc>pages.xml</loc><lastmod>03/01/2024</lastmod></sitemap>
  <sitemap><lastmod>2024-03-01</lastmod></sitemap>
</sitemapindex>"#;
        let report = analyze_content(SITEMAP_URL, xml);
        assert_eq!(report.kind, SitemapKind::SitemapIndex);
        assert_eq!(report.urls_count, 3);
        assert_eq!(report.stats.child_sitemaps, Some(3));
        assert_eq!(report.issues.errors, vec!["Sitemap entry missing <loc> tag".to_string()]);
        assert!(report
            .issues
            .warnings
            .contains(&"Relative URL in sitemap index: pages.xml".to_string()));
        assert!(report
            .issues
            .warnings
            .contains(&"Invalid lastmod date format: 03/01/2024".to_string()));
    }

    #[test]
    fn test_unparseable_content_is_error_report() {
        let report = analyze_content(SITEMAP_URL, "<html><body>404</body></html>");
        assert!(report.is_error());
        assert_eq!(report.error.as_deref(), Some("Invalid sitemap format"));
        assert_eq!(
            report.recommendations,
            vec!["Fix sitemap errors before proceeding with optimization".to_string()]
        );

        let report = analyze_content(SITEMAP_URL, "<urlset><url></urlset>");
        assert!(report.is_error());
        assert!(report.issues.errors[0].starts_with("XML parsing error"));
    }

    #[test]
    fn test_record_url_status() {
        let mut report = analyze_content(
            SITEMAP_URL,
            &urlset("<url><loc>https://example.com/gone</loc></url>"),
        );
        record_url_status(&mut report, "https://example.com/gone", Ok(404));
        record_url_status(&mut report, "https://example.com/ok", Ok(200));
        record_url_status(
            &mut report,
            "https://example.com/down",
            Err(FetchError::Body("reset".to_string())),
        );
        report.recommendations = recommendations(&report);

        assert_eq!(report.stats.status_codes.get(&404), Some(&1));
        assert_eq!(report.stats.status_codes.get(&200), Some(&1));
        assert!(report
            .issues
            .warnings
            .contains(&"URL returns 404: https://example.com/gone".to_string()));
        assert_eq!(
            report.issues.info,
            vec!["Could not check URL: https://example.com/down".to_string()]
        );
        assert!(report
            .recommendations
            .contains(&"Fix 1 URLs returning 404 status codes".to_string()));
    }

    #[test]
    fn test_url_check_candidates() {
        let body: String = (0..15)
            .map(|i| format!("<url><loc>https://example.com/{i}</loc></url>"))
            .collect();
        let parsed = parse_sitemap(&urlset(&format!("<url><loc>bad</loc></url>{body}")))
            .expect("valid sitemap");
        let candidates = url_check_candidates(&parsed);
        assert_eq!(candidates.len(), SITEMAP_URL_CHECK_LIMIT - 1);
        assert_eq!(candidates[0], "https://example.com/0");
    }

    #[test]
    fn test_sitemaps_from_robots() {
        let robots = "User-agent: *\nDisallow: /admin\nSitemap: https://example.com/sitemap.xml\nsitemap:https://example.com/news.xml\nSITEMAP: https://example.com/sitemap.xml\n# Sitemap: ignored\n";
        assert_eq!(
            sitemaps_from_robots(robots),
            vec![
                "https://example.com/sitemap.xml".to_string(),
                "https://example.com/news.xml".to_string()
            ]
        );
    }

    #[test]
    fn test_w3c_datetime() {
        for ok in [
            "2024",
            "2024-05",
            "2024-05-17",
            "2024-05-17T10:30+02:00",
            "2024-05-17T10:30:00Z",
            "2024-05-17T10:30:00.123+00:00",
        ] {
            assert!(is_w3c_datetime(ok), "{ok}");
        }
        for bad in ["17/05/2024", "2024-13-01", "yesterday", "24"] {
            assert!(!is_w3c_datetime(bad), "{bad}");
        }
    }
}

//! Configuration constants.
//!
//! This module defines the fixed thresholds and operational parameters used
//! throughout the toolkit: network timeouts, rule-table thresholds, score
//! weights and sitemap limits.

use std::time::Duration;

// Network
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Timeout for lightweight HEAD probes (sitemap discovery, URL checks)
pub const PROBE_TIMEOUT_SECS: u64 = 5;
/// PageSpeed Insights runs a full Lighthouse pass and is slow
pub const PERFORMANCE_TIMEOUT_SECS: u64 = 30;
/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// Identifies the toolkit honestly so site owners can recognise audit traffic.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = "SEO-Audit-Toolkit/1.0 (+https://github.com/seo-audit)";

/// Courtesy delay between consecutive URLs in a bulk run
pub const BULK_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Maximum URL length accepted for auditing
pub const MAX_URL_LENGTH: usize = 2048;

// Meta/content rule thresholds
pub const TITLE_MIN_LENGTH: usize = 30;
pub const TITLE_MAX_LENGTH: usize = 60;
pub const DESCRIPTION_MIN_LENGTH: usize = 120;
pub const DESCRIPTION_MAX_LENGTH: usize = 160;
/// Titles that say nothing about the page (compared case-insensitively)
pub const GENERIC_TITLES: &[&str] = &["home", "index", "untitled", "welcome"];

// Meta/content deductions
pub const MISSING_TITLE_PENALTY: i32 = 20;
pub const TITLE_LENGTH_PENALTY: i32 = 5;
pub const GENERIC_TITLE_PENALTY: i32 = 10;
pub const MISSING_DESCRIPTION_PENALTY: i32 = 15;
pub const DESCRIPTION_LENGTH_PENALTY: i32 = 5;
pub const MISSING_VIEWPORT_PENALTY: i32 = 10;
pub const MISSING_OPEN_GRAPH_PENALTY: i32 = 5;
pub const MISSING_TWITTER_PENALTY: i32 = 3;
pub const MISSING_CANONICAL_PENALTY: i32 = 5;
pub const MALFORMED_CANONICAL_PENALTY: i32 = 5;
pub const MISSING_H1_PENALTY: i32 = 10;
pub const MULTIPLE_H1_PENALTY: i32 = 5;
pub const SKIPPED_H2_PENALTY: i32 = 3;
/// Per-image deduction for missing alt text, capped at `MISSING_ALT_PENALTY_CAP`
pub const MISSING_ALT_PENALTY_PER_IMAGE: i32 = 2;
pub const MISSING_ALT_PENALTY_CAP: i32 = 15;
/// Per-image deduction for missing dimensions, capped at `MISSING_DIMENSIONS_PENALTY_CAP`
pub const MISSING_DIMENSIONS_PENALTY_PER_IMAGE: i32 = 1;
pub const MISSING_DIMENSIONS_PENALTY_CAP: i32 = 5;

// Structured-data score weights
pub const SCHEMA_BASE_SCORE: i64 = 100;
pub const SCHEMA_ERROR_PENALTY: i64 = 15;
pub const SCHEMA_WARNING_PENALTY: i64 = 5;
pub const SCHEMA_PRESENT_BONUS: i64 = 10;
pub const JSON_LD_PRESENT_BONUS: i64 = 5;

/// Placeholder a SearchAction target must contain for the sitelinks searchbox
pub const SEARCH_TERM_PLACEHOLDER: &str = "{search_term_string}";

// Sitemaps
/// Maximum URLs allowed in a single sitemap file
pub const SITEMAP_MAX_URLS: usize = 50_000;
/// Maximum uncompressed sitemap size in bytes (50 MiB)
pub const SITEMAP_MAX_BYTES: usize = 50 * 1024 * 1024;
/// Number of sitemap URLs probed when URL checking is requested
pub const SITEMAP_URL_CHECK_LIMIT: usize = 10;
/// Well-known sitemap locations probed during discovery
pub const COMMON_SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemaps/sitemap.xml",
    "/sitemap/",
    "/sitemap.xml.gz",
    "/sitemap_index.xml.gz",
    "/wp-sitemap.xml",
    "/news-sitemap.xml",
    "/video-sitemap.xml",
    "/image-sitemap.xml",
    "/mobile-sitemap.xml",
];
/// Valid `<changefreq>` vocabulary
pub const SITEMAP_CHANGE_FREQUENCIES: &[&str] = &[
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

// Performance metrics
pub const PAGESPEED_API_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

// Core Web Vitals rating thresholds (good <= first, needs improvement <= second)
pub const LCP_THRESHOLDS_SECS: (f64, f64) = (2.5, 4.0);
pub const TBT_THRESHOLDS_MS: (f64, f64) = (100.0, 300.0);
pub const CLS_THRESHOLDS: (f64, f64) = (0.1, 0.25);

// Mobile-friendliness
/// User agent presented when fetching a page for the mobile check
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_7_1 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.2 Mobile/15E148 Safari/604.1";
pub const MOBILE_ISSUE_PENALTY: i32 = 15;
pub const MOBILE_WARNING_PENALTY: i32 = 5;
/// Bonus each for a viewport tag and for responsive CSS
pub const MOBILE_PRACTICE_BONUS: i32 = 5;
/// Only the first elements of each kind are inspected
pub const MOBILE_CONTAINER_SAMPLE: usize = 50;
pub const MOBILE_ELEMENT_SAMPLE: usize = 100;
/// More fixed-width containers than this raise a warning
pub const MOBILE_FIXED_WIDTH_LIMIT: usize = 10;
/// More small-font elements than this raise a warning
pub const MOBILE_SMALL_FONT_LIMIT: usize = 5;
/// More render-blocking scripts than this raise a warning
pub const MOBILE_RENDER_BLOCKING_LIMIT: usize = 3;
/// Stylesheet frameworks that ship responsive breakpoints
pub const RESPONSIVE_FRAMEWORKS: &[&str] = &["bootstrap", "foundation", "tailwind", "bulma"];

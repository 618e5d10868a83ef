//! XML sitemap parsing and analysis.
//!
//! Everything here works on document text; fetching, HEAD checks and
//! discovery are driven by [`crate::SeoAuditor`].

mod analyze;
mod parse;
mod types;

pub use analyze::{
    analyze_content, analyze_parsed, is_w3c_datetime, recommendations, record_url_status,
    sitemaps_from_robots, url_check_candidates,
};
pub use parse::parse_sitemap;
pub use types::{
    ParsedSitemap, SitemapEntry, SitemapIssues, SitemapKind, SitemapReport, SitemapStats,
};

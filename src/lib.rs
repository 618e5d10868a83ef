//! seo_audit library: on-page SEO auditing
//!
//! This library audits web pages for structured data (JSON-LD, Microdata,
//! RDFa), meta tags and content signals, mobile-friendliness, XML sitemaps
//! and Core Web Vitals.
//! The analyzers are pure functions over a [`dom::DomNode`] tree; the
//! [`SeoAuditor`] fetches pages and turns fetch failures into error-shaped
//! results.
//!
//! # Example
//!
//! ```no_run
//! use seo_audit::{Config, SeoAuditor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let auditor = SeoAuditor::new(Config::default())?;
//! let result = auditor.parse("https://example.com/").await;
//! println!("{}: score {} ({} schemas)", result.url, result.score, result.schemas.len());
//! # Ok(())
//! # }
//! ```
//!
//! Documents that are already in memory need no network at all:
//!
//! ```
//! use seo_audit::dom::parse_html;
//!
//! let doc = parse_html(r#"<script type="application/ld+json">{"@type":"Organization","name":"Acme","url":"https://acme.test"}</script>"#);
//! let result = seo_audit::structured::analyze_document("https://acme.test/", &doc.root());
//! assert_eq!(result.schemas.len(), 1);
//! ```
//!
//! # Requirements
//!
//! The network-facing APIs require a Tokio runtime.

mod audit;
pub mod config;
pub mod dom;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod meta;
pub mod mobile;
pub mod performance;
pub mod report;
pub mod run;
pub mod sitemap;
pub mod structured;

// Re-export public API
pub use audit::{FullAudit, SeoAuditor};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{AuditStatus, FetchError};

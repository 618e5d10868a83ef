//! Meta tag, heading, image and link audit.
//!
//! Independent of the structured data pass: one walk over the document
//! collects [`PageSignals`], then a fixed deduction table scores them.

mod extract;
mod scoring;
mod types;

pub use extract::extract_signals;
pub use scoring::assess;
pub use types::{
    Assessment, Headings, ImageInfo, ImageSummary, LinkSummary, MetaAuditResult, MetaTags,
    PageSignals,
};

use crate::dom::DomNode;
use crate::error_handling::AuditStatus;

/// Extracts and scores the document at `url`.
pub fn analyze_document<N: DomNode>(url: &str, root: &N) -> MetaAuditResult {
    let signals = extract_signals(url, root);
    let assessment = assess(&signals);

    log::info!(
        "Meta audit for {}: {} issues, {} warnings, score {}",
        url,
        assessment.issues.len(),
        assessment.warnings.len(),
        assessment.score
    );

    MetaAuditResult {
        url: url.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        status: AuditStatus::Completed,
        error: None,
        meta: signals.meta,
        headings: signals.headings,
        images: signals.images,
        links: signals.links,
        issues: assessment.issues,
        warnings: assessment.warnings,
        recommendations: assessment.recommendations,
        score: assessment.score,
    }
}

//! Structured data audit.
//!
//! This module turns a document tree into an [`AuditResult`]:
//! - JSON-LD, Microdata and RDFa extraction (`extract`)
//! - per-type schema.org validation (`validate`)
//! - page-type based schema suggestions (`recommend`)
//! - a bounded 0-100 score (`score`)
//!
//! Every stage is a pure function of its input; no state survives a call.

mod extract;
mod recommend;
mod score;
mod types;
mod validate;

pub use extract::{extract, json_ld_records};
pub use recommend::{classify_page, recommend, suggested_schemas};
pub use score::{issue_counters, score};
pub use types::{
    AuditResult, ExtractedSchemas, Findings, IssueCounters, JsonValidation, PageType,
    SchemaFormat, SchemaRecord, ValidationOutcome,
};
pub use validate::{is_iso_date, validate, validate_record, SchemaType};

use crate::dom::DomNode;
use crate::error_handling::AuditStatus;

/// Runs extract → validate → recommend → score over a document.
pub fn analyze_document<N: DomNode>(url: &str, root: &N) -> AuditResult {
    let (formats, extraction) = extract(root);
    let schemas = formats.all();
    let findings = extraction.merge(validate(&schemas));

    let page_type = classify_page(url, &schemas);
    let recommendations = recommend(url, &schemas);
    let score = score(&findings.outcome, &formats);
    let issues = issue_counters(&findings, schemas.len());

    log::info!(
        "Structured data for {}: {} schemas, {} errors, {} warnings, score {}",
        url,
        schemas.len(),
        issues.critical,
        issues.warnings,
        score
    );

    AuditResult {
        url: url.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        status: AuditStatus::Completed,
        error: None,
        page_type: Some(page_type),
        formats,
        schemas,
        validation: findings.outcome,
        recommendations,
        score,
        issues,
    }
}

/// Validates a standalone JSON-LD payload (object, array or `@graph`).
pub fn analyze_json(text: &str) -> JsonValidation {
    let mut findings = Findings::default();
    let schemas = match serde_json::from_str::<serde_json::Value>(text.trim()) {
        Ok(value) => json_ld_records(&value),
        Err(e) => {
            findings.error(format!("Invalid JSON-LD: {e}"));
            Vec::new()
        }
    };
    let findings = findings.merge(validate(&schemas));

    JsonValidation {
        valid: findings.critical == 0,
        schema_type: schemas
            .first()
            .map(|s| s.schema_type.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        issues: issue_counters(&findings, schemas.len()),
        schemas,
        validation: findings.outcome,
    }
}

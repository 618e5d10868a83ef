//! Structured data score aggregation.

use super::types::{ExtractedSchemas, Findings, IssueCounters, ValidationOutcome};
use crate::config::{
    JSON_LD_PRESENT_BONUS, SCHEMA_BASE_SCORE, SCHEMA_ERROR_PENALTY, SCHEMA_PRESENT_BONUS,
    SCHEMA_WARNING_PENALTY,
};

/// Linear weighted score clamped to `0..=100`.
pub fn score(outcome: &ValidationOutcome, schemas: &ExtractedSchemas) -> u8 {
    let mut total = SCHEMA_BASE_SCORE
        - SCHEMA_ERROR_PENALTY * outcome.errors.len() as i64
        - SCHEMA_WARNING_PENALTY * outcome.warnings.len() as i64;
    if !schemas.is_empty() {
        total += SCHEMA_PRESENT_BONUS;
    }
    if !schemas.json_ld.is_empty() {
        total += JSON_LD_PRESENT_BONUS;
    }
    total.clamp(0, 100) as u8
}

/// Severity tallies with the `passed` residual (may be negative).
pub fn issue_counters(findings: &Findings, schema_count: usize) -> IssueCounters {
    IssueCounters {
        critical: findings.critical,
        warnings: findings.warnings,
        passed: schema_count as i64 - findings.critical as i64 - findings.warnings as i64,
    }
}

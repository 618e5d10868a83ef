//! CSV tables, one row per URL.
//!
//! Every cell is quoted and embedded quotes are doubled.

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use crate::meta::MetaAuditResult;
use crate::run::BulkEntry;

const META_HEADER: [&str; 11] = [
    "URL",
    "Title",
    "Title Length",
    "Description",
    "Description Length",
    "H1 Count",
    "Images Total",
    "Images Without Alt",
    "Score",
    "Issues",
    "Warnings",
];

const BULK_HEADER: [&str; 8] = [
    "URL",
    "Timestamp",
    "Meta Score",
    "Schema Score",
    "Schemas Found",
    "Schema Errors",
    "Mobile Score",
    "Error",
];

fn write_table<I>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(header)
        .context("Failed to write CSV header")?;
    for row in rows {
        writer.write_record(&row).context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Meta audit table. Issues and warnings are counts.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn render_meta_csv(results: &[MetaAuditResult]) -> Result<String> {
    write_table(
        &META_HEADER,
        results.iter().map(|r| {
            let title = r.meta.title.clone().unwrap_or_default();
            let description = r.meta.description.clone().unwrap_or_default();
            let title_length = title.chars().count().to_string();
            let description_length = description.chars().count().to_string();
            vec![
                r.url.clone(),
                title,
                title_length,
                description,
                description_length,
                r.headings.h1.len().to_string(),
                r.images.total.to_string(),
                r.images.without_alt.to_string(),
                r.score.to_string(),
                r.issues.len().to_string(),
                r.warnings.len().to_string(),
            ]
        }),
    )
}

/// Bulk run table. Columns for checks that were not run stay empty.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn render_bulk_csv(entries: &[BulkEntry]) -> Result<String> {
    write_table(
        &BULK_HEADER,
        entries.iter().map(|e| {
            let meta_score = e
                .meta
                .as_ref()
                .filter(|m| !m.is_error())
                .map(|m| m.score.to_string())
                .unwrap_or_default();
            let (schema_score, schemas_found, schema_errors) = e
                .schema
                .as_ref()
                .filter(|s| !s.is_error())
                .map(|s| {
                    (
                        s.score.to_string(),
                        s.schemas.len().to_string(),
                        s.validation.errors.len().to_string(),
                    )
                })
                .unwrap_or_default();
            let mobile_score = e
                .mobile
                .as_ref()
                .filter(|m| !m.is_error())
                .map(|m| m.score.to_string())
                .unwrap_or_default();
            vec![
                e.url.clone(),
                e.timestamp.clone(),
                meta_score,
                schema_score,
                schemas_found,
                schema_errors,
                mobile_score,
                e.error.clone().unwrap_or_default(),
            ]
        }),
    )
}

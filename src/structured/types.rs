//! Structured data result types.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error_handling::AuditStatus;

/// Markup syntax a schema record was harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaFormat {
    #[serde(rename = "json-ld")]
    JsonLd,
    #[serde(rename = "microdata")]
    Microdata,
    #[serde(rename = "rdfa")]
    Rdfa,
}

impl SchemaFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::JsonLd => "json-ld",
            SchemaFormat::Microdata => "microdata",
            SchemaFormat::Rdfa => "rdfa",
        }
    }
}

/// One schema.org object found on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaRecord {
    pub format: SchemaFormat,
    /// schema.org type name, `"Unknown"` (JSON-LD) or `"Thing"` (Microdata) when absent.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// JSON-LD `@context` or RDFa `vocab`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Every non-`@` property of the object.
    pub properties: Map<String, Value>,
}

impl SchemaRecord {
    pub fn new(format: SchemaFormat, schema_type: impl Into<String>) -> Self {
        Self {
            format,
            schema_type: schema_type.into(),
            context: None,
            properties: Map::new(),
        }
    }

    pub fn has(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }
}

/// Records grouped by the syntax they came from, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSchemas {
    pub json_ld: Vec<SchemaRecord>,
    pub microdata: Vec<SchemaRecord>,
    pub rdfa: Vec<SchemaRecord>,
}

impl ExtractedSchemas {
    /// Flattened view: JSON-LD, then Microdata, then RDFa.
    pub fn all(&self) -> Vec<SchemaRecord> {
        self.json_ld
            .iter()
            .chain(&self.microdata)
            .chain(&self.rdfa)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.json_ld.len() + self.microdata.len() + self.rdfa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Human-readable validation messages, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Severity tallies for one audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounters {
    pub critical: usize,
    pub warnings: usize,
    /// `schemas found - critical - warnings`; negative when violations outnumber schemas.
    pub passed: i64,
}

/// Accumulator threaded through extraction and validation.
///
/// Every `error` bumps `critical` and every `warning` bumps `warnings`, so the
/// counters always equal the lengths of the message lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub outcome: ValidationOutcome,
    pub critical: usize,
    pub warnings: usize,
}

impl Findings {
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("schema error: {}", message);
        self.outcome.errors.push(message);
        self.critical += 1;
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("schema warning: {}", message);
        self.outcome.warnings.push(message);
        self.warnings += 1;
    }

    /// Appends `other` after `self`, preserving message order.
    pub fn merge(mut self, other: Findings) -> Findings {
        self.outcome.errors.extend(other.outcome.errors);
        self.outcome.warnings.extend(other.outcome.warnings);
        self.critical += other.critical;
        self.warnings += other.warnings;
        self
    }

    pub fn is_clean(&self) -> bool {
        self.critical == 0 && self.warnings == 0
    }
}

/// Page classification driving schema recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Homepage,
    Product,
    Article,
    Category,
    Faq,
    Local,
    Event,
    General,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Homepage => "homepage",
            PageType::Product => "product",
            PageType::Article => "article",
            PageType::Category => "category",
            PageType::Faq => "faq",
            PageType::Local => "local",
            PageType::Event => "event",
            PageType::General => "general",
        }
    }
}

/// Structured data audit of one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    pub timestamp: String,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    pub formats: ExtractedSchemas,
    pub schemas: Vec<SchemaRecord>,
    pub validation: ValidationOutcome,
    pub recommendations: Vec<String>,
    pub score: u8,
    pub issues: IssueCounters,
}

impl AuditResult {
    /// Error-shaped result for a page that could not be fetched.
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: AuditStatus::Error,
            error: Some(error.into()),
            page_type: None,
            formats: ExtractedSchemas::default(),
            schemas: Vec::new(),
            validation: ValidationOutcome::default(),
            recommendations: Vec::new(),
            score: 0,
            issues: IssueCounters::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == AuditStatus::Error
    }
}

/// Validation of a single pasted JSON-LD payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonValidation {
    /// True when no errors were raised.
    pub valid: bool,
    /// Type of the first record, `"Unknown"` when nothing was decoded.
    #[serde(rename = "type")]
    pub schema_type: String,
    pub schemas: Vec<SchemaRecord>,
    pub validation: ValidationOutcome,
    pub issues: IssueCounters,
}

//! PageSpeed Insights response and report types.

use std::collections::{BTreeMap, HashMap};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error_handling::AuditStatus;

/// Device profile Lighthouse emulates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// Core Web Vitals rating band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
    #[default]
    Unknown,
}

impl Rating {
    /// Rates `value` where lower is better.
    pub fn from_thresholds(value: f64, (good, poor): (f64, f64)) -> Self {
        if value <= good {
            Rating::Good
        } else if value <= poor {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
            Rating::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    /// Seconds for LCP/FCP/TTI, milliseconds for TBT/TTFB, unitless for CLS.
    pub value: f64,
    /// Lighthouse audit score, 0.0 to 1.0
    pub score: f64,
    pub display_value: String,
    pub status: Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoreWebVitals {
    pub lcp: MetricResult,
    /// Total Blocking Time, the lab proxy for First Input Delay.
    pub fid: MetricResult,
    pub cls: MetricResult,
    pub fcp: MetricResult,
    pub ttfb: MetricResult,
    pub tti: MetricResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMetric {
    pub p75: f64,
    pub category: String,
}

/// Chrome UX Report data for real users, when PageSpeed has it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    pub origin_summary: bool,
    pub overall_category: String,
    pub metrics: BTreeMap<String, FieldMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub url: String,
    pub strategy: Strategy,
    pub timestamp: String,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metrics: CoreWebVitals,
    /// Lighthouse performance category score × 100
    pub score: u8,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_data: Option<FieldData>,
}

impl PerformanceReport {
    pub fn failed(url: &str, strategy: Strategy, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            strategy,
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: AuditStatus::Error,
            error: Some(error.into()),
            metrics: CoreWebVitals::default(),
            score: 0,
            recommendations: Vec::new(),
            field_data: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == AuditStatus::Error
    }
}

// PageSpeed Insights v5 wire format (only the fields we read)

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PsiResponse {
    pub lighthouse_result: Option<LighthouseResult>,
    pub loading_experience: Option<LoadingExperience>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LighthouseResult {
    #[serde(default)]
    pub audits: HashMap<String, LighthouseAudit>,
    #[serde(default)]
    pub categories: LighthouseCategories,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LighthouseAudit {
    pub numeric_value: Option<f64>,
    pub score: Option<f64>,
    pub display_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LighthouseCategories {
    pub performance: Option<LighthouseCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LighthouseCategory {
    pub score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoadingExperience {
    #[serde(default)]
    pub overall_category: Option<String>,
    #[serde(default)]
    pub origin_fallback: bool,
    #[serde(default)]
    pub metrics: BTreeMap<String, LoadingMetric>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoadingMetric {
    pub percentile: Option<f64>,
    pub category: Option<String>,
}

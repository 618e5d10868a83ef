//! Mobile-friendliness result types.

use serde::Serialize;

use crate::error_handling::AuditStatus;

/// The `<meta name="viewport">` tag as found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportAnalysis {
    pub present: bool,
    pub content: String,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQueries {
    pub found: bool,
    /// Pixel breakpoints from `min-width`/`max-width` in inline `<style>` blocks
    pub breakpoints: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveChecks {
    pub flexible_images: bool,
    pub fixed_width_containers: usize,
    pub media_queries: MediaQueries,
    /// A known responsive CSS framework is referenced
    pub css_framework: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTargets {
    pub total_checked: usize,
    pub too_small: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub small_text_found: bool,
    pub small_text_count: usize,
    pub font_issues: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsabilityChecks {
    pub touch_targets: TouchTargets,
    pub typography: Typography,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAnalysis {
    /// Non-retina images without a `loading` attribute
    pub images_without_lazy_loading: usize,
    /// External scripts with neither `async` nor `defer`
    pub render_blocking: usize,
    pub pwa_ready: bool,
    pub ios_optimized: bool,
}

/// Mobile-friendliness check of one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileReport {
    pub url: String,
    pub timestamp: String,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// No issues were found
    pub mobile_friendly: bool,
    /// 0-100
    pub score: i32,
    pub viewport: ViewportAnalysis,
    pub responsive: ResponsiveChecks,
    pub usability: UsabilityChecks,
    pub resources: ResourceAnalysis,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl MobileReport {
    pub(crate) fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: AuditStatus::Completed,
            error: None,
            mobile_friendly: true,
            score: 0,
            viewport: ViewportAnalysis::default(),
            responsive: ResponsiveChecks::default(),
            usability: UsabilityChecks::default(),
            resources: ResourceAnalysis::default(),
            issues: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            status: AuditStatus::Error,
            error: Some(error.into()),
            mobile_friendly: false,
            ..Self::new(url)
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == AuditStatus::Error
    }
}

//! Turning a PageSpeed response into Core Web Vitals ratings.

use std::collections::HashMap;

use super::types::{
    CoreWebVitals, FieldData, FieldMetric, LighthouseAudit, LoadingExperience, MetricResult,
    PerformanceReport, PsiResponse, Rating, Strategy,
};
use crate::config::{CLS_THRESHOLDS, LCP_THRESHOLDS_SECS, TBT_THRESHOLDS_MS};
use crate::error_handling::AuditStatus;

/// Builds a completed report from a decoded PageSpeed response.
pub(crate) fn report_from_response(
    url: &str,
    strategy: Strategy,
    response: PsiResponse,
) -> PerformanceReport {
    let lighthouse = response.lighthouse_result.unwrap_or_default();
    let metrics = metrics_from_audits(&lighthouse.audits);
    let score = lighthouse
        .categories
        .performance
        .and_then(|p| p.score)
        .map(|s| (s * 100.0).round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0);

    PerformanceReport {
        url: url.to_string(),
        strategy,
        timestamp: chrono::Utc::now().to_rfc3339(),
        status: AuditStatus::Completed,
        error: None,
        recommendations: recommendations(&metrics),
        metrics,
        score,
        field_data: response.loading_experience.as_ref().map(field_data),
    }
}

/// Reads the six lab metrics. LCP, FCP and TTI are converted from milliseconds to seconds.
pub(crate) fn metrics_from_audits(audits: &HashMap<String, LighthouseAudit>) -> CoreWebVitals {
    let metric = |key: &str, divisor: f64| -> Option<MetricResult> {
        audits.get(key).map(|audit| MetricResult {
            value: audit.numeric_value.unwrap_or(0.0) / divisor,
            score: audit.score.unwrap_or(0.0),
            display_value: audit.display_value.clone().unwrap_or_default(),
            status: Rating::Unknown,
        })
    };

    let mut lcp = metric("largest-contentful-paint", 1000.0).unwrap_or_default();
    if audits.contains_key("largest-contentful-paint") {
        lcp.status = Rating::from_thresholds(lcp.value, LCP_THRESHOLDS_SECS);
    }

    let mut fid = metric("total-blocking-time", 1.0).unwrap_or_default();
    if audits.contains_key("total-blocking-time") {
        fid.display_value = format!("{:.0} ms (TBT)", fid.value);
        fid.status = Rating::from_thresholds(fid.value, TBT_THRESHOLDS_MS);
    }

    let mut cls = metric("cumulative-layout-shift", 1.0).unwrap_or_default();
    if audits.contains_key("cumulative-layout-shift") {
        cls.status = Rating::from_thresholds(cls.value, CLS_THRESHOLDS);
    }

    CoreWebVitals {
        lcp,
        fid,
        cls,
        fcp: metric("first-contentful-paint", 1000.0).unwrap_or_default(),
        ttfb: metric("server-response-time", 1.0).unwrap_or_default(),
        tti: metric("interactive", 1000.0).unwrap_or_default(),
    }
}

pub(crate) fn field_data(experience: &LoadingExperience) -> FieldData {
    FieldData {
        origin_summary: experience.origin_fallback,
        overall_category: experience
            .overall_category
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        metrics: experience
            .metrics
            .iter()
            .filter_map(|(key, metric)| {
                metric.percentile.map(|p75| {
                    (
                        key.clone(),
                        FieldMetric {
                            p75,
                            category: metric
                                .category
                                .clone()
                                .unwrap_or_else(|| "unknown".to_string()),
                        },
                    )
                })
            })
            .collect(),
    }
}

/// Advice for every metric outside its good band.
pub fn recommendations(metrics: &CoreWebVitals) -> Vec<String> {
    let mut out = Vec::new();

    match metrics.lcp.status {
        Rating::Poor => out.extend([
            "Optimize loading of the largest content element (LCP > 4s)".to_string(),
            "- Reduce server response times".to_string(),
            "- Serve static assets from a CDN".to_string(),
            "- Use next-gen image formats".to_string(),
            "- Preload critical resources".to_string(),
        ]),
        Rating::NeedsImprovement => out.push(
            "Improve LCP (currently 2.5-4s) by optimizing images and server response".to_string(),
        ),
        _ => {}
    }

    match metrics.fid.status {
        Rating::Poor => out.extend([
            "Reduce JavaScript execution time (high TBT means poor interactivity)".to_string(),
            "- Break up long tasks".to_string(),
            "- Minimize main thread work".to_string(),
            "- Remove unused JavaScript".to_string(),
        ]),
        Rating::NeedsImprovement => out.push(
            "Optimize JavaScript to improve interactivity (TBT 100-300ms)".to_string(),
        ),
        _ => {}
    }

    match metrics.cls.status {
        Rating::Poor => out.extend([
            "Fix layout shifts (CLS > 0.25)".to_string(),
            "- Set width and height on images and videos".to_string(),
            "- Reserve space for ad slots and embeds".to_string(),
            "- Avoid inserting content above existing content".to_string(),
        ]),
        Rating::NeedsImprovement => out.push(
            "Reduce layout shifts (CLS 0.1-0.25) by defining dimensions for media".to_string(),
        ),
        _ => {}
    }

    out
}

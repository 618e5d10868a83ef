//! Mobile-friendliness audit.
//!
//! Static checks over the markup a phone browser receives: viewport
//! configuration, responsive images and CSS, touch target and font sizing
//! hints from inline styles, and render-blocking resources. Nothing is
//! rendered, so sizes come only from `class` and `style` attributes.

mod checks;
mod types;

pub use checks::{recommendations, score};
pub use types::{
    MediaQueries, MobileReport, ResourceAnalysis, ResponsiveChecks, TouchTargets, Typography,
    UsabilityChecks, ViewportAnalysis,
};

use crate::dom::DomNode;

/// Runs every mobile check against the document at `url`.
pub fn analyze_document<N: DomNode>(url: &str, root: &N) -> MobileReport {
    let mut report = MobileReport::new(url);

    checks::check_viewport(root, &mut report);
    checks::check_responsive_layout(root, &mut report);
    checks::check_touch_targets(root, &mut report);
    checks::check_font_sizes(root, &mut report);
    checks::check_media_queries(root, &mut report);
    checks::check_resources(root, &mut report);

    report.mobile_friendly = report.issues.is_empty();
    report.score = score(&report);
    report.recommendations = recommendations(&report);

    log::info!(
        "Mobile check for {}: {} issues, {} warnings, score {}",
        url,
        report.issues.len(),
        report.warnings.len(),
        report.score
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_responsive_page_is_mobile_friendly() {
        let doc = parse_html(
            r#"<html><head>
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <style>@media (max-width: 600px) { nav { display: none } }</style>
            <script src="/app.js" defer></script>
            </head><body>
            <img src="/hero.jpg" srcset="/hero-2x.jpg 2x" loading="lazy" alt="Hero">
            <p>Readable text</p>
            </body></html>"#,
        );
        let report = analyze_document("https://example.com/", &doc.root());

        assert!(report.mobile_friendly);
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.score, 100);
        assert_eq!(report.responsive.media_queries.breakpoints, vec![600]);
        assert_eq!(
            report.recommendations.first().map(String::as_str),
            Some("Consider implementing Progressive Web App (PWA) features")
        );
    }

    #[test]
    fn test_bare_page() {
        let doc = parse_html("<html><body><p>Hi</p></body></html>");
        let report = analyze_document("https://example.com/", &doc.root());

        assert!(!report.mobile_friendly);
        assert_eq!(report.issues, vec!["Missing viewport meta tag"]);
        assert_eq!(report.score, 85);
        assert_eq!(
            report.recommendations,
            vec![
                checks::VIEWPORT_RECOMMENDATION.to_string(),
                "Implement responsive design with CSS media queries".to_string(),
            ]
        );
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let doc = parse_html("<html><body></body></html>");
        let report = analyze_document("https://example.com/", &doc.root());
        let json = serde_json::to_value(&report).expect("serializes");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["mobileFriendly"], false);
        assert!(json["usability"]["touchTargets"]["totalChecked"].is_number());
        assert!(json.get("error").is_none());
    }
}

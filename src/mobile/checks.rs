//! Individual mobile usability checks.
//!
//! Each check reads the document and appends to the report's issue, warning
//! and recommendation lists. Inline `style` attributes are only inspected for
//! pixel sizes; external stylesheets are not fetched.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::MobileReport;
use crate::config::{
    MOBILE_CONTAINER_SAMPLE, MOBILE_ELEMENT_SAMPLE, MOBILE_FIXED_WIDTH_LIMIT,
    MOBILE_ISSUE_PENALTY, MOBILE_PRACTICE_BONUS, MOBILE_RENDER_BLOCKING_LIMIT,
    MOBILE_SMALL_FONT_LIMIT, MOBILE_WARNING_PENALTY, RESPONSIVE_FRAMEWORKS,
};
use crate::dom::DomNode;

static FIXED_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"width:\s*\d+px").expect("static pattern"));

static SMALL_DIMENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(height|width):\s*([0-2]?\d)px").expect("static pattern"));

static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-size:\s*(\d+)(px|pt)").expect("static pattern"));

static BREAKPOINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:max-width|min-width):\s*(\d+)px").expect("static pattern"));

const TOUCH_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];
const TEXT_TAGS: &[&str] = &["p", "span", "div", "li", "td"];
const CONTAINER_TAGS: &[&str] = &["div", "section", "article"];
const SMALL_CLASS_HINTS: &[&str] = &["xs", "tiny", "small"];
const RETINA_HINTS: &[&str] = &["@2x", "@3x", "retina"];

pub const VIEWPORT_RECOMMENDATION: &str =
    "Add viewport meta tag: <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">";

fn style_of<N: DomNode>(node: &N) -> String {
    node.attribute("style").unwrap_or("").to_ascii_lowercase()
}

fn tagged<N: DomNode>(root: &N, tags: &[&str]) -> Vec<N> {
    root.find_all(|n| tags.iter().any(|t| n.is_tag(t)))
}

fn meta_named<N: DomNode>(root: &N, name: &str) -> Option<N> {
    root.find_first(|n| {
        n.is_tag("meta")
            && n.attribute("name")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(name))
    })
}

/// Parses `key=value` pairs of a viewport `content` attribute.
fn viewport_directives(content: &str) -> HashMap<String, String> {
    content
        .split(',')
        .filter_map(|directive| directive.split_once('='))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect()
}

pub fn check_viewport<N: DomNode>(root: &N, report: &mut MobileReport) {
    let Some(viewport) = meta_named(root, "viewport") else {
        report.issues.push("Missing viewport meta tag".to_string());
        report
            .viewport
            .issues
            .push("No viewport meta tag found; mobile browsers will render a desktop layout".to_string());
        return;
    };

    let content = viewport.attribute("content").unwrap_or("").trim().to_string();
    report.viewport.present = true;
    report.viewport.content = content.clone();
    if content.is_empty() {
        report.issues.push("Empty viewport meta tag".to_string());
        return;
    }

    let directives = viewport_directives(&content);

    match directives.get("width").map(String::as_str) {
        None => report
            .issues
            .push("Viewport missing width directive".to_string()),
        Some("device-width") => {}
        Some(width) => report.warnings.push(format!(
            "Viewport width set to '{width}' instead of 'device-width'"
        )),
    }

    match directives.get("initial-scale") {
        None => report
            .warnings
            .push("Viewport missing initial-scale directive".to_string()),
        Some(scale) if scale.parse::<f64>().is_ok_and(|s| s == 1.0) => {}
        Some(scale) => report
            .warnings
            .push(format!("Initial-scale set to {scale} instead of 1")),
    }

    if directives
        .get("maximum-scale")
        .and_then(|m| m.parse::<f64>().ok())
        .is_some_and(|m| m < 2.0)
    {
        report
            .warnings
            .push("Maximum-scale restricts zooming; consider accessibility".to_string());
    }

    if directives
        .get("user-scalable")
        .is_some_and(|v| v.eq_ignore_ascii_case("no") || v == "0")
    {
        report
            .issues
            .push("user-scalable=no prevents zooming, which is an accessibility issue".to_string());
    }
}

pub fn check_responsive_layout<N: DomNode>(root: &N, report: &mut MobileReport) {
    let images = tagged(root, &["img"]);
    report.responsive.flexible_images = images.iter().any(|img| {
        let style = style_of(img);
        img.has_attribute("srcset")
            || img.has_attribute("sizes")
            || (style.contains("max-width") && style.contains("100%"))
    });
    if !images.is_empty() && !report.responsive.flexible_images {
        report.warnings.push(
            "Images may not be responsive; consider using srcset or max-width: 100%".to_string(),
        );
    }

    let fixed = tagged(root, CONTAINER_TAGS)
        .iter()
        .take(MOBILE_CONTAINER_SAMPLE)
        .filter(|c| FIXED_WIDTH_RE.is_match(&style_of(*c)))
        .count();
    report.responsive.fixed_width_containers = fixed;
    if fixed > MOBILE_FIXED_WIDTH_LIMIT {
        report
            .warnings
            .push(format!("Found {fixed} containers with fixed pixel widths"));
    }
}

pub fn check_touch_targets<N: DomNode>(root: &N, report: &mut MobileReport) {
    let targets = &mut report.usability.touch_targets;
    for element in tagged(root, TOUCH_TAGS).iter().take(MOBILE_ELEMENT_SAMPLE) {
        targets.total_checked += 1;

        let classes = element.attribute("class").unwrap_or("").to_ascii_lowercase();
        if SMALL_CLASS_HINTS.iter().any(|hint| classes.contains(hint)) {
            targets.too_small += 1;
        }
        if SMALL_DIMENSION_RE.is_match(&style_of(element)) {
            targets.too_small += 1;
        }
    }

    let too_small = targets.too_small;
    if too_small > 0 {
        report
            .warnings
            .push(format!("Found {too_small} potentially small touch targets"));
        report
            .recommendations
            .push("Ensure touch targets are at least 48x48 CSS pixels".to_string());
    }
}

pub fn check_font_sizes<N: DomNode>(root: &N, report: &mut MobileReport) {
    let small = tagged(root, TEXT_TAGS)
        .iter()
        .take(MOBILE_ELEMENT_SAMPLE)
        .filter(|element| {
            let style = style_of(*element);
            FONT_SIZE_RE.captures(&style).is_some_and(|caps| {
                let size: u32 = caps[1].parse().unwrap_or(u32::MAX);
                match &caps[2] {
                    "px" => size < 12,
                    _ => size < 9,
                }
            })
        })
        .count();

    let typography = &mut report.usability.typography;
    typography.small_text_count = small;
    if small > MOBILE_SMALL_FONT_LIMIT {
        typography.small_text_found = true;
        report
            .warnings
            .push(format!("Found {small} elements with potentially small font sizes"));
        report
            .recommendations
            .push("Use minimum 16px font size for body text on mobile".to_string());
    }

    if meta_named(root, "HandheldFriendly")
        .and_then(|m| m.attribute("content").map(|c| c.trim().eq_ignore_ascii_case("true")))
        .unwrap_or(false)
    {
        report
            .usability
            .typography
            .font_issues
            .push("HandheldFriendly meta tag may affect text scaling".to_string());
    }
}

/// Inline `@media` rules, or a responsive framework among linked assets.
pub fn check_media_queries<N: DomNode>(root: &N, report: &mut MobileReport) {
    let queries = &mut report.responsive.media_queries;
    for style in tagged(root, &["style"]) {
        let css = style.text_content();
        if !css.contains("@media") {
            continue;
        }
        queries.found = true;
        queries.breakpoints.extend(
            BREAKPOINT_RE
                .captures_iter(&css)
                .filter_map(|caps| caps[1].parse::<u32>().ok()),
        );
    }

    if queries.found {
        return;
    }
    let references_framework = root
        .find_all(|n| n.is_tag("link") || n.is_tag("script"))
        .iter()
        .filter_map(|n| n.attribute("href").or_else(|| n.attribute("src")))
        .map(str::to_ascii_lowercase)
        .any(|asset| RESPONSIVE_FRAMEWORKS.iter().any(|f| asset.contains(f)));
    if references_framework {
        queries.found = true;
        report.responsive.css_framework = true;
    }
}

pub fn check_resources<N: DomNode>(root: &N, report: &mut MobileReport) {
    let resources = &mut report.resources;

    resources.images_without_lazy_loading = tagged(root, &["img"])
        .iter()
        .filter(|img| {
            let src = img.attribute("src").unwrap_or("").to_ascii_lowercase();
            !RETINA_HINTS.iter().any(|hint| src.contains(hint)) && !img.has_attribute("loading")
        })
        .count();

    resources.render_blocking = root
        .find_all(|n| n.is_tag("script") && n.has_attribute("src"))
        .iter()
        .filter(|s| !s.has_attribute("async") && !s.has_attribute("defer"))
        .count();

    resources.pwa_ready = root
        .find_first(|n| {
            n.is_tag("link")
                && n.attribute("rel").is_some_and(|rel| {
                    rel.split_whitespace()
                        .any(|t| t.eq_ignore_ascii_case("manifest"))
                })
        })
        .is_some();
    resources.ios_optimized = meta_named(root, "apple-mobile-web-app-capable").is_some();

    if resources.images_without_lazy_loading > 0 {
        report
            .warnings
            .push("Images missing loading=\"lazy\" attribute for performance".to_string());
    }
    let blocking = report.resources.render_blocking;
    if blocking > MOBILE_RENDER_BLOCKING_LIMIT {
        report
            .warnings
            .push(format!("{blocking} render-blocking scripts found"));
        report
            .recommendations
            .push("Add async or defer attributes to non-critical scripts".to_string());
    }
}

/// 100, minus 15 per issue and 5 per warning, plus practice bonuses, clamped to 0..=100.
pub fn score(report: &MobileReport) -> i32 {
    let mut score = 100
        - MOBILE_ISSUE_PENALTY * report.issues.len() as i32
        - MOBILE_WARNING_PENALTY * report.warnings.len() as i32;
    if report.viewport.present {
        score += MOBILE_PRACTICE_BONUS;
    }
    if report.responsive.media_queries.found {
        score += MOBILE_PRACTICE_BONUS;
    }
    score.clamp(0, 100)
}

/// Check-specific advice followed by the general follow-ups.
pub fn recommendations(report: &MobileReport) -> Vec<String> {
    let mut out = report.recommendations.clone();

    if !report.viewport.present {
        out.insert(0, VIEWPORT_RECOMMENDATION.to_string());
    }
    if !report.responsive.media_queries.found {
        out.push("Implement responsive design with CSS media queries".to_string());
    }
    if report.usability.touch_targets.too_small > 0 {
        out.push("Increase touch target sizes to at least 48x48 CSS pixels".to_string());
    }
    if report.resources.render_blocking > 0 {
        out.push("Optimize JavaScript delivery for faster mobile loading".to_string());
    }
    if report.issues.is_empty() && report.warnings.len() < 3 {
        out.extend(
            [
                "Consider implementing Progressive Web App (PWA) features",
                "Test with real devices across different screen sizes",
                "Monitor Core Web Vitals specifically for mobile users",
            ]
            .map(String::from),
        );
    }
    out
}

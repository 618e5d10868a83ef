//! Meta/content deduction table.

use super::types::{Assessment, PageSignals};
use crate::config::{
    DESCRIPTION_LENGTH_PENALTY, DESCRIPTION_MAX_LENGTH, DESCRIPTION_MIN_LENGTH, GENERIC_TITLES,
    GENERIC_TITLE_PENALTY, MALFORMED_CANONICAL_PENALTY, MISSING_ALT_PENALTY_CAP,
    MISSING_ALT_PENALTY_PER_IMAGE, MISSING_CANONICAL_PENALTY, MISSING_DESCRIPTION_PENALTY,
    MISSING_DIMENSIONS_PENALTY_CAP, MISSING_DIMENSIONS_PENALTY_PER_IMAGE, MISSING_H1_PENALTY,
    MISSING_OPEN_GRAPH_PENALTY, MISSING_TITLE_PENALTY, MISSING_TWITTER_PENALTY,
    MISSING_VIEWPORT_PENALTY, MULTIPLE_H1_PENALTY, SKIPPED_H2_PENALTY, TITLE_LENGTH_PENALTY,
    TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};
use crate::fetch::is_absolute_http_url;

const KEY_OPEN_GRAPH_TAGS: &[&str] = &["og:title", "og:description", "og:image"];

/// Applies every rule to `signals`, starting from 100 points.
pub fn assess(signals: &PageSignals) -> Assessment {
    let mut a = Assessment {
        score: 100,
        ..Default::default()
    };
    check_title(signals, &mut a);
    check_description(signals, &mut a);
    check_robots(signals, &mut a);
    check_viewport(signals, &mut a);
    check_social(signals, &mut a);
    check_canonical(signals, &mut a);
    check_headings(signals, &mut a);
    check_images(signals, &mut a);
    check_links(signals, &mut a);
    a
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn check_title(signals: &PageSignals, a: &mut Assessment) {
    let Some(title) = non_empty(&signals.meta.title) else {
        a.issues.push("Missing title tag".to_string());
        a.recommendations
            .push("Add a unique, descriptive title tag".to_string());
        a.score -= MISSING_TITLE_PENALTY;
        return;
    };

    let length = title.chars().count();
    if length < TITLE_MIN_LENGTH {
        a.warnings.push(format!(
            "Title too short ({length} characters, recommended {TITLE_MIN_LENGTH}-{TITLE_MAX_LENGTH})"
        ));
        a.score -= TITLE_LENGTH_PENALTY;
    } else if length > TITLE_MAX_LENGTH {
        a.warnings.push(format!(
            "Title too long ({length} characters, recommended {TITLE_MIN_LENGTH}-{TITLE_MAX_LENGTH})"
        ));
        a.score -= TITLE_LENGTH_PENALTY;
    }

    if GENERIC_TITLES
        .iter()
        .any(|generic| title.eq_ignore_ascii_case(generic))
    {
        a.issues.push(format!("Generic title \"{title}\""));
        a.recommendations
            .push("Replace the generic title with one describing the page".to_string());
        a.score -= GENERIC_TITLE_PENALTY;
    }
}

fn check_description(signals: &PageSignals, a: &mut Assessment) {
    let Some(description) = non_empty(&signals.meta.description) else {
        a.issues.push("Missing meta description".to_string());
        a.recommendations
            .push("Add a meta description summarising the page".to_string());
        a.score -= MISSING_DESCRIPTION_PENALTY;
        return;
    };

    let length = description.chars().count();
    if length < DESCRIPTION_MIN_LENGTH {
        a.warnings.push(format!(
            "Meta description too short ({length} characters, recommended {DESCRIPTION_MIN_LENGTH}-{DESCRIPTION_MAX_LENGTH})"
        ));
        a.score -= DESCRIPTION_LENGTH_PENALTY;
    } else if length > DESCRIPTION_MAX_LENGTH {
        a.warnings.push(format!(
            "Meta description too long ({length} characters, recommended {DESCRIPTION_MIN_LENGTH}-{DESCRIPTION_MAX_LENGTH})"
        ));
        a.score -= DESCRIPTION_LENGTH_PENALTY;
    }
}

// Directives are reported but not deducted
fn check_robots(signals: &PageSignals, a: &mut Assessment) {
    let Some(robots) = signals.meta.robots.as_deref() else {
        return;
    };
    let robots = robots.to_ascii_lowercase();
    if robots.contains("noindex") {
        a.warnings
            .push("Page is set to noindex; make sure this is intentional".to_string());
    }
    if robots.contains("nofollow") {
        a.warnings
            .push("Page is set to nofollow; links will not pass equity".to_string());
    }
}

fn check_viewport(signals: &PageSignals, a: &mut Assessment) {
    let Some(viewport) = signals.meta.viewport.as_deref() else {
        a.issues.push("Missing viewport meta tag".to_string());
        a.recommendations.push(
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
                .to_string(),
        );
        a.score -= MISSING_VIEWPORT_PENALTY;
        return;
    };

    let compact: String = viewport
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if !compact.contains("width=device-width") {
        a.warnings
            .push("Viewport should include width=device-width".to_string());
    }
    if !compact.contains("initial-scale=1") {
        a.warnings
            .push("Viewport should include initial-scale=1".to_string());
    }
}

fn check_social(signals: &PageSignals, a: &mut Assessment) {
    let og = &signals.meta.open_graph;
    if og.is_empty() {
        a.warnings.push("No Open Graph tags found".to_string());
        a.recommendations
            .push("Add og:title, og:description and og:image for social sharing".to_string());
        a.score -= MISSING_OPEN_GRAPH_PENALTY;
    } else {
        for tag in KEY_OPEN_GRAPH_TAGS {
            if !og.contains_key(*tag) {
                a.warnings.push(format!("Missing {tag} tag"));
            }
        }
    }

    if signals.meta.twitter.is_empty() {
        a.warnings.push("No Twitter Card tags found".to_string());
        a.score -= MISSING_TWITTER_PENALTY;
    }
}

fn check_canonical(signals: &PageSignals, a: &mut Assessment) {
    match signals.meta.canonical.as_deref() {
        None => {
            a.warnings.push("Missing canonical URL".to_string());
            a.recommendations
                .push("Add a canonical link to prevent duplicate content issues".to_string());
            a.score -= MISSING_CANONICAL_PENALTY;
        }
        Some(href) if !is_absolute_http_url(href) => {
            a.issues.push(format!("Malformed canonical URL: \"{href}\""));
            a.score -= MALFORMED_CANONICAL_PENALTY;
        }
        Some(_) => {}
    }
}

fn check_headings(signals: &PageSignals, a: &mut Assessment) {
    let headings = &signals.headings;
    match headings.h1.len() {
        0 => {
            a.issues.push("Missing H1 tag".to_string());
            a.recommendations
                .push("Add exactly one H1 describing the page".to_string());
            a.score -= MISSING_H1_PENALTY;
        }
        1 => {}
        count => {
            a.warnings.push(format!(
                "Multiple H1 tags found ({count}); use a single H1 per page"
            ));
            a.score -= MULTIPLE_H1_PENALTY;
        }
    }

    if !headings.h3.is_empty() && headings.h2.is_empty() {
        a.warnings
            .push("H3 tags found without any H2; keep the heading hierarchy".to_string());
        a.score -= SKIPPED_H2_PENALTY;
    }
}

fn check_images(signals: &PageSignals, a: &mut Assessment) {
    let without_alt = signals.images.without_alt;
    if without_alt > 0 {
        a.issues
            .push(format!("{without_alt} images missing alt text"));
        a.recommendations
            .push("Describe every image with an alt attribute".to_string());
        a.score -= (without_alt as i32)
            .saturating_mul(MISSING_ALT_PENALTY_PER_IMAGE)
            .min(MISSING_ALT_PENALTY_CAP);
    }

    let missing_dimensions = signals.images.missing_dimensions();
    if missing_dimensions > 0 {
        a.warnings.push(format!(
            "{missing_dimensions} images missing width/height attributes"
        ));
        a.score -= (missing_dimensions as i32)
            .saturating_mul(MISSING_DIMENSIONS_PENALTY_PER_IMAGE)
            .min(MISSING_DIMENSIONS_PENALTY_CAP);
    }
}

fn check_links(signals: &PageSignals, a: &mut Assessment) {
    let count = signals.links.external_without_rel;
    if count > 0 {
        a.warnings.push(format!(
            "{count} external links missing rel=\"nofollow\" or rel=\"noopener\""
        ));
    }
}

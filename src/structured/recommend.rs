//! Schema suggestions by page type.

use super::types::{PageType, SchemaFormat, SchemaRecord};
use super::validate::SchemaType;

pub const NO_STRUCTURED_DATA: &str =
    "No structured data found. Add schema markup to improve search appearance";
pub const PREFER_JSON_LD: &str =
    "Use JSON-LD for structured data; it is the format preferred by search engines";

/// Buckets a page by URL path, falling back to the schema types already present.
pub fn classify_page(url: &str, records: &[SchemaRecord]) -> PageType {
    let lower = url.to_lowercase();
    // Match against the path so host names like "shop.example.com" don't count
    let path = match url::Url::parse(&lower) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => lower,
    };
    let any = |needles: &[&str]| needles.iter().any(|n| path.contains(n));

    if path.ends_with('/') || path.contains("/home") {
        PageType::Homepage
    } else if any(&["/product", "/item"]) {
        PageType::Product
    } else if any(&["/article", "/blog"]) {
        PageType::Article
    } else if any(&["/category", "/shop"]) {
        PageType::Category
    } else if path.contains("/faq") {
        PageType::Faq
    } else if any(&["/contact", "/location"]) {
        PageType::Local
    } else if path.contains("/event") {
        PageType::Event
    } else {
        let types: Vec<SchemaType> = records
            .iter()
            .map(|r| SchemaType::from_name(&r.schema_type))
            .collect();
        if types.contains(&SchemaType::Product) {
            PageType::Product
        } else if types.iter().any(SchemaType::is_article) {
            PageType::Article
        } else {
            PageType::General
        }
    }
}

/// Suggested schema types for a bucket, in priority order.
pub fn suggested_schemas(page_type: PageType) -> &'static [&'static str] {
    match page_type {
        PageType::Homepage | PageType::General => &["Organization", "WebSite", "SearchAction"],
        PageType::Product => &["Product", "Offer", "AggregateRating", "Review"],
        PageType::Article => &["Article", "NewsArticle", "BlogPosting", "BreadcrumbList"],
        PageType::Category => &["BreadcrumbList", "ItemList", "CollectionPage"],
        PageType::Faq => &["FAQPage", "Question", "Answer"],
        PageType::Local => &[
            "LocalBusiness",
            "PostalAddress",
            "GeoCoordinates",
            "OpeningHoursSpecification",
        ],
        PageType::Event => &["Event", "Place", "Offer"],
    }
}

/// Recommendations for the page at `url` given the records found on it.
pub fn recommend(url: &str, records: &[SchemaRecord]) -> Vec<String> {
    let page_type = classify_page(url, records);
    let found: Vec<String> = records
        .iter()
        .map(|r| r.schema_type.to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut recommendations: Vec<String> = suggested_schemas(page_type)
        .iter()
        .filter(|suggestion| {
            let suggestion = suggestion.to_lowercase();
            !found.iter().any(|t| suggestion.contains(t.as_str()))
        })
        .map(|suggestion| format!("Consider adding {suggestion} schema"))
        .collect();

    if records.is_empty() {
        recommendations.push(NO_STRUCTURED_DATA.to_string());
    }
    if !records.iter().any(|r| r.format == SchemaFormat::JsonLd) {
        recommendations.push(PREFER_JSON_LD.to_string());
    }
    recommendations
}

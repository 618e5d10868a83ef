//! Per-type schema.org rule sets.
//!
//! Each validator is a pure function from a record to [`Findings`]; a page's
//! findings are the in-order fold of every record's findings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::types::{Findings, SchemaRecord};
use crate::config::SEARCH_TERM_PLACEHOLDER;

/// schema.org types with a registered rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Organization,
    LocalBusiness,
    Product,
    Article,
    BlogPosting,
    NewsArticle,
    BreadcrumbList,
    FaqPage,
    Recipe,
    Event,
    Person,
    WebSite,
    SearchAction,
    /// Anything else. Left unvalidated.
    Other,
}

impl SchemaType {
    /// Case-insensitive lookup of a schema.org type name.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "organization" => SchemaType::Organization,
            "localbusiness" => SchemaType::LocalBusiness,
            "product" => SchemaType::Product,
            "article" => SchemaType::Article,
            "blogposting" => SchemaType::BlogPosting,
            "newsarticle" => SchemaType::NewsArticle,
            "breadcrumblist" => SchemaType::BreadcrumbList,
            "faqpage" => SchemaType::FaqPage,
            "recipe" => SchemaType::Recipe,
            "event" => SchemaType::Event,
            "person" => SchemaType::Person,
            "website" => SchemaType::WebSite,
            "searchaction" => SchemaType::SearchAction,
            _ => SchemaType::Other,
        }
    }

    pub fn is_article(&self) -> bool {
        matches!(
            self,
            SchemaType::Article | SchemaType::BlogPosting | SchemaType::NewsArticle
        )
    }
}

/// Validates every record, returning the combined findings in record order.
pub fn validate(records: &[SchemaRecord]) -> Findings {
    records
        .iter()
        .map(validate_record)
        .fold(Findings::default(), Findings::merge)
}

/// Applies the rule set registered for the record's type.
pub fn validate_record(record: &SchemaRecord) -> Findings {
    let mut findings = Findings::default();
    match SchemaType::from_name(&record.schema_type) {
        SchemaType::Organization | SchemaType::LocalBusiness => {
            validate_organization(record, &mut findings)
        }
        SchemaType::Product => validate_product(record, &mut findings),
        SchemaType::Article | SchemaType::BlogPosting | SchemaType::NewsArticle => {
            validate_article(record, &mut findings)
        }
        SchemaType::BreadcrumbList => validate_breadcrumb(record, &mut findings),
        SchemaType::FaqPage => validate_faq(record, &mut findings),
        SchemaType::Recipe => validate_recipe(record, &mut findings),
        SchemaType::Event => validate_event(record, &mut findings),
        SchemaType::Person => validate_person(record, &mut findings),
        SchemaType::WebSite => validate_website(record, &mut findings),
        SchemaType::SearchAction => validate_search_action(record, &mut findings),
        SchemaType::Other => {
            log::debug!("No rules for schema type '{}'", record.schema_type);
        }
    }
    findings
}

/// One error per absent property.
fn require_properties(record: &SchemaRecord, names: &[&str], findings: &mut Findings) {
    for name in names.iter().filter(|name| !record.has(name)) {
        findings.error(format!(
            "{} missing required property: {}",
            record.schema_type, name
        ));
    }
}

/// A single warning listing every absent property.
fn recommend_properties(record: &SchemaRecord, names: &[&str], findings: &mut Findings) {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !record.has(name))
        .collect();
    if !missing.is_empty() {
        findings.warning(format!(
            "{} missing recommended properties: {}",
            record.schema_type,
            missing.join(", ")
        ));
    }
}

/// Singular-or-list value as a list; `null` is empty.
fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|o| o.contains_key(key))
}

/// ISO 8601 date or date-time, with or without an offset.
pub fn is_iso_date(value: &Value) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    let text = text.trim();
    DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").is_ok()
        || DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%:z").is_ok()
        || DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z").is_ok()
}

fn validate_organization(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["name", "url"], findings);
    recommend_properties(record, &["logo", "sameAs", "contactPoint", "address"], findings);

    if record.get("logo").is_some_and(Value::is_string) {
        findings.warning(format!(
            "{}: logo should be an ImageObject with width and height",
            record.schema_type
        ));
    }
}

fn validate_product(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["name", "image"], findings);
    recommend_properties(
        record,
        &[
            "description",
            "sku",
            "offers",
            "aggregateRating",
            "brand",
            "review",
        ],
        findings,
    );

    if let Some(offers) = record.get("offers") {
        for (index, offer) in as_list(offers).into_iter().enumerate() {
            if !has_key(offer, "price") && !has_key(offer, "priceRange") {
                findings.error(format!(
                    "Product offer {index} missing required property: price or priceRange"
                ));
            }
            if !has_key(offer, "priceCurrency") {
                findings.error(format!(
                    "Product offer {index} missing required property: priceCurrency"
                ));
            }
        }
    }

    if !record.has("aggregateRating") && !record.has("review") {
        findings.warning(
            "Product: add aggregateRating or review to be eligible for review rich results",
        );
    }
}

fn validate_article(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["headline", "image", "author", "datePublished"], findings);
    recommend_properties(
        record,
        &["dateModified", "publisher", "mainEntityOfPage", "description"],
        findings,
    );

    if record.get("image").is_some_and(|image| as_list(image).is_empty()) {
        findings.error(format!(
            "{}: image must contain at least one image",
            record.schema_type
        ));
    }
    if record.get("datePublished").is_some_and(|d| !is_iso_date(d)) {
        findings.error(format!(
            "{}: datePublished is not a valid date (use ISO 8601)",
            record.schema_type
        ));
    }
}

fn validate_breadcrumb(record: &SchemaRecord, findings: &mut Findings) {
    let Some(items) = record.get("itemListElement") else {
        require_properties(record, &["itemListElement"], findings);
        return;
    };
    for (index, item) in as_list(items).into_iter().enumerate() {
        if !has_key(item, "position") {
            findings.error(format!(
                "BreadcrumbList item {index} missing required property: position"
            ));
        }
        if !has_key(item, "name") {
            findings.error(format!(
                "BreadcrumbList item {index} missing required property: name"
            ));
        }
    }
}

fn validate_faq(record: &SchemaRecord, findings: &mut Findings) {
    let Some(questions) = record.get("mainEntity") else {
        require_properties(record, &["mainEntity"], findings);
        return;
    };
    for (index, question) in as_list(questions).into_iter().enumerate() {
        if !has_key(question, "name") {
            findings.error(format!(
                "FAQPage question {index} missing required property: name"
            ));
        }
        match question.get("acceptedAnswer") {
            None => findings.error(format!(
                "FAQPage question {index} missing required property: acceptedAnswer"
            )),
            Some(answer) => {
                let answers = as_list(answer);
                if answers.is_empty() || !answers.iter().all(|a| has_key(a, "text")) {
                    findings.error(format!(
                        "FAQPage question {index} acceptedAnswer missing required property: text"
                    ));
                }
            }
        }
    }
}

fn validate_recipe(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(
        record,
        &["name", "image", "recipeIngredient", "recipeInstructions"],
        findings,
    );
    recommend_properties(
        record,
        &[
            "prepTime",
            "cookTime",
            "totalTime",
            "recipeYield",
            "nutrition",
            "aggregateRating",
            "author",
            "description",
        ],
        findings,
    );
}

fn validate_event(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["name", "startDate", "location"], findings);
    recommend_properties(
        record,
        &["endDate", "description", "image", "performer", "offers"],
        findings,
    );

    if record.get("startDate").is_some_and(|d| !is_iso_date(d)) {
        findings.error("Event: startDate is not a valid date (use ISO 8601)");
    }
}

fn validate_person(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["name"], findings);
    recommend_properties(
        record,
        &["image", "jobTitle", "worksFor", "sameAs", "url"],
        findings,
    );
}

fn validate_website(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["name", "url"], findings);
    recommend_properties(record, &["potentialAction", "publisher"], findings);

    if !record.has("potentialAction") {
        findings.warning(
            "WebSite: add a potentialAction SearchAction to enable the sitelinks searchbox",
        );
    }
}

fn validate_search_action(record: &SchemaRecord, findings: &mut Findings) {
    require_properties(record, &["target", "query-input"], findings);

    if let Some(target) = record.get("target").and_then(Value::as_str) {
        if !target.contains(SEARCH_TERM_PLACEHOLDER) {
            findings.error(format!(
                "SearchAction: target must contain the {SEARCH_TERM_PLACEHOLDER} placeholder"
            ));
        }
    }
}

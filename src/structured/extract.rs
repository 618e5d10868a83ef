//! JSON-LD, Microdata and RDFa harvesting.

use serde_json::{Map, Value};

use super::types::{ExtractedSchemas, Findings, SchemaFormat, SchemaRecord};
use crate::dom::DomNode;

const JSON_LD_MIME: &str = "application/ld+json";
const SCHEMA_ORG_MARKER: &str = "schema.org/";
const DEFAULT_RDFA_VOCAB: &str = "http://schema.org/";

/// Harvests every structured-data record under `root`.
///
/// JSON-LD decode failures are recorded in the returned [`Findings`] and do not
/// stop extraction of the remaining blocks or formats.
pub fn extract<N: DomNode>(root: &N) -> (ExtractedSchemas, Findings) {
    let nodes = self_and_descendants(root);
    let mut findings = Findings::default();

    let json_ld = extract_json_ld(&nodes, &mut findings);
    let microdata = extract_microdata(&nodes);
    let rdfa = extract_rdfa(&nodes);

    log::debug!(
        "Extracted {} JSON-LD, {} Microdata, {} RDFa records",
        json_ld.len(),
        microdata.len(),
        rdfa.len()
    );

    (
        ExtractedSchemas {
            json_ld,
            microdata,
            rdfa,
        },
        findings,
    )
}

fn self_and_descendants<N: DomNode>(root: &N) -> Vec<N> {
    let mut nodes = vec![root.clone()];
    nodes.extend(root.descendants());
    nodes
}

fn is_json_ld_script<N: DomNode>(node: &N) -> bool {
    node.is_tag("script")
        && node
            .attribute("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_MIME))
}

fn extract_json_ld<N: DomNode>(nodes: &[N], findings: &mut Findings) -> Vec<SchemaRecord> {
    let mut records = Vec::new();
    for script in nodes.iter().filter(|n| is_json_ld_script(*n)) {
        let payload = script.text_content();
        let payload = payload.trim();
        if payload.is_empty() {
            log::debug!("Skipping empty JSON-LD block");
            continue;
        }
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => records.extend(json_ld_records(&value)),
            Err(e) => {
                log::warn!("Invalid JSON-LD block: {}", e);
                findings.error(format!("Invalid JSON-LD: {e}"));
            }
        }
    }
    records
}

/// Decodes a JSON-LD payload (object, array of objects, or `@graph`) into records.
pub fn json_ld_records(value: &Value) -> Vec<SchemaRecord> {
    match value {
        Value::Object(object) => object_records(object, None),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|object| object_records(object, None))
            .collect(),
        _ => {
            log::debug!("Ignoring JSON-LD payload that is neither object nor array");
            Vec::new()
        }
    }
}

fn object_records(object: &Map<String, Value>, inherited_context: Option<&str>) -> Vec<SchemaRecord> {
    let context = object
        .get("@context")
        .and_then(Value::as_str)
        .or(inherited_context);

    // A bare @graph container carries its records as a list
    if !object.contains_key("@type") {
        if let Some(graph) = object.get("@graph").and_then(Value::as_array) {
            return graph
                .iter()
                .filter_map(Value::as_object)
                .flat_map(|node| object_records(node, context))
                .collect();
        }
    }

    let mut record = SchemaRecord::new(SchemaFormat::JsonLd, json_ld_type(object));
    record.context = context.map(str::to_string);
    record.properties = object
        .iter()
        .filter(|(key, _)| !key.starts_with('@'))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    vec![record]
}

fn json_ld_type(object: &Map<String, Value>) -> String {
    match object.get("@type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .find_map(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        _ => "Unknown".to_string(),
    }
}

fn extract_microdata<N: DomNode>(nodes: &[N]) -> Vec<SchemaRecord> {
    nodes
        .iter()
        .filter(|n| n.has_attribute("itemscope"))
        .map(|scope| {
            let mut record = SchemaRecord::new(SchemaFormat::Microdata, microdata_type(scope));
            collect_item_properties(scope, &mut record.properties);
            record
        })
        .collect()
}

/// Type name after the last `schema.org/` in `itemtype`, `"Thing"` otherwise.
fn microdata_type<N: DomNode>(scope: &N) -> String {
    scope
        .attribute("itemtype")
        .and_then(|t| t.split_whitespace().next())
        .and_then(|t| {
            t.rfind(SCHEMA_ORG_MARKER)
                .map(|i| &t[i + SCHEMA_ORG_MARKER.len()..])
        })
        .map(|t| t.trim_matches('/'))
        .filter(|t| !t.is_empty())
        .unwrap_or("Thing")
        .to_string()
}

/// Walks below `scope`, stopping at nested item scopes.
fn collect_item_properties<N: DomNode>(scope: &N, properties: &mut Map<String, Value>) {
    for child in scope.element_children() {
        let nested = child.has_attribute("itemscope");
        if let Some(names) = child.attribute("itemprop") {
            let value = if nested {
                nested_item(&child)
            } else {
                Value::String(microdata_value(&child))
            };
            for name in names.split_whitespace() {
                insert_property(properties, name, value.clone());
            }
        }
        if !nested {
            collect_item_properties(&child, properties);
        }
    }
}

fn nested_item<N: DomNode>(scope: &N) -> Value {
    let mut object = Map::new();
    object.insert("@type".to_string(), Value::String(microdata_type(scope)));
    collect_item_properties(scope, &mut object);
    Value::Object(object)
}

fn microdata_value<N: DomNode>(node: &N) -> String {
    node.attribute("content")
        .or_else(|| node.attribute("src"))
        .or_else(|| node.attribute("href"))
        .map(str::to_string)
        .unwrap_or_else(|| node.text_content().trim().to_string())
}

/// First occurrence is stored as-is; a repeat promotes the property to a list.
fn insert_property(properties: &mut Map<String, Value>, name: &str, value: Value) {
    match properties.get_mut(name) {
        None => {
            properties.insert(name.to_string(), value);
        }
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

fn extract_rdfa<N: DomNode>(nodes: &[N]) -> Vec<SchemaRecord> {
    nodes
        .iter()
        .filter_map(|node| node.attribute("typeof").map(|t| (node, t.trim().to_string())))
        .map(|(node, schema_type)| {
            let mut record = SchemaRecord::new(SchemaFormat::Rdfa, schema_type);
            record.context = Some(
                node.attribute("vocab")
                    .unwrap_or(DEFAULT_RDFA_VOCAB)
                    .to_string(),
            );
            for property in node.find_all(|n| n.has_attribute("property")) {
                let Some(name) = property.attribute("property") else {
                    continue;
                };
                let value = property
                    .attribute("content")
                    .map(str::to_string)
                    .unwrap_or_else(|| property.text_content().trim().to_string());
                record
                    .properties
                    .insert(name.trim().to_string(), Value::String(value));
            }
            record
        })
        .collect()
}

//! Single-pass harvesting of meta tags, headings, images and links.

use url::Url;

use super::types::{Headings, ImageInfo, ImageSummary, LinkSummary, MetaTags, PageSignals};
use crate::dom::DomNode;

/// Walks the tree under `root` once, collecting everything the meta audit scores.
///
/// `page_url` decides which links are internal. Hrefs that are empty, pure
/// fragments, or that do not resolve to a URL with a host are skipped.
pub fn extract_signals<N: DomNode>(page_url: &str, root: &N) -> PageSignals {
    let base = Url::parse(page_url).ok();
    let page_host = base
        .as_ref()
        .and_then(|u| u.host_str())
        .map(str::to_ascii_lowercase);

    let mut meta = MetaTags {
        title: document_title(root),
        ..MetaTags::default()
    };
    let mut headings = Headings::default();
    let mut images = Vec::new();
    let mut links = LinkSummary::default();

    for node in root.descendants() {
        match node.tag_name().to_ascii_lowercase().as_str() {
            "meta" => read_meta(&node, &mut meta),
            "link" => {
                if meta.canonical.is_none() && is_canonical_link(&node) {
                    meta.canonical = Some(node.attribute("href").unwrap_or("").trim().to_string());
                }
            }
            "img" => images.push(ImageInfo {
                src: node.attribute("src").map(str::to_string),
                alt: node.attribute("alt").map(str::to_string),
                title: node.attribute("title").map(str::to_string),
                width: node.attribute("width").map(str::to_string),
                height: node.attribute("height").map(str::to_string),
            }),
            "a" => classify_link(&node, base.as_ref(), page_host.as_deref(), &mut links),
            tag => {
                if let Some(level) = heading_level(tag) {
                    if let Some(list) = headings.level_mut(level) {
                        list.push(node.text_content().trim().to_string());
                    }
                }
            }
        }
    }

    let with_alt = images.iter().filter(|i| i.has_alt()).count();
    PageSignals {
        meta,
        headings,
        images: ImageSummary {
            total: images.len(),
            with_alt,
            without_alt: images.len() - with_alt,
            images,
        },
        links,
    }
}

/// First `<title>` outside embedded SVG, whose `<title>` is a tooltip.
fn document_title<N: DomNode>(node: &N) -> Option<String> {
    for child in node.element_children() {
        if child.is_tag("svg") {
            continue;
        }
        if child.is_tag("title") {
            return Some(child.text_content().trim().to_string());
        }
        if let Some(title) = document_title(&child) {
            return Some(title);
        }
    }
    None
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn read_meta<N: DomNode>(node: &N, meta: &mut MetaTags) {
    if meta.charset.is_none() {
        if let Some(charset) = node.attribute("charset") {
            meta.charset = Some(charset.trim().to_string());
        }
    }

    let content = node.attribute("content").unwrap_or("").trim().to_string();

    if let Some(property) = node.attribute("property").map(str::trim) {
        let key = property.to_ascii_lowercase();
        if key.starts_with("og:") {
            meta.open_graph.entry(key).or_insert_with(|| content.clone());
        } else if key.starts_with("twitter:") {
            meta.twitter.entry(key).or_insert_with(|| content.clone());
        }
    }

    let Some(name) = node.attribute("name").map(|n| n.trim().to_ascii_lowercase()) else {
        return;
    };
    let slot = match name.as_str() {
        "description" => &mut meta.description,
        "keywords" => &mut meta.keywords,
        "robots" => &mut meta.robots,
        "viewport" => &mut meta.viewport,
        _ => {
            if name.starts_with("twitter:") {
                meta.twitter.entry(name.clone()).or_insert(content);
            }
            return;
        }
    };
    if slot.is_none() {
        *slot = Some(content);
    }
}

fn is_canonical_link<N: DomNode>(node: &N) -> bool {
    node.attribute("rel").is_some_and(|rel| {
        rel.split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("canonical"))
    })
}

fn classify_link<N: DomNode>(
    node: &N,
    base: Option<&Url>,
    page_host: Option<&str>,
    links: &mut LinkSummary,
) {
    let href = node.attribute("href").unwrap_or("").trim();
    if href.is_empty() || href.starts_with('#') {
        return;
    }

    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    let Ok(resolved) = resolved else {
        log::debug!("Skipping malformed href: {}", href);
        return;
    };
    let Some(host) = resolved.host_str().map(str::to_ascii_lowercase) else {
        return;
    };

    links.total += 1;
    if page_host == Some(host.as_str()) {
        links.internal += 1;
        return;
    }

    links.external += 1;
    let qualified = node.attribute("rel").is_some_and(|rel| {
        rel.split_whitespace().any(|token| {
            token.eq_ignore_ascii_case("nofollow") || token.eq_ignore_ascii_case("noopener")
        })
    });
    if !qualified {
        links.external_without_rel += 1;
    }
}

//! Streaming sitemap reader built on quick-xml.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::types::{ParsedSitemap, SitemapEntry, SitemapKind};
use crate::error_handling::SitemapParseError;

#[derive(Clone, Copy)]
enum Field {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"loc" => Some(Field::Loc),
            b"lastmod" => Some(Field::Lastmod),
            b"changefreq" => Some(Field::Changefreq),
            b"priority" => Some(Field::Priority),
            _ => None,
        }
    }
}

fn set_field(entry: &mut SitemapEntry, field: Field, text: &str) {
    let value = Some(text.trim().to_string()).filter(|t| !t.is_empty());
    match field {
        Field::Loc => entry.loc = value,
        Field::Lastmod => entry.lastmod = value,
        Field::Changefreq => entry.changefreq = value,
        Field::Priority => entry.priority = value,
    }
}

/// Parses a `<urlset>` or `<sitemapindex>` document.
///
/// Only direct children of each entry are read, so extension elements such as
/// `<image:loc>` inside `<image:image>` do not override the page `<loc>`.
/// Namespace prefixes are ignored.
///
/// # Errors
///
/// - `SitemapParseError::Xml` for malformed XML (mismatched tags, bad escapes)
/// - `SitemapParseError::UnknownFormat` if the root is not a sitemap element
pub fn parse_sitemap(xml: &str) -> Result<ParsedSitemap, SitemapParseError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut kind = SitemapKind::Unknown;
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<SitemapEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                match depth {
                    1 => {
                        kind = match name.as_ref() {
                            b"urlset" => SitemapKind::UrlSitemap,
                            b"sitemapindex" => SitemapKind::SitemapIndex,
                            _ => return Err(SitemapParseError::UnknownFormat),
                        };
                    }
                    2 => {
                        let entry_tag: &[u8] = match kind {
                            SitemapKind::SitemapIndex => b"sitemap",
                            _ => b"url",
                        };
                        if name.as_ref() == entry_tag {
                            current = Some(SitemapEntry::default());
                        }
                    }
                    3 if current.is_some() => {
                        field = Field::from_local_name(name.as_ref());
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) if depth == 1 => {
                // `<url/>` still counts as an entry, just without a location
                let entry_tag: &[u8] = match kind {
                    SitemapKind::SitemapIndex => b"sitemap",
                    _ => b"url",
                };
                if e.local_name().as_ref() == entry_tag {
                    entries.push(SitemapEntry::default());
                }
            }
            Ok(Event::Empty(e)) if depth == 0 => {
                kind = match e.local_name().as_ref() {
                    b"urlset" => SitemapKind::UrlSitemap,
                    b"sitemapindex" => SitemapKind::SitemapIndex,
                    _ => return Err(SitemapParseError::UnknownFormat),
                };
            }
            Ok(Event::Text(e)) if field.is_some() => {
                let unescaped = e
                    .unescape()
                    .map_err(|err| SitemapParseError::Xml(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(_)) => {
                match depth {
                    3 => {
                        if let (Some(entry), Some(f)) = (current.as_mut(), field.take()) {
                            set_field(entry, f, &text);
                        }
                    }
                    2 => {
                        if let Some(entry) = current.take() {
                            entries.push(entry);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SitemapParseError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if kind == SitemapKind::Unknown {
        return Err(SitemapParseError::UnknownFormat);
    }

    Ok(ParsedSitemap { kind, entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc> https://example.com/ </loc>
    <lastmod>2024-01-15</lastmod>
    <changefreq>weekly</changefreq>
    <priority>0.8</priority>
  </url>
  <url><loc>https://example.com/a?x=1&amp;y=2</loc></url>
</urlset>"#;
        let parsed = parse_sitemap(xml).expect("valid sitemap");
        assert_eq!(parsed.kind, SitemapKind::UrlSitemap);
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].loc.as_deref(), Some("https://example.com/"));
        assert_eq!(parsed.entries[0].lastmod.as_deref(), Some("2024-01-15"));
        assert_eq!(parsed.entries[0].changefreq.as_deref(), Some("weekly"));
        assert_eq!(parsed.entries[0].priority.as_deref(), Some("0.8"));
        assert_eq!(
            parsed.entries[1].loc.as_deref(),
            Some("https://example.com/a?x=1&y=2")
        );
        assert!(parsed.entries[1].lastmod.is_none());
    }

    #[test]
    fn test_parse_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/posts.xml</loc><lastmod>2024-02-01T10:00:00+00:00</lastmod></sitemap>
  <sitemap><loc>https://example.com/pages.xml</loc></sitemap>
</sitemapindex>"#;
        let parsed = parse_sitemap(xml).expect("valid index");
        assert_eq!(parsed.kind, SitemapKind::SitemapIndex);
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(
            parsed.entries[0].lastmod.as_deref(),
            Some("2024-02-01T10:00:00+00:00")
        );
    }

    #[test]
    fn test_image_extension_does_not_override_loc() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/page</loc>
    <image:image><image:loc>https://example.com/photo.jpg</image:loc></image:image>
  </url>
</urlset>"#;
        let parsed = parse_sitemap(xml).expect("valid sitemap");
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].loc.as_deref(), Some("https://example.com/page"));
    }

    #[test]
    fn test_missing_and_empty_loc() {
        let xml = "<urlset><url><lastmod>2024-01-01</lastmod></url><url><loc>  </loc></url><url/></urlset>";
        let parsed = parse_sitemap(xml).expect("valid sitemap");
        assert_eq!(parsed.entries.len(), 3);
        assert!(parsed.entries.iter().all(|e| e.loc.is_none()));
    }

    #[test]
    fn test_cdata_loc() {
        let xml = "<urlset><url><loc><![CDATA[https://example.com/c]]></loc></url></urlset>";
        let parsed = parse_sitemap(xml).expect("valid sitemap");
        assert_eq!(parsed.entries[0].loc.as_deref(), Some("https://example.com/c"));
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_sitemap("<urlset><url><loc>https://example.com/</loc></urlset>")
            .expect_err("mismatched end tag");
        assert!(matches!(err, SitemapParseError::Xml(_)));
        assert!(err.to_string().starts_with("XML parsing error"));
    }

    #[test]
    fn test_unknown_root() {
        assert_eq!(
            parse_sitemap("<html><body>Not a sitemap</body></html>"),
            Err(SitemapParseError::UnknownFormat)
        );
        assert_eq!(parse_sitemap(""), Err(SitemapParseError::UnknownFormat));
    }
}

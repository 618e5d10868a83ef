//! Standalone HTML reports.

use std::fmt::Write;

use super::Renderable;

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 40px; }
.header { background: #f0f0f0; padding: 20px; }
.section { margin: 20px 0; padding: 20px; background: #f9f9f9; }
.error { color: #d32f2f; }
.warning { color: #f57c00; }
.recommendation { color: #1565c0; }
.footer { margin-top: 40px; text-align: center; color: #666; }";

/// Escapes text for element content and double-quoted attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html<T: Renderable>(value: &T) -> String {
    let title = escape_html(&value.title());
    let mut html = String::new();

    // Writing to a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<h1>{title}</h1>\n<dl>\n"
    );
    for (key, val) in value.summary() {
        let _ = writeln!(
            html,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(key),
            escape_html(&val)
        );
    }
    html.push_str("</dl>\n</div>\n");

    for section in value.sections() {
        if section.items.is_empty() {
            continue;
        }
        let class = section.kind.css_class();
        let _ = writeln!(
            html,
            "<div class=\"section\">\n<h2>{}</h2>\n<ul class=\"{class}\">",
            escape_html(&section.heading)
        );
        let (shown, hidden) = section.visible_items();
        for item in shown {
            let _ = writeln!(html, "<li>{}</li>", escape_html(item));
        }
        if hidden > 0 {
            let _ = writeln!(html, "<li>... and {hidden} more</li>");
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("<div class=\"footer\"><p>Report generated by seo_audit</p></div>\n</body>\n</html>\n");
    html
}

//! Plain text reports.

use super::Renderable;

const RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

pub fn render_text<T: Renderable>(value: &T) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![rule.clone(), value.title(), rule.clone()];

    for (key, val) in value.summary() {
        lines.push(format!("{key}: {val}"));
    }

    for section in value.sections() {
        if section.items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(section.heading.clone());
        lines.push("-".repeat(SECTION_RULE_WIDTH));
        let (shown, hidden) = section.visible_items();
        for item in shown {
            lines.push(format!("  - {item}"));
        }
        if hidden > 0 {
            lines.push(format!("  ... and {hidden} more"));
        }
    }

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

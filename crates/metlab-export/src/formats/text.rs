//! Plain text output. Links are reduced to their labels.

use super::Renderer;
use crate::grouping::StageGroup;
use crate::links::strip_markdown_links;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, groups: &[StageGroup]) -> String {
        let mut out = String::new();
        for group in groups {
            write_group(&mut out, group);
            out.push('\n');
        }
        out
    }
}

/// Upper-cased stage heading, underlined, then `Equipment:` and
/// `Consumables:` lists with reasoning in parentheses.
pub(crate) fn write_group(out: &mut String, group: &StageGroup) {
    let heading = group.stage.label().to_uppercase();
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"-".repeat(heading.chars().count()));
    out.push('\n');

    for (category, items) in group.sections() {
        out.push_str(category.heading());
        out.push_str(":\n");
        for rec in items {
            let reasoning = strip_markdown_links(&rec.reasoning);
            if reasoning.is_empty() {
                out.push_str(&format!("  - {}\n", rec.item_type));
            } else {
                out.push_str(&format!("  - {} ({})\n", rec.item_type, reasoning));
            }
        }
    }
}

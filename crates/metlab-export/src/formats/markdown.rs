//! Markdown output. Reasoning links are kept as written.

use super::{Renderer, INTRODUCTION};
use crate::grouping::StageGroup;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, groups: &[StageGroup]) -> String {
        let mut md = String::from("# Recommended Equipment & Consumables\n\n");
        md.push_str(INTRODUCTION);
        md.push_str("\n\n");

        for group in groups {
            md.push_str(&format!("## {}\n\n", group.stage.label()));
            for (category, items) in group.sections() {
                md.push_str(&format!("### {}\n\n", category.heading()));
                for rec in items {
                    md.push_str(&format!("- **{}**: {}\n", escape_inline(&rec.item_type), rec.reasoning));
                }
                md.push('\n');
            }
        }
        md
    }
}

/// Item types are plain text; keep them from opening emphasis or links.
fn escape_inline(s: &str) -> String {
    s.replace('*', "\\*").replace('[', "\\[").replace(']', "\\]")
}

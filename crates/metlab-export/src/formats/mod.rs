//! Output formats for grouped recommendations.

pub mod markdown;
pub mod text;

pub use markdown::MarkdownRenderer;
pub use text::TextRenderer;

use crate::grouping::StageGroup;

pub(crate) const INTRODUCTION: &str =
    "Based on your specifications, here are general equipment types and consumables appropriate for your use case.";

/// Renders grouped recommendations into a document.
pub trait Renderer: Send + Sync {
    fn name(&self) -> &'static str;
    fn render(&self, groups: &[StageGroup]) -> String;
}

/// Create a renderer by format name.
pub fn create_renderer(format: &str) -> Option<Box<dyn Renderer>> {
    match format {
        "text" => Some(Box::new(TextRenderer)),
        "markdown" | "md" => Some(Box::new(MarkdownRenderer)),
        _ => None,
    }
}

/// All renderer format names.
pub fn available_formats() -> &'static [&'static str] {
    &["text", "markdown"]
}

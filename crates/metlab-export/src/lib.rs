//! Results export: grouping recommendations for display, plain text and
//! markdown rendering, expert-review mail composition, and PDF output.

pub mod formats;
pub mod grouping;
pub mod links;
pub mod pdf;
pub mod review;

pub use formats::{available_formats, create_renderer, Renderer};
pub use grouping::{group_by_stage, StageGroup};
pub use links::strip_markdown_links;
pub use pdf::{export_pdf, pdf_filename, PdfDocument, PdfOptions, PdfReport};
pub use review::{compose_review, ReviewMail, ReviewRequest};

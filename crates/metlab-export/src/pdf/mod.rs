//! PDF export of grouped recommendations, written directly as PDF 1.4
//! with the built-in Helvetica faces.

pub mod document;
pub mod fonts;
pub mod layout;
pub mod text;

use chrono::NaiveDate;

use metlab_core::errors::ExportError;
use metlab_core::models::Recommendation;

use crate::grouping::group_by_stage;

pub use document::{Page, PdfDocument, TextRun};
pub use fonts::Font;
pub use layout::{PdfOptions, PdfReport};
pub use text::clean_text;

/// `{prefix}-YYYY-MM-DD.pdf`
pub fn pdf_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.pdf", date.format("%Y-%m-%d"))
}

/// Groups and lays out `recommendations`. There is nothing to export when
/// the list is empty.
pub fn export_pdf(
    recommendations: &[Recommendation],
    options: &PdfOptions,
) -> Result<PdfDocument, ExportError> {
    if recommendations.is_empty() {
        return Err(ExportError::Empty);
    }
    let groups = group_by_stage(recommendations);
    Ok(PdfReport::render(&groups, options))
}

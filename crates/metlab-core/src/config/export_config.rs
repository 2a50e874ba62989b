//! Results export configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Recipient of expert review requests.
    pub review_recipient: Option<String>,
    /// Site label printed under the PDF title.
    pub site_label: Option<String>,
    /// PDF file name prefix; the date and `.pdf` are appended.
    pub pdf_file_prefix: Option<String>,
}

impl ExportConfig {
    pub fn effective_review_recipient(&self) -> &str {
        self.review_recipient
            .as_deref()
            .unwrap_or(defaults::DEFAULT_REVIEW_RECIPIENT)
    }

    pub fn effective_site_label(&self) -> &str {
        self.site_label.as_deref().unwrap_or(defaults::DEFAULT_SITE_LABEL)
    }

    pub fn effective_pdf_file_prefix(&self) -> &str {
        self.pdf_file_prefix
            .as_deref()
            .unwrap_or(defaults::DEFAULT_PDF_FILE_PREFIX)
    }
}

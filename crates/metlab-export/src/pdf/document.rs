//! Page model and PDF 1.4 serialization.

use std::path::Path;

use chrono::{DateTime, Utc};

use metlab_core::errors::ExportError;

use super::fonts::{Font, PT_PER_MM};
use super::text::{encode_win_ansi, escape_pdf_string};

/// A4 portrait, in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// RGB, 0-255 per channel.
pub type Color = (u8, u8, u8);

/// One line of text placed on a page. `y` is the baseline measured from
/// the top edge, in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

impl Page {
    /// Text of every run on the page, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.runs.iter().map(|r| r.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    pub title: String,
    pub created: DateTime<Utc>,
    pub pages: Vec<Page>,
}

impl PdfDocument {
    pub fn new(title: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            created,
            pages: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serializes the document: catalog, page tree, two font resources,
    /// an info dictionary, then one page object and content stream per
    /// page, followed by the cross-reference table.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        if self.pages.is_empty() {
            return Err(ExportError::Pdf {
                reason: "document has no pages".to_string(),
            });
        }

        const CATALOG: usize = 1;
        const PAGES: usize = 2;
        const INFO: usize = 5;
        let first_page = INFO + 1;
        let page_obj = |i: usize| first_page + i * 2;

        let mut objects: Vec<Vec<u8>> = Vec::new();
        objects.push(format!("<< /Type /Catalog /Pages {PAGES} 0 R >>").into_bytes());

        let kids: Vec<String> = (0..self.pages.len()).map(|i| format!("{} 0 R", page_obj(i))).collect();
        objects.push(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                self.pages.len()
            )
            .into_bytes(),
        );
        for font in Font::ALL {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_name()
                )
                .into_bytes(),
            );
        }
        objects.push(
            format!(
                "<< /Title ({}) /Producer (metlab) /CreationDate (D:{}Z) >>",
                escape_pdf_string(&encode_win_ansi(&self.title)),
                self.created.format("%Y%m%d%H%M%S")
            )
            .into_bytes(),
        );

        let width_pt = PAGE_WIDTH_MM * PT_PER_MM;
        let height_pt = PAGE_HEIGHT_MM * PT_PER_MM;
        for (i, page) in self.pages.iter().enumerate() {
            let content = content_stream(page);
            objects.push(
                format!(
                    "<< /Type /Page /Parent {PAGES} 0 R /MediaBox [0 0 {width_pt:.2} {height_pt:.2}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                    page_obj(i) + 1
                )
                .into_bytes(),
            );
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(&content);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
        }

        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {CATALOG} 0 R /Info {INFO} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        Ok(out)
    }

    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| ExportError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = String::new();
    for run in &page.runs {
        let (r, g, b) = run.color;
        let x = run.x * PT_PER_MM;
        let y = (PAGE_HEIGHT_MM - run.y) * PT_PER_MM;
        out.push_str(&format!(
            "BT /{} {} Tf {:.3} {:.3} {:.3} rg {x:.2} {y:.2} Td ({}) Tj ET\n",
            run.font.resource_name(),
            run.size,
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            escape_pdf_string(&encode_win_ansi(&run.text)),
        ));
    }
    out.into_bytes()
}

//! Lays grouped recommendations out on A4 pages.

use chrono::{DateTime, Utc};
use tracing::debug;

use metlab_core::models::Recommendation;

use super::document::{Color, Page, PdfDocument, TextRun};
use super::fonts::Font;
use super::text::{clean_text, wrap_text};
use crate::formats::INTRODUCTION;
use crate::grouping::StageGroup;
use crate::links::strip_markdown_links;

pub const LEFT_MARGIN: f32 = 20.0;
pub const RIGHT_MARGIN: f32 = 190.0;
pub const PAGE_HEIGHT: f32 = 280.0;
pub const FOOTER_HEIGHT: f32 = 15.0;
pub const LINE_HEIGHT: f32 = 7.0;
pub const TOP: f32 = 20.0;

pub const TITLE: &str = "Lab Builder Recommendations";

const BLUE: Color = (37, 99, 235);
const BLACK: Color = (0, 0, 0);
const GRAY: Color = (100, 100, 100);
const DARK_GRAY: Color = (50, 50, 50);

/// Lines a stage heading needs below it before a break is forced.
const HEADING_KEEP_LINES: f32 = 4.0;
const SECTION_KEEP_LINES: f32 = 6.0;
const ITEM_KEEP_LINES: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub site_label: String,
    pub generated: DateTime<Utc>,
}

/// Cursor-based layout: text flows down from [`TOP`] and a new page starts
/// once the next block would cross into the footer.
pub struct PdfReport {
    doc: PdfDocument,
    y: f32,
}

impl PdfReport {
    pub fn render(groups: &[StageGroup], options: &PdfOptions) -> PdfDocument {
        let mut report = Self {
            doc: PdfDocument::new(TITLE, options.generated),
            y: TOP,
        };
        report.doc.pages.push(Page::default());
        report.header(options);
        for group in groups {
            report.stage(group);
        }
        debug!(
            pages = report.doc.page_count(),
            stages = groups.len(),
            "pdf laid out"
        );
        report.doc
    }

    fn header(&mut self, options: &PdfOptions) {
        self.text(LEFT_MARGIN, TITLE, Font::HelveticaBold, 20.0, BLUE);
        self.y = 25.0;
        self.put(30.0, self.y + 5.0, &options.site_label, Font::Helvetica, 11.0, BLACK);
        self.y = 38.0;
        let generated = format!("Generated: {}", options.generated.format("%Y-%m-%d"));
        self.text(LEFT_MARGIN, &generated, Font::Helvetica, 10.0, GRAY);
        self.y = 50.0;
        self.wrapped(INTRODUCTION, LEFT_MARGIN, RIGHT_MARGIN - LEFT_MARGIN, 10.0, BLACK);
        self.y += LINE_HEIGHT * 0.5;
    }

    fn stage(&mut self, group: &StageGroup) {
        self.break_unless_fits(LINE_HEIGHT * HEADING_KEEP_LINES);
        self.text(LEFT_MARGIN, group.stage.label(), Font::HelveticaBold, 14.0, BLUE);
        self.y += LINE_HEIGHT * 1.5;

        for (category, items) in group.sections() {
            self.break_unless_fits(LINE_HEIGHT * SECTION_KEEP_LINES);
            self.text(LEFT_MARGIN + 5.0, category.heading(), Font::HelveticaBold, 11.0, BLACK);
            self.y += LINE_HEIGHT;
            for rec in items {
                self.item(rec);
            }
            self.y += LINE_HEIGHT * 0.5;
        }
    }

    fn item(&mut self, rec: &Recommendation) {
        self.break_unless_fits(LINE_HEIGHT * ITEM_KEEP_LINES);
        let bullet = format!("• {}", clean_text(&rec.item_type));
        self.text(LEFT_MARGIN + 5.0, &bullet, Font::HelveticaBold, 10.0, BLACK);
        self.y += LINE_HEIGHT;

        let reasoning = strip_markdown_links(&rec.reasoning);
        self.wrapped(
            &reasoning,
            LEFT_MARGIN + 10.0,
            RIGHT_MARGIN - LEFT_MARGIN - 10.0,
            9.0,
            DARK_GRAY,
        );
        self.y += LINE_HEIGHT * 0.5;
    }

    fn wrapped(&mut self, text: &str, x: f32, max_width: f32, size: f32, color: Color) {
        let clean = clean_text(text);
        for line in wrap_text(&clean, Font::Helvetica, size, max_width) {
            self.break_unless_fits(LINE_HEIGHT);
            self.text(x, &line, Font::Helvetica, size, color);
            self.y += LINE_HEIGHT;
        }
    }

    fn break_unless_fits(&mut self, required: f32) {
        if self.y + required > PAGE_HEIGHT - FOOTER_HEIGHT {
            self.doc.pages.push(Page::default());
            self.y = TOP;
        }
    }

    fn text(&mut self, x: f32, text: &str, font: Font, size: f32, color: Color) {
        self.put(x, self.y, text, font, size, color);
    }

    fn put(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color) {
        if let Some(page) = self.doc.pages.last_mut() {
            page.runs.push(TextRun {
                x,
                y,
                text: text.to_string(),
                font,
                size,
                color,
            });
        }
    }
}

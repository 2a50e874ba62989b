//! Built-in Type 1 fonts and their advance widths.

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Width used for characters outside the tables.
const FALLBACK_WIDTH: u16 = 556;
const BULLET_WIDTH: u16 = 350;

/// Advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name in the page resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
        }
    }

    fn char_width(&self, c: char) -> u16 {
        let table = match self {
            Self::Helvetica => &HELVETICA_WIDTHS,
            Self::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match c {
            ' '..='~' => table[c as usize - 32],
            '•' => BULLET_WIDTH,
            _ => FALLBACK_WIDTH,
        }
    }

    /// Rendered width of `text` in millimetres at `size` points.
    pub fn text_width_mm(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 / 1000.0 * size / PT_PER_MM
    }
}

//! Text preparation for the PDF: cleaning, wrapping, and encoding.

use super::fonts::Font;

/// Normalizes characters the base fonts can't show and collapses
/// whitespace.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter_map(|c| match c {
            'µ' | 'μ' => Some('u'),
            '¼' | '½' | '¾' | '\u{00AD}' | '\u{200B}' => None,
            other => Some(other),
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap to `max_width` millimetres. Words wider than a whole
/// line are split between characters.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width_mm(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if font.text_width_mm(word, size) <= max_width {
            current = word.to_string();
            continue;
        }
        for c in word.chars() {
            let mut next = current.clone();
            next.push(c);
            if !current.is_empty() && font.text_width_mm(&next, size) > max_width {
                lines.push(std::mem::take(&mut current));
                current.push(c);
            } else {
                current = next;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encodes to WinAnsi bytes; characters with no code point become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' => c as u8,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '€' => 0x80,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// PDF literal string body: parentheses and backslashes escaped, bytes
/// outside printable ASCII written as octal.
pub fn escape_pdf_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out
}

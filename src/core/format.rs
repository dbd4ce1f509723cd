//! Fixed-width text helpers for the profile panel.
//!
//! Widths are counted in characters, so the `·` fill and status glyphs count as one column.

pub const LINE_WIDTH: usize = 55;

pub const DOT_FILL: char = '·';

/// Format an integer with en-US thousands separators.
pub fn format_number(value: u64) -> String {
    let mut buffer = itoa::Buffer::new();
    let digits = buffer.format(value);

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(digit);
    }
    result
}

/// `". label····value"` padded to [`LINE_WIDTH`]; the fill never goes negative.
pub fn pad_line(label: &str, value: &str) -> String {
    let prefixed = format!(". {label}");
    let content_len = prefixed.chars().count() + value.chars().count();
    let fill = LINE_WIDTH.saturating_sub(content_len);

    let mut line = String::with_capacity(prefixed.len() + fill * DOT_FILL.len_utf8() + value.len());
    line.push_str(&prefixed);
    line.extend(std::iter::repeat(DOT_FILL).take(fill));
    line.push_str(value);
    line
}

/// `"title ------"` padded to [`LINE_WIDTH`].
pub fn section_header(title: &str) -> String {
    let dashes = LINE_WIDTH.saturating_sub(title.chars().count() + 1);
    format!("{title} {}", "-".repeat(dashes))
}

pub fn separator() -> String {
    "-".repeat(LINE_WIDTH)
}

/// Cut `text` to at most `width` characters, ending with `…` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

use crate::ui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

pub type SpanLine = Vec<Span>;

pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

/// Plain text of a line, used by tests and the non-interactive outline.
pub fn line_text(line: &[Span]) -> String {
    line.iter().map(|span| span.text.as_str()).collect()
}

/// Clip `line` to `width` display columns and pad it with spaces to exactly
/// that width, so a second column can follow it.
pub fn fit_line(line: SpanLine, width: usize) -> SpanLine {
    let mut used = 0usize;
    let mut out = Vec::with_capacity(line.len() + 1);
    for span in line {
        if used >= width {
            break;
        }
        let mut text = String::new();
        for ch in span.text.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + ch_width > width {
                used = width;
                break;
            }
            text.push(ch);
            used += ch_width;
        }
        if !text.is_empty() {
            out.push(Span::styled(text, span.style));
        }
    }
    let filled = line_width(&out);
    if filled < width {
        out.push(Span::new(" ".repeat(width - filled)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Span, fit_line, line_text, line_width};

    #[test]
    fn fit_line_pads_short_lines() {
        let line = fit_line(vec![Span::new("ab")], 5);
        assert_eq!(line_text(&line), "ab   ");
    }

    #[test]
    fn fit_line_clips_wide_chars() {
        let line = fit_line(vec![Span::new("■ ok"), Span::new("更多")], 7);
        assert_eq!(line_width(&line), 7);
        assert_eq!(line_text(&line), "■ ok更 ");
    }
}

use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use regex::Regex;
use std::sync::LazyLock;

static JSON_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?"#,
    )
    .expect("valid json token pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    Text,
    Number,
    Boolean,
    Null,
}

impl TokenKind {
    fn of(token: &str) -> Self {
        if token.starts_with('"') {
            if token.trim_end().ends_with(':') {
                Self::Key
            } else {
                Self::Text
            }
        } else if token == "true" || token == "false" {
            Self::Boolean
        } else if token == "null" {
            Self::Null
        } else {
            Self::Number
        }
    }

    pub fn style(self) -> Style {
        match self {
            Self::Key => Style::new().color(Color::Magenta),
            Self::Text => Style::new().color(Color::Green),
            Self::Number => Style::new().color(Color::Yellow),
            Self::Boolean => Style::new().color(Color::Blue),
            Self::Null => Style::new().color(Color::DarkGrey),
        }
    }
}

/// Split one line of pretty-printed JSON into styled spans.
pub fn highlight_json_line(line: &str) -> SpanLine {
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for found in JSON_TOKEN.find_iter(line) {
        if found.start() > cursor {
            spans.push(Span::new(&line[cursor..found.start()]));
        }
        let token = found.as_str();
        spans.push(Span::styled(token, TokenKind::of(token).style()));
        cursor = found.end();
    }
    if cursor < line.len() {
        spans.push(Span::new(&line[cursor..]));
    }
    spans
}

pub fn highlight_json(text: &str) -> Vec<SpanLine> {
    text.lines().map(highlight_json_line).collect()
}

#[cfg(test)]
mod tests {
    use super::{TokenKind, highlight_json_line};
    use crate::ui::span::line_text;

    fn kinds(line: &str) -> Vec<(String, Option<TokenKind>)> {
        highlight_json_line(line)
            .into_iter()
            .map(|span| {
                let kind = [
                    TokenKind::Key,
                    TokenKind::Text,
                    TokenKind::Number,
                    TokenKind::Boolean,
                    TokenKind::Null,
                ]
                .into_iter()
                .find(|kind| kind.style() == span.style);
                (span.text, kind)
            })
            .collect()
    }

    #[test]
    fn classifies_keys_and_values() {
        let spans = kinds(r#"  "dark": false,"#);
        assert_eq!(
            spans,
            vec![
                ("  ".to_string(), None),
                (r#""dark":"#.to_string(), Some(TokenKind::Key)),
                (" ".to_string(), None),
                ("false".to_string(), Some(TokenKind::Boolean)),
                (",".to_string(), None),
            ]
        );
    }

    #[test]
    fn strings_with_escapes_stay_one_token() {
        let spans = kinds(r#"  "a": "say \"hi\"","#);
        assert_eq!(spans[3], (r#""say \"hi\"""#.to_string(), Some(TokenKind::Text)));
    }

    #[test]
    fn numbers_and_null() {
        let spans = kinds("[-1.5e3, null]");
        assert_eq!(spans[1], ("-1.5e3".to_string(), Some(TokenKind::Number)));
        assert_eq!(spans[3], ("null".to_string(), Some(TokenKind::Null)));
        assert_eq!(line_text(&highlight_json_line("[-1.5e3, null]")), "[-1.5e3, null]");
    }
}

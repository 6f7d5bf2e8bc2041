use crate::core::color::prefers_dark_text;
use crate::core::document::Mutation;
use crate::core::value_path::ValuePath;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::color::ColorPicker;
use crate::widgets::traits::{Drawable, Interactive, RenderContext};
use tracing::debug;

const BORDER: &str = "│ ";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Key went to the picker; the document is untouched.
    Continue,
    Committed(Mutation),
    Cancelled,
}

/// Two-phase edit of one hex color. At most one session exists; it is owned
/// by the editor, never by the swatch that opened it.
#[derive(Default)]
pub enum ColorSession {
    #[default]
    Closed,
    Open {
        path: ValuePath,
        original: String,
        picker: ColorPicker,
    },
}

impl ColorSession {
    /// Opening while another session is open replaces it without committing.
    pub fn open(&mut self, path: ValuePath, color: impl Into<String>) {
        let original = color.into();
        if let Some(previous) = self.path() {
            debug!(previous = %previous, "color session replaced");
        }
        debug!(path = %path, color = %original, "color session opened");
        let picker = ColorPicker::new(&original);
        *self = Self::Open {
            path,
            original,
            picker,
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn path(&self) -> Option<&ValuePath> {
        match self {
            Self::Open { path, .. } => Some(path),
            Self::Closed => None,
        }
    }

    pub fn working_value(&self) -> Option<String> {
        match self {
            Self::Open { picker, .. } => Some(picker.working_value()),
            Self::Closed => None,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> SessionOutcome {
        match key.code {
            KeyCode::Enter => match self.commit() {
                Some(mutation) => SessionOutcome::Committed(mutation),
                None => SessionOutcome::Cancelled,
            },
            KeyCode::Esc => {
                self.cancel();
                SessionOutcome::Cancelled
            }
            _ => {
                if let Self::Open { picker, .. } = self {
                    picker.on_key(key);
                }
                SessionOutcome::Continue
            }
        }
    }

    /// Close the session and hand back the write for the caller to apply.
    pub fn commit(&mut self) -> Option<Mutation> {
        match std::mem::take(self) {
            Self::Open { path, picker, .. } => {
                let color = picker.working_value();
                debug!(path = %path, color = %color, "color session committed");
                Some(Mutation::new(path, color))
            }
            Self::Closed => None,
        }
    }

    pub fn cancel(&mut self) {
        if let Self::Open { path, .. } = std::mem::take(self) {
            debug!(path = %path, "color session cancelled");
        }
    }

    /// Dialog lines, drawn inline under the swatch that opened the session.
    pub fn draw(&self) -> Vec<SpanLine> {
        let Self::Open {
            path,
            original,
            picker,
        } = self
        else {
            return Vec::new();
        };

        let border = Style::new().color(Color::DarkGrey);
        let rgb = picker.rgb();
        let working = picker.working_value();
        let text_color = if prefers_dark_text(rgb) {
            Color::Black
        } else {
            Color::White
        };
        let preview = Style::new()
            .color(text_color)
            .background(Color::from_rgb(rgb))
            .bold();

        let mut picker_line = vec![Span::styled(BORDER, border)];
        picker_line.extend(
            picker
                .draw(&RenderContext::default())
                .lines
                .into_iter()
                .flatten(),
        );

        vec![
            vec![
                Span::styled("┌ ", border),
                Span::styled("Edit color ", Style::new().bold()),
                Span::styled(path.to_string(), Style::new().color(Color::Cyan)),
                Span::styled(format!("  (was {original})"), border),
            ],
            vec![
                Span::styled(BORDER, border),
                Span::styled(format!("{:^20}", working), preview),
            ],
            picker_line,
            vec![
                Span::styled("└ ", border),
                Span::styled(
                    "space mode  ←→ channel  ↑↓ adjust  # type  enter apply  esc cancel",
                    border,
                ),
            ],
        ]
    }

    /// Cursor inside the dialog, relative to its first line.
    pub fn cursor_pos(&self) -> Option<CursorPos> {
        let Self::Open { picker, .. } = self else {
            return None;
        };
        let local = picker.cursor_pos()?;
        Some(CursorPos {
            col: local.col + BORDER.chars().count() as u16,
            row: 2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorSession, SessionOutcome};
    use crate::core::document::Mutation;
    use crate::core::value_path::ValuePath;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;

    fn type_text(session: &mut ColorSession, text: &str) {
        for ch in text.chars() {
            assert_eq!(
                session.on_key(KeyEvent::plain(KeyCode::Char(ch))),
                SessionOutcome::Continue
            );
        }
    }

    #[test]
    fn commit_emits_working_color_and_closes() {
        let path = ValuePath::parse("theme.primary");
        let mut session = ColorSession::default();
        session.open(path.clone(), "#336699");
        type_text(&mut session, "#112233");
        assert_eq!(
            session.on_key(KeyEvent::plain(KeyCode::Enter)),
            SessionOutcome::Committed(Mutation::new(path, "#112233"))
        );
        assert!(!session.is_open());
    }

    #[test]
    fn half_typed_color_commits_the_color_before_entry() {
        let path = ValuePath::parse("theme.primary");
        let mut session = ColorSession::default();
        session.open(path.clone(), "#336699");
        type_text(&mut session, "#11223");
        assert_eq!(
            session.on_key(KeyEvent::plain(KeyCode::Enter)),
            SessionOutcome::Committed(Mutation::new(path, "#336699"))
        );
    }

    #[test]
    fn cancel_closes_without_mutation() {
        let mut session = ColorSession::default();
        session.open(ValuePath::parse("theme.primary"), "#336699");
        type_text(&mut session, "#000");
        assert_eq!(
            session.on_key(KeyEvent::plain(KeyCode::Esc)),
            SessionOutcome::Cancelled
        );
        assert!(!session.is_open());
        assert_eq!(session.commit(), None);
    }

    #[test]
    fn opening_again_replaces_the_session() {
        let mut session = ColorSession::default();
        session.open(ValuePath::parse("palette[0]"), "#ff0000");
        type_text(&mut session, "#00ff00");
        session.open(ValuePath::parse("palette[1]"), "#0000ff");
        assert_eq!(session.path(), Some(&ValuePath::parse("palette[1]")));
        assert_eq!(session.working_value().as_deref(), Some("#0000ff"));
    }

    #[test]
    fn unchanged_commit_keeps_original_text() {
        let path = ValuePath::parse("accent");
        let mut session = ColorSession::default();
        session.open(path.clone(), "#abc");
        assert_eq!(session.commit(), Some(Mutation::new(path, "#abc")));
    }

    #[test]
    fn dialog_names_the_path_being_edited() {
        let mut session = ColorSession::default();
        assert!(session.draw().is_empty());
        session.open(ValuePath::parse("theme.primary"), "#336699");
        let lines = session.draw();
        assert!(line_text(&lines[0]).contains("theme.primary"));
        assert!(line_text(&lines[1]).contains("#336699"));
        assert_eq!(session.cursor_pos().map(|pos| pos.row), Some(2));
    }
}

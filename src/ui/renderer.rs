use crate::app::editor::{Editor, StatusKind};
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::highlight::highlight_json;
use crate::ui::span::{Span, SpanLine, fit_line};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::FormField;

/// Side-by-side preview needs at least this many columns.
const SPLIT_MIN_WIDTH: u16 = 100;
const COLUMN_GAP: &str = " │ ";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    /// Row kept on screen when there is no cursor (a focused toggle or swatch).
    pub anchor_row: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn render(&self, editor: &Editor, size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame.lines.push(vec![
            Span::styled("json-style-editor ", Style::new().color(Color::Cyan).bold()),
            Span::styled(editor.title(), Style::new().color(Color::DarkGrey)),
        ]);
        frame.lines.push(Vec::new());
        let body_top = frame.lines.len();

        let form = render_form(editor);
        let preview = if editor.preview_enabled() {
            render_preview(editor)
        } else {
            Vec::new()
        };

        if !preview.is_empty() && size.width >= SPLIT_MIN_WIDTH {
            let left_width = (size.width as usize - COLUMN_GAP.chars().count()) / 2;
            let rows = form.lines.len().max(preview.len());
            let mut form_lines = form.lines.into_iter();
            let mut preview_lines = preview.into_iter();
            for _ in 0..rows {
                let mut line = fit_line(form_lines.next().unwrap_or_default(), left_width);
                line.push(Span::styled(COLUMN_GAP, Style::new().color(Color::DarkGrey)));
                line.extend(preview_lines.next().unwrap_or_default());
                frame.lines.push(line);
            }
        } else {
            frame.lines.extend(form.lines);
            if !preview.is_empty() {
                frame.lines.push(Vec::new());
                frame.lines.push(vec![Span::styled(
                    "Preview",
                    Style::new().color(Color::Cyan).bold(),
                )]);
                frame.lines.extend(preview);
            }
        }

        frame.cursor = form.cursor.map(|pos| CursorPos {
            col: pos.col,
            row: pos.row + body_top as u16,
        });
        frame.anchor_row = form.anchor_row + body_top;

        frame.lines.push(Vec::new());
        if let Some(status) = editor.status() {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            frame.lines.push(vec![Span::styled(
                status.message.clone(),
                Style::new().color(color),
            )]);
        }
        frame.lines.push(vec![Span::styled(
            help_text(editor),
            Style::new().color(Color::DarkGrey),
        )]);
        frame
    }
}

struct FormView {
    lines: Vec<SpanLine>,
    cursor: Option<CursorPos>,
    anchor_row: usize,
}

fn render_form(editor: &Editor) -> FormView {
    let form = editor.form();
    let session = editor.session();
    let ctx = form.render_context();
    let mut view = FormView {
        lines: Vec::new(),
        cursor: None,
        anchor_row: 0,
    };

    if form.rows().is_empty() {
        view.lines.push(vec![Span::styled(
            "(nothing to edit)",
            Style::new().color(Color::DarkGrey),
        )]);
        return view;
    }

    for (idx, row) in form.rows().iter().enumerate() {
        let top = view.lines.len();
        let (lines, cursor) = row.render(&ctx);
        view.lines.extend(lines);

        if form.focus_index() == Some(idx) {
            view.anchor_row = top;
            if !session.is_open() {
                view.cursor = cursor.map(|pos| CursorPos {
                    col: pos.col,
                    row: pos.row + top as u16,
                });
            }
        }

        let editing_here = session
            .path()
            .is_some_and(|path| row.field().is_some_and(|field| field.path() == path));
        if editing_here {
            let dialog_top = view.lines.len();
            let indent = "  ".repeat(row.depth + 2);
            for line in session.draw() {
                let mut padded = vec![Span::new(indent.as_str())];
                padded.extend(line);
                view.lines.push(padded);
            }
            view.cursor = session.cursor_pos().map(|pos| CursorPos {
                col: pos.col + indent.len() as u16,
                row: pos.row + dialog_top as u16,
            });
        }
    }
    view
}

fn render_preview(editor: &Editor) -> Vec<SpanLine> {
    match editor.document().to_pretty_json() {
        Ok(text) => highlight_json(&text),
        Err(err) => vec![vec![Span::styled(
            format!("preview unavailable: {err}"),
            Style::new().color(Color::Red),
        )]],
    }
}

fn help_text(editor: &Editor) -> &'static str {
    if editor.session().is_open() {
        "enter apply  esc cancel  ctrl+c quit"
    } else {
        "tab/↓ next  shift+tab/↑ prev  enter/space activate  ctrl+s save  ctrl+r reset  ctrl+q quit"
    }
}

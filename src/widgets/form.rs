use std::collections::HashMap;

use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use crate::core::variant::{Variant, classify};
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::swatch::ColorSwatch;
use crate::widgets::inputs::text::TextInput;
use crate::widgets::inputs::toggle::ToggleInput;
use crate::widgets::traits::{Drawable, FormField, RenderContext};

/// Nesting deeper than this renders as an unsupported row.
pub const MAX_DEPTH: usize = 64;

const INDENT: &str = "  ";

pub enum RowKind {
    Header(String),
    Field(Box<dyn FormField>),
    Unsupported(ValuePath),
}

pub struct FormRow {
    pub depth: usize,
    pub kind: RowKind,
}

impl FormRow {
    fn header(depth: usize, label: impl Into<String>) -> Self {
        Self {
            depth,
            kind: RowKind::Header(label.into()),
        }
    }

    fn leaf(depth: usize, field: impl FormField + 'static) -> Self {
        Self {
            depth,
            kind: RowKind::Field(Box::new(field)),
        }
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self.kind, RowKind::Field(_))
    }

    pub fn field(&self) -> Option<&dyn FormField> {
        match &self.kind {
            RowKind::Field(field) => Some(field.as_ref()),
            _ => None,
        }
    }

    pub fn field_mut(&mut self) -> Option<&mut Box<dyn FormField>> {
        match &mut self.kind {
            RowKind::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.field().map(|field| field.id())
    }

    /// Lines for this row plus the cursor column when the row is focused.
    pub fn render(&self, ctx: &RenderContext) -> (Vec<SpanLine>, Option<CursorPos>) {
        let indent = INDENT.repeat(self.depth);
        match &self.kind {
            RowKind::Header(label) => (
                vec![vec![
                    Span::new(indent),
                    Span::styled(format!("▾ {label}"), Style::new().color(Color::Blue).bold()),
                ]],
                None,
            ),
            RowKind::Unsupported(path) => (
                vec![vec![
                    Span::new(indent),
                    Span::styled(
                        format!("Unsupported type for field: {path}"),
                        Style::new().color(Color::Red),
                    ),
                ]],
                None,
            ),
            RowKind::Field(field) => {
                let focused = ctx.focused_id.as_deref() == Some(field.id());
                let marker = if focused { "› " } else { "  " };
                let prefix = format!("{indent}{marker}{}: ", field.label());
                let prefix_width = Span::new(prefix.as_str()).width();
                let label_style = if focused {
                    Style::new().color(Color::Yellow).bold()
                } else {
                    Style::default()
                };

                let output = field.draw(ctx);
                let mut lines = Vec::with_capacity(output.lines.len().max(1));
                for (idx, body) in output.lines.into_iter().enumerate() {
                    let lead = if idx == 0 {
                        Span::styled(prefix.clone(), label_style)
                    } else {
                        Span::new(" ".repeat(prefix_width))
                    };
                    let mut line = vec![lead];
                    line.extend(body);
                    lines.push(line);
                }
                if lines.is_empty() {
                    lines.push(vec![Span::styled(prefix, label_style)]);
                }

                let cursor = focused
                    .then(|| field.cursor_pos())
                    .flatten()
                    .map(|pos| CursorPos {
                        col: pos.col + prefix_width as u16,
                        row: pos.row,
                    });
                (lines, cursor)
            }
        }
    }
}

/// Walks a document and produces one row per rendered node.
#[derive(Debug, Clone, Copy)]
pub struct FormBuilder {
    max_depth: usize,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(&self, value: &Value) -> Vec<FormRow> {
        let mut rows = Vec::new();
        self.walk(value, &ValuePath::empty(), 0, &mut rows);
        rows
    }

    fn walk(&self, value: &Value, path: &ValuePath, depth: usize, rows: &mut Vec<FormRow>) {
        if path.segments().len() > self.max_depth {
            rows.push(FormRow {
                depth,
                kind: RowKind::Unsupported(path.clone()),
            });
            return;
        }
        let Some(variant) = classify(value) else {
            return;
        };
        let label = path.leaf_label();

        match (variant, value) {
            (Variant::ObjectGroup, Value::Object(map)) => {
                let child_depth = if path.is_empty() {
                    depth
                } else {
                    rows.push(FormRow::header(depth, label));
                    depth + 1
                };
                for (key, child) in map {
                    self.walk(child, &path.child_key(key.as_str()), child_depth, rows);
                }
            }
            (Variant::ColorArray, Value::List(items)) => {
                let child_depth = self.list_header(path, label, depth, rows);
                for (idx, item) in items.iter().enumerate() {
                    let color = item.as_text().unwrap_or_default();
                    rows.push(FormRow::leaf(
                        child_depth,
                        ColorSwatch::new(path.child_index(idx), format!("Color {}", idx + 1))
                            .with_color(color),
                    ));
                }
            }
            (Variant::GenericArray, Value::List(items)) => {
                let child_depth = self.list_header(path, label, depth, rows);
                for (idx, item) in items.iter().enumerate() {
                    self.walk(item, &path.child_index(idx), child_depth, rows);
                }
            }
            (Variant::HexColor, Value::Text(color)) => {
                rows.push(FormRow::leaf(
                    depth,
                    ColorSwatch::new(path.clone(), label).with_color(color.as_str()),
                ));
            }
            (Variant::Boolean, Value::Bool(flag)) => {
                rows.push(FormRow::leaf(
                    depth,
                    ToggleInput::new(path.clone(), label).with_checked(*flag),
                ));
            }
            (Variant::Scalar, scalar) => {
                rows.push(FormRow::leaf(
                    depth,
                    TextInput::new(path.clone(), label).with_default(scalar.clone()),
                ));
            }
            _ => rows.push(FormRow {
                depth,
                kind: RowKind::Unsupported(path.clone()),
            }),
        }
    }

    fn list_header(
        &self,
        path: &ValuePath,
        label: String,
        depth: usize,
        rows: &mut Vec<FormRow>,
    ) -> usize {
        if path.is_empty() {
            return depth;
        }
        rows.push(FormRow::header(depth, label));
        depth + 1
    }
}

/// The rendered form plus the focused row. Rebuilt from the document after
/// every accepted mutation.
pub struct Form {
    builder: FormBuilder,
    rows: Vec<FormRow>,
    focus: Option<usize>,
}

impl Form {
    pub fn new(value: &Value) -> Self {
        Self::with_builder(FormBuilder::default(), value)
    }

    pub fn with_builder(builder: FormBuilder, value: &Value) -> Self {
        let rows = builder.build(value);
        let focus = rows.iter().position(FormRow::is_focusable);
        Self {
            builder,
            rows,
            focus,
        }
    }

    pub fn rows(&self) -> &[FormRow] {
        self.rows.as_slice()
    }

    /// Rebuild from `value`. Widgets whose id survives are carried over
    /// and refreshed, so in-progress text and cursor positions are kept;
    /// focus stays on the same id when it still exists.
    pub fn rebuild(&mut self, value: &Value) {
        let focused_id = self.focused_id().map(str::to_string);
        let mut previous: HashMap<String, Box<dyn FormField>> = HashMap::new();
        for row in std::mem::take(&mut self.rows) {
            if let RowKind::Field(field) = row.kind {
                previous.insert(field.id().to_string(), field);
            }
        }

        let mut rows = self.builder.build(value);
        for row in &mut rows {
            let Some(slot) = row.field_mut() else {
                continue;
            };
            if let Some(mut kept) = previous.remove(slot.id()) {
                if let Some(current) = value.get_path(kept.path()) {
                    kept.set_value(current.clone());
                }
                *slot = kept;
            }
        }
        self.rows = rows;

        self.focus = focused_id
            .and_then(|id| self.rows.iter().position(|row| row.id() == Some(id.as_str())))
            .or_else(|| {
                let start = self.focus.unwrap_or(0).min(self.rows.len());
                self.rows[start..]
                    .iter()
                    .position(FormRow::is_focusable)
                    .map(|offset| start + offset)
                    .or_else(|| self.rows.iter().rposition(FormRow::is_focusable))
            });
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus
            .and_then(|idx| self.rows.get(idx))
            .and_then(FormRow::id)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut Box<dyn FormField>> {
        let idx = self.focus?;
        self.rows.get_mut(idx).and_then(FormRow::field_mut)
    }

    pub fn focus_path(&mut self, path: &ValuePath) -> bool {
        let found = self
            .rows
            .iter()
            .position(|row| row.field().is_some_and(|field| field.path() == path));
        if found.is_some() {
            self.focus = found;
        }
        found.is_some()
    }

    /// Move to the next focusable row, wrapping around. Header and error
    /// rows are skipped.
    pub fn focus_next(&mut self) -> bool {
        self.step_focus(true)
    }

    pub fn focus_prev(&mut self) -> bool {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> bool {
        let len = self.rows.len();
        if len == 0 {
            return false;
        }
        let start = self.focus.unwrap_or(if forward { len - 1 } else { 0 });
        for step in 1..=len {
            let idx = if forward {
                (start + step) % len
            } else {
                (start + len - step % len) % len
            };
            if self.rows[idx].is_focusable() {
                let moved = self.focus != Some(idx);
                self.focus = Some(idx);
                return moved;
            }
        }
        false
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            focused_id: self.focused_id().map(str::to_string),
        }
    }

    /// Plain text rendering used by the `outline` command.
    pub fn outline(&self) -> Vec<String> {
        let ctx = RenderContext::default();
        self.rows
            .iter()
            .flat_map(|row| row.render(&ctx).0)
            .map(|line| crate::ui::span::line_text(&line).trim_end().to_string())
            .collect()
    }
}

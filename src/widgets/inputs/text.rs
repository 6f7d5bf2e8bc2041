use super::text_edit;
use crate::core::document::Mutation;
use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use crate::core::variant::Variant;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, FormField, InteractionResult, Interactive, RenderContext,
};
use serde_json::Number;
use unicode_width::UnicodeWidthChar;

/// Text field for string and number leaves. Every edit is written through
/// to the document immediately.
pub struct TextInput {
    base: WidgetBase,
    value: String,
    cursor: usize,
    numeric: bool,
}

impl TextInput {
    pub fn new(path: ValuePath, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new("text", path, label),
            value: String::new(),
            cursor: 0,
            numeric: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.numeric = matches!(value, Value::Number(_));
        self.set_value(value);
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Value written to the document for the current text.
    fn coerced(&self) -> Value {
        if self.numeric {
            Value::Number(coerce_number(&self.value))
        } else {
            Value::Text(self.value.clone())
        }
    }

    fn edited_result(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            change: Mutation::new(self.base.path().clone(), self.coerced()),
        })
    }
}

/// Number fields never reject an edit: text that is not a finite number
/// is written as `0`.
pub fn coerce_number(text: &str) -> Number {
    let trimmed = text.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Number::from(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => {
            if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
                Number::from(float as i64)
            } else {
                Number::from_f64(float).unwrap_or_else(|| Number::from(0))
            }
        }
        _ => Number::from(0),
    }
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let style = match (self.numeric, focused) {
            (_, true) => Style::new().color(Color::White).bold(),
            (true, false) => Style::new().color(Color::Cyan),
            (false, false) => Style::new().color(Color::Green),
        };
        if self.value.is_empty() && !focused {
            return DrawOutput::single(vec![Span::styled(
                "(empty)",
                Style::new().color(Color::DarkGrey),
            )]);
        }
        DrawOutput::single(vec![Span::styled(self.value.clone(), style)])
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('w') | KeyCode::Backspace => {
                    if text_edit::delete_word_left(&mut self.value, &mut self.cursor) {
                        return self.edited_result();
                    }
                    InteractionResult::ignored()
                }
                _ => InteractionResult::ignored(),
            };
        }

        match key.code {
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                self.edited_result()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(self.coerced())
    }

    /// Keep the typed text while it still maps to the committed value, so
    /// half-typed numbers like `1.` survive the rebuild after each edit.
    fn set_value(&mut self, value: Value) {
        if self.coerced() == value && !self.value.is_empty() {
            return;
        }
        if let Some(text) = value.to_text_scalar() {
            self.value = text;
            self.cursor = text_edit::char_count(&self.value);
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let col: usize = self
            .value
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.value))
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        Some(CursorPos {
            col: col as u16,
            row: 0,
        })
    }
}

impl FormField for TextInput {
    fn path(&self) -> &ValuePath {
        self.base.path()
    }

    fn variant(&self) -> Variant {
        Variant::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::{TextInput, coerce_number};
    use crate::core::document::Mutation;
    use crate::core::value::Value;
    use crate::core::value_path::ValuePath;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;
    use serde_json::Number;

    fn type_text(input: &mut TextInput, text: &str) -> Vec<WidgetAction> {
        let mut actions = Vec::new();
        for ch in text.chars() {
            actions.extend(input.on_key(KeyEvent::plain(KeyCode::Char(ch))).actions);
        }
        actions
    }

    #[test]
    fn every_keystroke_emits_a_mutation() {
        let path = ValuePath::parse("tags[0]");
        let mut input = TextInput::new(path.clone(), "tags[0]").with_default("a");
        let actions = type_text(&mut input, "bc");
        assert_eq!(
            actions,
            vec![
                WidgetAction::ValueChanged {
                    change: Mutation::new(path.clone(), "ab"),
                },
                WidgetAction::ValueChanged {
                    change: Mutation::new(path, "abc"),
                },
            ]
        );
    }

    #[test]
    fn number_fields_coerce_bad_text_to_zero() {
        let mut input = TextInput::new(ValuePath::parse("size"), "size").with_default(12);
        assert!(input.is_numeric());
        let result = input.on_key(KeyEvent::plain(KeyCode::Char('x')));
        let [WidgetAction::ValueChanged { change }] = result.actions.as_slice() else {
            panic!("expected a single mutation");
        };
        assert_eq!(change.value, Value::from(0));
    }

    #[test]
    fn rebuild_keeps_partially_typed_numbers() {
        let mut input = TextInput::new(ValuePath::parse("ratio"), "ratio").with_default(1);
        type_text(&mut input, ".");
        input.set_value(Value::from(1));
        assert_eq!(input.on_key(KeyEvent::plain(KeyCode::Char('5'))).actions.len(), 1);
        assert_eq!(
            input.value(),
            Some(Value::Number(Number::from_f64(1.5).expect("finite")))
        );
    }

    #[test]
    fn rebuild_replaces_text_that_no_longer_matches() {
        let mut input = TextInput::new(ValuePath::parse("name"), "name").with_default("old");
        input.set_value(Value::from("new"));
        assert_eq!(input.value(), Some(Value::from("new")));
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(coerce_number("42"), Number::from(42));
        assert_eq!(coerce_number(" -3 "), Number::from(-3));
        assert_eq!(coerce_number("1e3"), Number::from(1000));
        assert_eq!(coerce_number("2.5"), Number::from_f64(2.5).expect("finite"));
        assert_eq!(coerce_number(""), Number::from(0));
        assert_eq!(coerce_number("abc"), Number::from(0));
        assert_eq!(coerce_number("inf"), Number::from(0));
        assert_eq!(coerce_number("NaN"), Number::from(0));
    }
}

use crate::core::document::Mutation;
use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use crate::core::variant::Variant;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, FormField, InteractionResult, Interactive, RenderContext,
};

pub struct ToggleInput {
    base: WidgetBase,
    checked: bool,
}

impl ToggleInput {
    pub fn new(path: ValuePath, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new("toggle", path, label),
            checked: false,
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Drawable for ToggleInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let (symbol, text, color) = if self.checked {
            ("[✓]", "true", Color::Green)
        } else {
            ("[ ]", "false", Color::Red)
        };
        let mut style = Style::new().color(color);
        if focused {
            style = style.bold();
        }
        DrawOutput::single(vec![
            Span::styled(symbol, style),
            Span::new(" "),
            Span::styled(text, Style::new().color(color)),
        ])
    }
}

impl Interactive for ToggleInput {
    /// Space or Enter flips the flag and writes it through right away;
    /// booleans never go through a session.
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.checked = !self.checked;
                InteractionResult::with_action(WidgetAction::ValueChanged {
                    change: Mutation::new(self.base.path().clone(), self.checked),
                })
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Bool(self.checked))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(flag) = value.as_bool() {
            self.checked = flag;
        }
    }
}

impl FormField for ToggleInput {
    fn path(&self) -> &ValuePath {
        self.base.path()
    }

    fn variant(&self) -> Variant {
        Variant::Boolean
    }
}

#[cfg(test)]
mod tests {
    use super::ToggleInput;
    use crate::core::document::Mutation;
    use crate::core::value_path::ValuePath;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    #[test]
    fn space_flips_and_emits_mutation() {
        let path = ValuePath::parse("theme.dark");
        let mut toggle = ToggleInput::new(path.clone(), "dark").with_checked(false);
        let result = toggle.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert!(result.handled);
        assert_eq!(
            result.actions,
            vec![WidgetAction::ValueChanged {
                change: Mutation::new(path, true),
            }]
        );
        assert!(toggle.is_checked());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut toggle = ToggleInput::new(ValuePath::parse("flag"), "flag");
        let result = toggle.on_key(KeyEvent::plain(KeyCode::Char('x')));
        assert!(!result.handled);
        assert!(result.actions.is_empty());
        assert!(!toggle.is_checked());
    }
}

use crate::core::color::{parse_hex, prefers_dark_text};
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

/// A hex color shown as a filled block. Swatches never write to the
/// document; activating one asks the editor to open a color session.
pub struct ColorSwatch {
    base: WidgetBase,
    color: String,
}

impl ColorSwatch {
    pub fn new(path: ValuePath, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new("swatch", path, label),
            color: String::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl Drawable for ColorSwatch {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let Some(rgb) = parse_hex(&self.color) else {
            return DrawOutput::single(vec![Span::styled(
                self.color.clone(),
                Style::new().color(Color::Red),
            )]);
        };

        let text_color = if prefers_dark_text(rgb) {
            Color::Black
        } else {
            Color::White
        };
        let mut chip = Style::new()
            .color(text_color)
            .background(Color::from_rgb(rgb));
        if focused {
            chip = chip.bold();
        }
        let mut spans = vec![Span::styled(format!(" {} ", self.color), chip)];
        if focused {
            spans.push(Span::styled(
                "  enter: edit",
                Style::new().color(Color::DarkGrey),
            ));
        }
        DrawOutput::single(spans)
    }
}

impl Interactive for ColorSwatch {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                InteractionResult::with_action(WidgetAction::OpenColorSession {
                    path: self.base.path().clone(),
                    color: self.color.clone(),
                })
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.color.clone()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.as_text() {
            self.color = text.to_string();
        }
    }
}

impl FormField for ColorSwatch {
    fn path(&self) -> &ValuePath {
        self.base.path()
    }

    fn variant(&self) -> Variant {
        Variant::HexColor
    }
}

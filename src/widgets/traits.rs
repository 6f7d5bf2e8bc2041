use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use crate::core::variant::Variant;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::{Span, SpanLine};

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub focused_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

impl DrawOutput {
    pub fn single(spans: Vec<Span>) -> Self {
        Self { lines: vec![spans] }
    }
}

// ---------------------------------------------------------------------------
// Drawable — every node can draw itself
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive — input nodes
// ---------------------------------------------------------------------------

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }

    fn value(&self) -> Option<Value> {
        None
    }

    /// Receive the committed document value after the form is rebuilt.
    fn set_value(&mut self, _value: Value) {}
}

// ---------------------------------------------------------------------------
// FormField — a focusable leaf bound to a document path
// ---------------------------------------------------------------------------

pub trait FormField: Drawable + Interactive {
    fn path(&self) -> &ValuePath;
    fn variant(&self) -> Variant;
}

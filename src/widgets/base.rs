use crate::core::value_path::ValuePath;
use crate::widgets::traits::RenderContext;

/// Identity shared by every form field: a stable id derived from the field
/// kind and its path, plus the label shown in front of it.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: String,
    label: String,
    path: ValuePath,
}

impl WidgetBase {
    pub fn new(kind: &str, path: ValuePath, label: impl Into<String>) -> Self {
        Self {
            id: format!("{kind}:{path}"),
            label: label.into(),
            path,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &ValuePath {
        &self.path
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.focused_id.as_deref() == Some(self.id.as_str())
    }
}

use crate::core::document::Mutation;
use crate::core::value_path::ValuePath;

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the editor that owns the document.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    /// Apply a write to the document right away.
    ValueChanged { change: Mutation },
    /// Ask the editor to open its color-edit session for `path`.
    OpenColorSession { path: ValuePath, color: String },
}

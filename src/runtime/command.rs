/// Editor-level commands resolved from key bindings before a key reaches
/// the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Export,
    Reset,
    NextFocus,
    PrevFocus,
}

use crate::core::document::{Document, Mutation};
use crate::runtime::command::Command;
use crate::runtime::event::WidgetAction;
use crate::runtime::key_bindings::KeyBindings;
use crate::terminal::KeyEvent;
use crate::widgets::components::color_session::{ColorSession, SessionOutcome};
use crate::widgets::form::Form;
use crate::widgets::traits::Interactive;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub export_path: PathBuf,
    pub preview: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from("data.json"),
            preview: true,
        }
    }
}

/// Single source of truth for an editing run: the document, the form built
/// from it, and the one color session.
pub struct Editor {
    title: String,
    document: Document,
    form: Form,
    session: ColorSession,
    key_bindings: KeyBindings,
    settings: EditorSettings,
    status: Option<Status>,
    should_exit: bool,
}

impl Editor {
    pub fn new(title: impl Into<String>, document: Document, settings: EditorSettings) -> Self {
        let form = Form::new(document.value());
        Self {
            title: title.into(),
            document,
            form,
            session: ColorSession::default(),
            key_bindings: KeyBindings::new(),
            settings,
            status: None,
            should_exit: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn session(&self) -> &ColorSession {
        &self.session
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn preview_enabled(&self) -> bool {
        self.settings.preview
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Route one key press. Returns whether the screen needs a redraw.
    ///
    /// An open color session takes every key except the exit binding, so
    /// focus cannot move away from an uncommitted color.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let command = self.key_bindings.resolve(key);
        if command == Some(Command::Exit) {
            self.session.cancel();
            self.should_exit = true;
            return true;
        }

        if self.session.is_open() {
            match self.session.on_key(key) {
                SessionOutcome::Continue => {}
                SessionOutcome::Committed(mutation) => self.apply(&mutation),
                SessionOutcome::Cancelled => {
                    self.status = Some(Status::info("Color edit cancelled"));
                }
            }
            return true;
        }

        if let Some(command) = command {
            return self.run_command(command);
        }

        let Some(field) = self.form.focused_field_mut() else {
            return false;
        };
        let result = field.on_key(key);
        for action in result.actions {
            self.handle_action(action);
        }
        result.request_render
    }

    pub fn run_command(&mut self, command: Command) -> bool {
        match command {
            Command::Exit => {
                self.session.cancel();
                self.should_exit = true;
                true
            }
            Command::Export => {
                self.export();
                true
            }
            Command::Reset => {
                self.reset();
                true
            }
            Command::NextFocus => self.form.focus_next(),
            Command::PrevFocus => self.form.focus_prev(),
        }
    }

    pub fn handle_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::ValueChanged { change } => self.apply(&change),
            WidgetAction::OpenColorSession { path, color } => {
                self.form.focus_path(&path);
                self.session.open(path, color);
            }
        }
    }

    /// Apply a write, swap in the new document and rebuild the form.
    pub fn apply(&mut self, mutation: &Mutation) {
        self.document.apply(mutation);
        self.form.rebuild(self.document.value());
        self.status = None;
    }

    pub fn export(&mut self) {
        let path = self.settings.export_path.clone();
        self.status = Some(match self.document.export(&path) {
            Ok(()) => {
                info!(path = %path.display(), "document exported");
                Status::info(format!("Saved {}", path.display()))
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                Status::error(format!("Export failed: {err}"))
            }
        });
    }

    /// Drop every edit and rebuild from the loaded text.
    pub fn reset(&mut self) {
        self.session.cancel();
        self.status = Some(match self.document.reset() {
            Ok(()) => {
                self.form = Form::new(self.document.value());
                info!("document reset");
                Status::info("Reverted to loaded document")
            }
            Err(err) => Status::error(format!("Reset failed: {err}")),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{Editor, EditorSettings, StatusKind};
    use crate::core::document::Document;
    use crate::terminal::{KeyCode, KeyEvent};

    const THEME: &str = r##"{"theme":{"primary":"#336699","dark":false},"tags":["a","b"]}"##;

    fn editor() -> Editor {
        let document = Document::parse(THEME).expect("valid json");
        Editor::new("theme.json", document, EditorSettings::default())
    }

    fn press(editor: &mut Editor, code: KeyCode) {
        editor.handle_key(KeyEvent::plain(code));
    }

    fn type_text(editor: &mut Editor, text: &str) {
        for ch in text.chars() {
            press(editor, KeyCode::Char(ch));
        }
    }

    fn compact(editor: &Editor) -> String {
        serde_json::to_string(editor.document().value()).expect("serialize")
    }

    #[test]
    fn committing_a_color_session_updates_the_document() {
        let mut editor = editor();
        assert_eq!(editor.form().focused_id(), Some("swatch:theme.primary"));
        press(&mut editor, KeyCode::Enter);
        assert!(editor.session().is_open());

        type_text(&mut editor, "#112233");
        assert_eq!(
            compact(&editor),
            r##"{"theme":{"primary":"#336699","dark":false},"tags":["a","b"]}"##
        );

        press(&mut editor, KeyCode::Enter);
        assert!(!editor.session().is_open());
        assert_eq!(
            compact(&editor),
            r##"{"theme":{"primary":"#112233","dark":false},"tags":["a","b"]}"##
        );
    }

    #[test]
    fn cancelling_leaves_the_document_unchanged() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Enter);
        type_text(&mut editor, "#000");
        press(&mut editor, KeyCode::Esc);
        assert!(!editor.session().is_open());
        assert_eq!(compact(&editor), THEME);
        assert_eq!(
            editor.status().map(|status| status.kind),
            Some(StatusKind::Info)
        );
    }

    #[test]
    fn toggling_applies_immediately() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Tab);
        assert_eq!(editor.form().focused_id(), Some("toggle:theme.dark"));
        press(&mut editor, KeyCode::Char(' '));
        assert_eq!(
            compact(&editor),
            r##"{"theme":{"primary":"#336699","dark":true},"tags":["a","b"]}"##
        );
        assert_eq!(editor.form().focused_id(), Some("toggle:theme.dark"));
    }

    #[test]
    fn text_edits_write_through_per_keystroke() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Down);
        press(&mut editor, KeyCode::Down);
        assert_eq!(editor.form().focused_id(), Some("text:tags[0]"));
        type_text(&mut editor, "z");
        assert_eq!(
            compact(&editor),
            r##"{"theme":{"primary":"#336699","dark":false},"tags":["az","b"]}"##
        );
    }

    #[test]
    fn session_blocks_focus_movement_until_closed() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Enter);
        press(&mut editor, KeyCode::Tab);
        assert!(editor.session().is_open());
        assert_eq!(editor.form().focused_id(), Some("swatch:theme.primary"));
    }

    #[test]
    fn reset_restores_loaded_text() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Tab);
        press(&mut editor, KeyCode::Char(' '));
        editor.handle_key(KeyEvent::ctrl('r'));
        assert_eq!(compact(&editor), THEME);
    }

    #[test]
    fn exit_binding_closes_any_session() {
        let mut editor = editor();
        press(&mut editor, KeyCode::Enter);
        editor.handle_key(KeyEvent::ctrl('c'));
        assert!(editor.should_exit());
        assert!(!editor.session().is_open());
        assert_eq!(compact(&editor), THEME);
    }

    #[test]
    fn export_writes_configured_path() {
        let dir = std::env::temp_dir().join(format!("json-style-editor-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("out.json");
        let document = Document::parse(r#"{"a":1}"#).expect("valid json");
        let mut editor = Editor::new(
            "inline",
            document,
            EditorSettings {
                export_path: path.clone(),
                preview: false,
            },
        );
        editor.handle_key(KeyEvent::ctrl('s'));
        let written = std::fs::read_to_string(&path).expect("exported file");
        assert_eq!(written, "{\n  \"a\": 1\n}\n");
        assert_eq!(
            editor.status().map(|status| status.kind),
            Some(StatusKind::Info)
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}

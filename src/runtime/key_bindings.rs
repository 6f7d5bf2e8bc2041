use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Debug, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::ctrl(KeyCode::Char('q')), Command::Exit);
        self.bind(KeyBinding::ctrl(KeyCode::Char('s')), Command::Export);
        self.bind(KeyBinding::ctrl(KeyCode::Char('r')), Command::Reset);
        self.bind(KeyBinding::key(KeyCode::Tab), Command::NextFocus);
        self.bind(KeyBinding::key(KeyCode::Down), Command::NextFocus);
        self.bind(KeyBinding::key(KeyCode::Up), Command::PrevFocus);
        self.bind(KeyBinding::key(KeyCode::BackTab), Command::PrevFocus);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::PrevFocus,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn defaults_cover_editor_commands() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.resolve(KeyEvent::ctrl('s')), Some(Command::Export));
        assert_eq!(bindings.resolve(KeyEvent::ctrl('q')), Some(Command::Exit));
        assert_eq!(
            bindings.resolve(KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
            }),
            Some(Command::PrevFocus)
        );
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('s'))), None);
    }

    #[test]
    fn unbind_removes_binding() {
        let mut bindings = KeyBindings::new();
        bindings.unbind(&KeyBinding::key(KeyCode::Down));
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Down)), None);
    }
}

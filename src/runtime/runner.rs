use crate::app::editor::Editor;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::Duration;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Single-threaded event loop: every key is handled, and any mutation it
/// causes is applied, before the next event is read.
pub struct Runtime {
    editor: Editor,
    terminal: Terminal,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(editor: Editor, terminal: Terminal) -> Self {
        Self {
            editor,
            terminal,
            renderer: Renderer,
        }
    }

    /// Run until the user exits, then hand the editor back so the caller can
    /// print the final document.
    pub fn run(mut self) -> io::Result<Editor> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.editor.should_exit() {
                let event = self.terminal.poll_event(POLL_INTERVAL)?;
                self.dispatch(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)?;
        debug!("editor loop finished");
        Ok(self.editor)
    }

    fn dispatch(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                if self.editor.handle_key(key) && !self.editor.should_exit() {
                    self.render()?;
                }
                Ok(())
            }
            TerminalEvent::Tick => Ok(()),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.editor, self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}

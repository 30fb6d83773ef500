// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
//!
//! Editing session handle.
//!
//! An [`EditSession`] owns exactly one [`TextBuffer`] together with the
//! configuration it was opened with. There is no global editor state: the
//! session is passed to every call that needs it, and dropping it ends the
//! session.
//!
//! Key events go through [`EditSession::handle_key`], which resolves the chord
//! (through a [`ModalResolver`] when the modal keymap is configured), runs the
//! resulting commands against the buffer, and folds the returned
//! [`DirtyLines`] into a pending region. A renderer drains that region with
//! [`EditSession::take_dirty`] once per frame.

use tinypad_buffer::{DirtyLines, TextBuffer};
use tinypad_input::KeyEvent;
use tracing::{debug, info, trace};

use crate::buffer_target::{execute_command, resolve_command};
use crate::config::{Config, Keymap};
use crate::modal::{KeyResult, ModalResolver, Mode};

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event was bound: its commands ran or it changed input state
    Yes,
    /// The event has no binding and was ignored
    No,
}

/// One editing session: a buffer, its configuration and pending redraw state.
#[derive(Debug)]
pub struct EditSession {
    buffer: TextBuffer,
    config: Config,
    dirty: DirtyLines,
    keys_handled: usize,
    /// Present when the modal keymap is configured
    modal: Option<ModalResolver>,
}

impl EditSession {
    /// Opens a session on an empty buffer.
    pub fn open(config: Config) -> Self {
        Self::with_buffer(config, TextBuffer::new())
    }

    /// Opens a session on `buffer`, applying the configured cursor hints.
    pub fn with_buffer(config: Config, mut buffer: TextBuffer) -> Self {
        config.cursor.apply(buffer.cursor_mut());
        info!(
            bytes = buffer.len(),
            lines = buffer.line_count(),
            "session opened"
        );
        let modal = match config.editing.keymap {
            Keymap::Standard => None,
            Keymap::Modal => Some(ModalResolver::new()),
        };
        Self {
            buffer,
            config,
            dirty: DirtyLines::None,
            keys_handled: 0,
            modal,
        }
    }

    /// Ends the session. Equivalent to dropping it.
    pub fn close(self) {}

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Mutable access for callers that drive the engine directly.
    ///
    /// Redraw regions from direct calls are not tracked; fold them in with
    /// [`EditSession::mark_dirty`].
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The modal resolver's current mode, or `None` for the standard keymap.
    pub fn mode(&self) -> Option<Mode> {
        self.modal.as_ref().map(ModalResolver::mode)
    }

    /// Resolves and executes one key event.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Handled {
        let commands = match self.modal.as_mut() {
            Some(modal) => {
                let before = modal.mode();
                let result = modal.handle_key(event);
                if modal.mode() != before {
                    debug!(mode = modal.mode().name(), "mode changed");
                }
                match result {
                    KeyResult::Execute(commands) => commands,
                    KeyResult::Consumed => {
                        self.keys_handled += 1;
                        return Handled::Yes;
                    }
                    KeyResult::Unhandled => {
                        trace!(key = %event, "unbound key");
                        return Handled::No;
                    }
                }
            }
            None => match resolve_command(event) {
                Some(cmd) => vec![cmd],
                None => {
                    trace!(key = %event, "unbound key");
                    return Handled::No;
                }
            },
        };

        for cmd in commands {
            debug!(key = %event, ?cmd, "executing");
            let dirty = execute_command(cmd, &mut self.buffer, &self.config.editing);
            self.mark_dirty(dirty);
        }
        self.keys_handled += 1;
        Handled::Yes
    }

    /// Inserts `text` verbatim at the cursor, bypassing key resolution.
    pub fn paste(&mut self, text: &[u8]) {
        debug!(bytes = text.len(), "paste");
        let dirty = self.buffer.insert_text(text);
        self.mark_dirty(dirty);
    }

    /// Folds an externally produced region into the pending one.
    pub fn mark_dirty(&mut self, dirty: DirtyLines) {
        self.dirty.merge(dirty);
    }

    /// The region accumulated since the last [`EditSession::take_dirty`].
    pub fn pending_dirty(&self) -> DirtyLines {
        self.dirty
    }

    /// Returns and clears the accumulated redraw region.
    pub fn take_dirty(&mut self) -> DirtyLines {
        std::mem::replace(&mut self.dirty, DirtyLines::None)
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        info!(
            keys = self.keys_handled,
            bytes = self.buffer.len(),
            modified = self.buffer.is_dirty(),
            "session closed"
        );
    }
}

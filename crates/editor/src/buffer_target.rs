// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
// Chunk: docs/chunks/cursor_navigation - Character, line and word movement
//!
//! Key-to-command resolution for the text buffer.
//!
//! Chord resolution is a stateless pure function: every supported chord is a
//! single modifier+key combination, so no state machine is needed. Key repeat
//! is left to whatever delivers the events.

use tinypad_buffer::{DirtyLines, Movement, TextBuffer};
use tinypad_input::{Key, KeyEvent};

use crate::config::EditingConfig;

/// Commands that can be executed on the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Insert a printable character at the cursor
    InsertChar(char),
    /// Insert a newline at the cursor
    InsertNewline,
    /// Insert a tab, or spaces when tabs are expanded
    InsertTab,
    /// Delete the byte before the cursor (Backspace)
    DeleteBackward,
    /// Delete the byte at the cursor (Delete key)
    DeleteForward,
    /// Move the cursor without editing
    Move(Movement),
    /// Step right unless the cursor is already at the end of its line
    Append,
}

impl Command {
    /// Returns true if the command can change the buffer's content.
    pub fn is_edit(&self) -> bool {
        !matches!(self, Command::Move(_) | Command::Append)
    }
}

/// Resolves a key event to a command.
///
/// Returns `None` for chords the buffer does not handle (Escape, paging,
/// command-modified characters).
pub fn resolve_command(event: &KeyEvent) -> Option<Command> {
    let mods = &event.modifiers;
    let word_mod = mods.option || mods.control;

    match &event.key {
        // Printable characters (no Command/Control modifier)
        Key::Char(ch) if !mods.command && !mods.control => Some(Command::InsertChar(*ch)),

        Key::Return if !mods.command && !mods.control => Some(Command::InsertNewline),
        Key::Tab if !mods.command && !mods.control => Some(Command::InsertTab),

        Key::Backspace => Some(Command::DeleteBackward),
        Key::Delete => Some(Command::DeleteForward),

        // Option/Control+arrows move by word; both together jump to the word end
        Key::Right if mods.option && mods.control && !mods.command => {
            Some(Command::Move(Movement::WordEnd))
        }
        Key::Left if word_mod && !mods.command => Some(Command::Move(Movement::WordLeft)),
        Key::Right if word_mod && !mods.command => Some(Command::Move(Movement::WordRight)),

        Key::Left if !mods.command => Some(Command::Move(Movement::Left)),
        Key::Right if !mods.command => Some(Command::Move(Movement::Right)),
        Key::Up if !mods.command => Some(Command::Move(Movement::Up)),
        Key::Down if !mods.command => Some(Command::Move(Movement::Down)),

        // Cmd+Left or Home → start of line
        Key::Left | Key::Home => Some(Command::Move(Movement::LineStart)),
        // Cmd+Right or End → end of line
        Key::Right | Key::End => Some(Command::Move(Movement::LineEnd)),
        // Cmd+Up / Cmd+Down → buffer edges
        Key::Up => Some(Command::Move(Movement::BufferStart)),
        Key::Down => Some(Command::Move(Movement::BufferEnd)),

        // Ctrl+A / Ctrl+E → line start / end (Emacs-style)
        Key::Char('a') if mods.control && !mods.command => Some(Command::Move(Movement::LineStart)),
        Key::Char('e') if mods.control && !mods.command => Some(Command::Move(Movement::LineEnd)),

        _ => None,
    }
}

/// Executes a command on `buffer`, returning the lines that need redrawing.
///
/// Movement never changes content, but the lines the caret left and entered
/// are reported so the old and new caret get redrawn.
pub fn execute_command(cmd: Command, buffer: &mut TextBuffer, editing: &EditingConfig) -> DirtyLines {
    match cmd {
        Command::InsertChar(ch) => buffer.insert_char(ch),
        Command::InsertNewline => buffer.insert_newline(),
        Command::InsertTab => {
            if editing.expand_tabs {
                buffer.insert_text(" ".repeat(editing.tab_width).as_bytes())
            } else {
                buffer.insert_text(b"\t")
            }
        }
        Command::DeleteBackward => buffer.delete_backward(),
        Command::DeleteForward => buffer.delete_forward(),
        Command::Move(movement) => {
            let before = buffer.cursor().line();
            let position = buffer.cursor().position();
            buffer.move_cursor(movement);
            if buffer.cursor().position() == position {
                return DirtyLines::None;
            }
            let mut dirty = DirtyLines::Single(before);
            dirty.merge(DirtyLines::Single(buffer.cursor().line()));
            dirty
        }
        Command::Append => {
            let cursor = buffer.cursor();
            if cursor.column() < buffer.line_len(cursor.line()) {
                execute_command(Command::Move(Movement::Right), buffer, editing)
            } else {
                DirtyLines::None
            }
        }
    }
}

// Chunk: docs/chunks/modal_editing - vi-style Normal/Insert key handling
//!
//! Modal key resolution.
//!
//! Unlike [`resolve_command`], a [`ModalResolver`] carries state between key
//! presses:
//!
//! - the current [`Mode`]
//! - a count prefix (`3j`, `12x`)
//! - a pending key sequence for multi-key bindings (`gg`)
//! - the last edit, replayed by `.`
//!
//! In Insert mode keys resolve exactly as in the standard keymap, and Escape
//! returns to Normal mode. In Normal mode printable keys are looked up in a
//! fixed binding table.
//!
//! The resolver never touches a buffer. It hands back the [`Command`]s to run,
//! so a repeated edit is re-evaluated against the buffer as it is at replay
//! time.

use serde::Serialize;
use tinypad_buffer::Movement;
use tinypad_input::{Key, KeyEvent};
use tracing::trace;

use crate::buffer_target::{resolve_command, Command};

/// Upper bound on a count prefix.
const MAX_COUNT: usize = 9_999;

/// Editing mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Keys are commands
    #[default]
    Normal,
    /// Keys insert text
    Insert,
}

impl Mode {
    /// Display name for status lines.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }
}

/// Outcome of one key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyResult {
    /// Run these commands in order
    Execute(Vec<Command>),
    /// The key only changed resolver state (a count digit, a sequence prefix,
    /// a mode switch)
    Consumed,
    /// No binding
    Unhandled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Binding {
    /// Move `count` times
    Motion(Movement),
    /// Run `count` times and remember for `.`
    Edit(Command),
    /// Run these once, then enter Insert mode
    Insert(&'static [Command]),
    /// Replay the last edit `count` times
    Repeat,
}

const NORMAL_BINDINGS: &[(&str, Binding)] = &[
    ("h", Binding::Motion(Movement::Left)),
    ("j", Binding::Motion(Movement::Down)),
    ("k", Binding::Motion(Movement::Up)),
    ("l", Binding::Motion(Movement::Right)),
    ("w", Binding::Motion(Movement::WordRight)),
    ("b", Binding::Motion(Movement::WordLeft)),
    ("e", Binding::Motion(Movement::WordEnd)),
    ("0", Binding::Motion(Movement::LineStart)),
    ("$", Binding::Motion(Movement::LineEnd)),
    ("gg", Binding::Motion(Movement::BufferStart)),
    ("G", Binding::Motion(Movement::BufferEnd)),
    ("x", Binding::Edit(Command::DeleteForward)),
    ("X", Binding::Edit(Command::DeleteBackward)),
    ("i", Binding::Insert(&[])),
    ("a", Binding::Insert(&[Command::Append])),
    ("I", Binding::Insert(&[Command::Move(Movement::LineStart)])),
    ("A", Binding::Insert(&[Command::Move(Movement::LineEnd)])),
    (
        "o",
        Binding::Insert(&[Command::Move(Movement::LineEnd), Command::InsertNewline]),
    ),
    (".", Binding::Repeat),
];

fn lookup(keys: &str) -> Option<Binding> {
    NORMAL_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == keys)
        .map(|(_, binding)| *binding)
}

fn is_prefix(keys: &str) -> bool {
    NORMAL_BINDINGS.iter().any(|(bound, _)| bound.starts_with(keys))
}

/// Arrow and Home/End keys keep working in Normal mode.
fn named_key_motion(key: &Key) -> Option<Movement> {
    Some(match key {
        Key::Left => Movement::Left,
        Key::Right => Movement::Right,
        Key::Up => Movement::Up,
        Key::Down => Movement::Down,
        Key::Home => Movement::LineStart,
        Key::End => Movement::LineEnd,
        _ => return None,
    })
}

/// Stateful key resolver for modal editing.
#[derive(Debug, Clone, Default)]
pub struct ModalResolver {
    mode: Mode,
    /// Accumulated count prefix, 0 when none was typed
    count: usize,
    /// Keys typed so far toward a multi-key binding
    key_sequence: String,
    /// Commands of the insert in progress, starting with its entry commands
    recording: Vec<Command>,
    /// Replayed by `.`
    last_edit: Option<Vec<Command>>,
}

impl ModalResolver {
    /// Creates a resolver in Normal mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Resolves one key press, updating mode and pending state.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyResult {
        match self.mode {
            Mode::Normal => self.handle_normal_key(event),
            Mode::Insert => self.handle_insert_key(event),
        }
    }

    fn handle_insert_key(&mut self, event: &KeyEvent) -> KeyResult {
        if event.key == Key::Escape {
            self.finish_insert();
            return KeyResult::Consumed;
        }

        match resolve_command(event) {
            Some(cmd) => {
                self.recording.push(cmd);
                KeyResult::Execute(vec![cmd])
            }
            None => KeyResult::Unhandled,
        }
    }

    fn handle_normal_key(&mut self, event: &KeyEvent) -> KeyResult {
        let mods = &event.modifiers;

        if event.key == Key::Escape {
            self.reset_params();
            return KeyResult::Consumed;
        }

        let ch = match &event.key {
            Key::Char(ch) if mods.is_empty() || mods.is_shift_only() => *ch,
            key if mods.is_empty() => {
                return match named_key_motion(key) {
                    Some(movement) => {
                        self.key_sequence.clear();
                        let count = self.take_count();
                        KeyResult::Execute(vec![Command::Move(movement); count])
                    }
                    None => {
                        self.reset_params();
                        KeyResult::Unhandled
                    }
                };
            }
            _ => {
                self.reset_params();
                return KeyResult::Unhandled;
            }
        };

        // A leading 0 is the line-start motion, not a count.
        if let Some(digit) = ch.to_digit(10) {
            if self.key_sequence.is_empty() && (digit != 0 || self.count > 0) {
                self.count = (self.count * 10 + digit as usize).min(MAX_COUNT);
                return KeyResult::Consumed;
            }
        }

        self.key_sequence.push(ch);
        if let Some(binding) = lookup(&self.key_sequence) {
            self.key_sequence.clear();
            let count = self.take_count();
            return self.apply(binding, count);
        }
        if is_prefix(&self.key_sequence) {
            return KeyResult::Consumed;
        }

        trace!(keys = %self.key_sequence, "no modal binding");
        self.reset_params();
        KeyResult::Unhandled
    }

    fn apply(&mut self, binding: Binding, count: usize) -> KeyResult {
        match binding {
            Binding::Motion(movement) => KeyResult::Execute(vec![Command::Move(movement); count]),
            Binding::Edit(cmd) => {
                let commands = vec![cmd; count];
                self.last_edit = Some(commands.clone());
                KeyResult::Execute(commands)
            }
            // Counts on insert entries are ignored.
            Binding::Insert(entry) => {
                self.mode = Mode::Insert;
                self.recording = entry.to_vec();
                trace!("entering insert mode");
                KeyResult::Execute(entry.to_vec())
            }
            Binding::Repeat => match &self.last_edit {
                Some(edit) => {
                    let commands = edit.iter().copied().cycle().take(edit.len() * count).collect();
                    KeyResult::Execute(commands)
                }
                None => KeyResult::Consumed,
            },
        }
    }

    fn finish_insert(&mut self) {
        self.mode = Mode::Normal;
        let recorded = std::mem::take(&mut self.recording);
        if recorded.iter().any(Command::is_edit) {
            self.last_edit = Some(recorded);
        }
        trace!("leaving insert mode");
    }

    fn take_count(&mut self) -> usize {
        std::mem::take(&mut self.count).max(1)
    }

    fn reset_params(&mut self) {
        self.count = 0;
        self.key_sequence.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(resolver: &mut ModalResolver, keys: &str) -> Vec<KeyResult> {
        keys.chars()
            .map(|ch| resolver.handle_key(&KeyEvent::char(ch)))
            .collect()
    }

    fn last(resolver: &mut ModalResolver, keys: &str) -> KeyResult {
        press(resolver, keys).pop().unwrap()
    }

    fn moves(movement: Movement, n: usize) -> KeyResult {
        KeyResult::Execute(vec![Command::Move(movement); n])
    }

    #[test]
    fn test_starts_in_normal_mode() {
        let resolver = ModalResolver::new();
        assert_eq!(resolver.mode(), Mode::Normal);
        assert_eq!(resolver.mode().name(), "NORMAL");
        assert_eq!(resolver.count, 0);
        assert_eq!(resolver.last_edit.as_deref(), None);
    }

    #[test]
    fn test_hjkl_and_word_motions() {
        let mut resolver = ModalResolver::new();
        assert_eq!(last(&mut resolver, "h"), moves(Movement::Left, 1));
        assert_eq!(last(&mut resolver, "j"), moves(Movement::Down, 1));
        assert_eq!(last(&mut resolver, "k"), moves(Movement::Up, 1));
        assert_eq!(last(&mut resolver, "l"), moves(Movement::Right, 1));
        assert_eq!(last(&mut resolver, "w"), moves(Movement::WordRight, 1));
        assert_eq!(last(&mut resolver, "b"), moves(Movement::WordLeft, 1));
        assert_eq!(last(&mut resolver, "e"), moves(Movement::WordEnd, 1));
        assert_eq!(last(&mut resolver, "$"), moves(Movement::LineEnd, 1));
        assert_eq!(last(&mut resolver, "G"), moves(Movement::BufferEnd, 1));
    }

    #[test]
    fn test_count_prefix() {
        let mut resolver = ModalResolver::new();
        assert_eq!(press(&mut resolver, "1"), vec![KeyResult::Consumed]);
        assert_eq!(last(&mut resolver, "2"), KeyResult::Consumed);
        assert_eq!(resolver.count, 12);
        assert_eq!(last(&mut resolver, "w"), moves(Movement::WordRight, 12));
        assert_eq!(resolver.count, 0);
    }

    #[test]
    fn test_zero_is_line_start_unless_counting() {
        let mut resolver = ModalResolver::new();
        assert_eq!(last(&mut resolver, "0"), moves(Movement::LineStart, 1));
        assert_eq!(last(&mut resolver, "10l"), moves(Movement::Right, 10));
    }

    #[test]
    fn test_count_is_capped() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "99999999999999999999");
        assert_eq!(resolver.count, MAX_COUNT);
    }

    #[test]
    fn test_multi_key_sequence() {
        let mut resolver = ModalResolver::new();
        assert_eq!(last(&mut resolver, "g"), KeyResult::Consumed);
        assert_eq!(resolver.key_sequence, "g");
        assert_eq!(last(&mut resolver, "g"), moves(Movement::BufferStart, 1));
        assert_eq!(resolver.key_sequence, "");
    }

    #[test]
    fn test_broken_sequence_is_unhandled_and_resets() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "3g");
        assert_eq!(last(&mut resolver, "q"), KeyResult::Unhandled);
        assert_eq!(resolver.key_sequence, "");
        assert_eq!(resolver.count, 0);
        assert_eq!(last(&mut resolver, "l"), moves(Movement::Right, 1));
    }

    #[test]
    fn test_escape_clears_pending_state() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "4g");
        assert_eq!(resolver.handle_key(&KeyEvent::key(Key::Escape)), KeyResult::Consumed);
        assert_eq!(resolver.count, 0);
        assert_eq!(resolver.key_sequence, "");
        assert_eq!(resolver.mode(), Mode::Normal);
    }

    #[test]
    fn test_arrows_take_counts_in_normal_mode() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "3");
        assert_eq!(resolver.handle_key(&KeyEvent::key(Key::Down)), moves(Movement::Down, 3));
        assert_eq!(resolver.handle_key(&KeyEvent::key(Key::Return)), KeyResult::Unhandled);
    }

    #[test]
    fn test_modified_keys_are_unbound_in_normal_mode() {
        let mut resolver = ModalResolver::new();
        assert_eq!(resolver.handle_key(&"ctrl+x".parse().unwrap()), KeyResult::Unhandled);
        assert_eq!(resolver.handle_key(&"option+left".parse().unwrap()), KeyResult::Unhandled);
        assert_eq!(
            resolver.handle_key(&"shift+G".parse().unwrap()),
            moves(Movement::BufferEnd, 1)
        );
    }

    #[test]
    fn test_delete_with_count_is_remembered() {
        let mut resolver = ModalResolver::new();
        let expected = vec![Command::DeleteForward; 3];
        assert_eq!(last(&mut resolver, "3x"), KeyResult::Execute(expected.clone()));
        assert_eq!(resolver.last_edit.as_deref(), Some(expected.as_slice()));
        assert_eq!(last(&mut resolver, "."), KeyResult::Execute(expected));
    }

    #[test]
    fn test_repeat_without_edit_does_nothing() {
        let mut resolver = ModalResolver::new();
        assert_eq!(last(&mut resolver, "."), KeyResult::Consumed);
        assert_eq!(last(&mut resolver, "w."), KeyResult::Consumed);
    }

    #[test]
    fn test_insert_mode_round_trip() {
        let mut resolver = ModalResolver::new();
        assert_eq!(last(&mut resolver, "i"), KeyResult::Execute(vec![]));
        assert_eq!(resolver.mode(), Mode::Insert);
        assert_eq!(last(&mut resolver, "h"), KeyResult::Execute(vec![Command::InsertChar('h')]));
        assert_eq!(
            resolver.handle_key(&KeyEvent::key(Key::Return)),
            KeyResult::Execute(vec![Command::InsertNewline])
        );
        assert_eq!(resolver.handle_key(&KeyEvent::key(Key::Escape)), KeyResult::Consumed);
        assert_eq!(resolver.mode(), Mode::Normal);
        assert_eq!(
            resolver.last_edit.as_deref(),
            Some(&[Command::InsertChar('h'), Command::InsertNewline][..])
        );
    }

    #[test]
    fn test_repeat_replays_insert_with_entry_commands() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "ohi");
        resolver.handle_key(&KeyEvent::key(Key::Escape));

        let once = vec![
            Command::Move(Movement::LineEnd),
            Command::InsertNewline,
            Command::InsertChar('h'),
            Command::InsertChar('i'),
        ];
        assert_eq!(resolver.last_edit.as_deref(), Some(once.as_slice()));

        let mut twice = once.clone();
        twice.extend(once);
        assert_eq!(last(&mut resolver, "2."), KeyResult::Execute(twice));
    }

    #[test]
    fn test_insert_without_edits_keeps_previous_repeat() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "x");
        press(&mut resolver, "a");
        resolver.handle_key(&KeyEvent::key(Key::Left));
        resolver.handle_key(&KeyEvent::key(Key::Escape));
        assert_eq!(resolver.last_edit.as_deref(), Some(&[Command::DeleteForward][..]));
    }

    #[test]
    fn test_insert_entry_commands() {
        let mut resolver = ModalResolver::new();
        assert_eq!(last(&mut resolver, "a"), KeyResult::Execute(vec![Command::Append]));
        resolver.handle_key(&KeyEvent::key(Key::Escape));
        assert_eq!(
            last(&mut resolver, "A"),
            KeyResult::Execute(vec![Command::Move(Movement::LineEnd)])
        );
        resolver.handle_key(&KeyEvent::key(Key::Escape));
        assert_eq!(
            last(&mut resolver, "I"),
            KeyResult::Execute(vec![Command::Move(Movement::LineStart)])
        );
        assert_eq!(resolver.mode(), Mode::Insert);
    }

    #[test]
    fn test_unbound_key_in_insert_mode() {
        let mut resolver = ModalResolver::new();
        press(&mut resolver, "i");
        assert_eq!(resolver.handle_key(&"cmd+s".parse().unwrap()), KeyResult::Unhandled);
        assert_eq!(resolver.mode(), Mode::Insert);
    }
}

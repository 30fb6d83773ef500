// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
//!
//! Integration tests for typing through a session.
//!
//! These exercise the full path from KeyEvent → resolve_command → TextBuffer
//! → DirtyLines without any window system.

use tinypad::input::{Key, KeyEvent, Modifiers};
use tinypad::{Config, EditSession, EditingConfig, Handled};
use tinypad_buffer::{DirtyLines, Position, TextBuffer};

/// Drives a session the way a main loop would.
struct MockEditor {
    session: EditSession,
}

impl MockEditor {
    fn new() -> Self {
        Self {
            session: EditSession::open(Config::default()),
        }
    }

    fn from_str(content: &str) -> Self {
        Self {
            session: EditSession::with_buffer(Config::default(), TextBuffer::from_str(content)),
        }
    }

    fn with_config(config: Config) -> Self {
        Self {
            session: EditSession::open(config),
        }
    }

    fn press(&mut self, chord: &str) -> Handled {
        let event: KeyEvent = chord.parse().unwrap();
        self.session.handle_key(&event)
    }

    fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            let event = if ch == '\n' {
                KeyEvent::key(Key::Return)
            } else {
                KeyEvent::char(ch)
            };
            self.session.handle_key(&event);
        }
    }

    fn content(&self) -> String {
        self.session.buffer().text()
    }

    fn cursor(&self) -> Position {
        self.session.buffer().cursor_position()
    }
}

// =============================================================================
// Typing Tests
// =============================================================================

#[test]
fn test_typing_hello() {
    let mut editor = MockEditor::new();
    editor.type_str("Hello");

    assert_eq!(editor.content(), "Hello");
    assert_eq!(editor.cursor(), Position::new(0, 5));
}

#[test]
fn test_typing_then_backspace() {
    let mut editor = MockEditor::new();
    editor.type_str("Hello");
    editor.press("backspace");
    editor.press("backspace");

    assert_eq!(editor.content(), "Hel");
    assert_eq!(editor.cursor(), Position::new(0, 3));
}

#[test]
fn test_typing_multiline() {
    let mut editor = MockEditor::new();
    editor.type_str("Hello\nWorld");

    assert_eq!(editor.content(), "Hello\nWorld");
    assert_eq!(editor.session.buffer().line_starts(), &[0, 6]);
    assert_eq!(editor.cursor(), Position::new(1, 5));
}

#[test]
fn test_insert_in_middle() {
    let mut editor = MockEditor::from_str("Hllo");
    editor.press("right");
    editor.press("e");

    assert_eq!(editor.content(), "Hello");
    assert_eq!(editor.cursor(), Position::new(0, 2));
}

#[test]
fn test_delete_forward_joins_lines() {
    let mut editor = MockEditor::from_str("ab\ncd");
    editor.press("end");
    editor.press("delete");

    assert_eq!(editor.content(), "abcd");
    assert_eq!(editor.cursor(), Position::new(0, 2));
}

#[test]
fn test_up_from_second_line() {
    let mut editor = MockEditor::from_str("ab\ncd");
    editor.press("cmd+down");
    assert_eq!(editor.session.buffer().cursor().position(), 5);

    editor.press("up");
    assert_eq!(editor.session.buffer().cursor().position(), 2);
    assert_eq!(editor.cursor(), Position::new(0, 2));
}

#[test]
fn test_word_chords() {
    let mut editor = MockEditor::from_str("foo bar baz");
    editor.press("option+right");
    assert_eq!(editor.cursor(), Position::new(0, 4));
    editor.press("ctrl+option+right");
    assert_eq!(editor.cursor(), Position::new(0, 7));
    editor.press("ctrl+left");
    assert_eq!(editor.cursor(), Position::new(0, 4));
}

#[test]
fn test_control_characters_are_not_typed() {
    let mut editor = MockEditor::from_str("x");
    editor.type_str("\u{7}\u{1b}\u{7f}");
    assert_eq!(editor.content(), "x");
    assert!(!editor.session.buffer().is_dirty());
}

#[test]
fn test_modified_chars_are_unbound() {
    let mut editor = MockEditor::new();
    let event = KeyEvent::new(
        Key::Char('q'),
        Modifiers {
            command: true,
            ..Default::default()
        },
    );
    assert_eq!(editor.session.handle_key(&event), Handled::No);
    assert_eq!(editor.content(), "");
}

#[test]
fn test_tab_follows_config() {
    let mut editor = MockEditor::new();
    editor.press("tab");
    assert_eq!(editor.content(), "\t");

    let mut editor = MockEditor::with_config(Config {
        editing: EditingConfig {
            tab_width: 3,
            expand_tabs: true,
            ..Default::default()
        },
        ..Default::default()
    });
    editor.press("tab");
    editor.press("x");
    assert_eq!(editor.content(), "   x");
    assert_eq!(editor.cursor(), Position::new(0, 4));
}

#[test]
fn test_dirty_region_drains_per_frame() {
    let mut editor = MockEditor::from_str("one\ntwo\nthree");
    editor.press("down");
    editor.type_str("!!");
    assert_eq!(editor.session.take_dirty(), DirtyLines::Range { from: 0, to: 2 });

    editor.press("cmd+right");
    editor.press("return");
    assert_eq!(editor.session.take_dirty(), DirtyLines::FromLineToEnd(1));
    assert_eq!(editor.session.take_dirty(), DirtyLines::None);
}

#[test]
fn test_mark_clean_after_save_point() {
    let mut editor = MockEditor::new();
    editor.type_str("draft");
    assert!(editor.session.buffer().is_dirty());

    editor.session.buffer_mut().mark_clean();
    assert!(!editor.session.buffer().is_dirty());

    editor.press("left");
    assert!(!editor.session.buffer().is_dirty());
    editor.press("backspace");
    assert!(editor.session.buffer().is_dirty());
}

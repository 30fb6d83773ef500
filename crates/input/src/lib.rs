// Chunk: docs/chunks/input_types - Shared key-event types crate
//!
//! Key event types for driving the tinypad buffer.
//!
//! A host decodes whatever its platform delivers (terminal escape sequences,
//! window-system key events, a test script) into [`KeyEvent`]s. Chords can also
//! be written as text, `"ctrl+left"` or `"option+right"`, and parsed with
//! [`str::parse`].

use std::fmt;
use std::str::FromStr;

/// A keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new KeyEvent with the given key and modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a KeyEvent for a single character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers::default(),
        }
    }

    /// Creates a KeyEvent for a non-character key with no modifiers.
    pub fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Modifier keys that can be held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key
    pub shift: bool,
    /// Command key (Cmd/⌘)
    pub command: bool,
    /// Option key (Alt/⌥)
    pub option: bool,
    /// Control key (Ctrl/⌃)
    pub control: bool,
}

impl Modifiers {
    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.command && !self.option && !self.control
    }

    /// Returns true if only shift is held (for uppercase letters).
    pub fn is_shift_only(&self) -> bool {
        self.shift && !self.command && !self.option && !self.control
    }

    /// Sets the modifier named by `name`. Returns false for unknown names.
    fn set_named(&mut self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "shift" => self.shift = true,
            "cmd" | "command" | "super" => self.command = true,
            "opt" | "option" | "alt" => self.option = true,
            "ctrl" | "control" => self.control = true,
            _ => return false,
        }
        true
    }
}

/// Keys that can be pressed.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    /// Backspace / Delete backward
    Backspace,
    /// Forward delete
    Delete,
    /// Return / Enter
    Return,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
}

impl Key {
    fn from_name(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(ch));
        }
        let key = match name.to_ascii_lowercase().as_str() {
            "space" => Key::Char(' '),
            "plus" => Key::Char('+'),
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "return" | "enter" => Key::Return,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "home" => Key::Home,
            "end" => Key::End,
            "tab" => Key::Tab,
            "escape" | "esc" => Key::Escape,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }

    fn name(&self) -> String {
        match self {
            Key::Char(' ') => "space".to_string(),
            Key::Char('+') => "plus".to_string(),
            Key::Char(ch) => ch.to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Delete => "delete".to_string(),
            Key::Return => "return".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::Home => "home".to_string(),
            Key::End => "end".to_string(),
            Key::Tab => "tab".to_string(),
            Key::Escape => "escape".to_string(),
            Key::PageUp => "pageup".to_string(),
            Key::PageDown => "pagedown".to_string(),
        }
    }
}

/// Failure to parse a chord string into a [`KeyEvent`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

impl FromStr for KeyEvent {
    type Err = ParseKeyError;

    /// Parses `[modifier+]*key`, e.g. `a`, `return`, `ctrl+a`, `option+left`.
    ///
    /// A trailing `++` (or a lone `+`) names the plus key itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseKeyError::Empty);
        }

        let (prefix, key_name) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            }
        };

        if key_name.is_empty() {
            return Err(ParseKeyError::Empty);
        }

        let mut modifiers = Modifiers::default();
        for name in prefix.split('+').filter(|name| !name.is_empty()) {
            if !modifiers.set_named(name) {
                return Err(ParseKeyError::UnknownModifier(name.to_string()));
            }
        }

        let key = Key::from_name(key_name)
            .ok_or_else(|| ParseKeyError::UnknownKey(key_name.to_string()))?;
        Ok(KeyEvent { key, modifiers })
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        for (held, name) in [
            (m.control, "ctrl"),
            (m.option, "option"),
            (m.command, "cmd"),
            (m.shift, "shift"),
        ] {
            if held {
                write!(f, "{}+", name)?;
            }
        }
        f.write_str(&self.key.name())
    }
}

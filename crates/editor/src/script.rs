// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
//!
//! Key scripts.
//!
//! A script is a line-oriented list of input directives replayed against a
//! session, standing in for a keyboard:
//!
//! ```text
//! # comments and blank lines are ignored
//! type fn main() {}     each character becomes one key press
//! key option+left       one chord, parsed as a KeyEvent
//! paste a\tb\nc         raw bytes inserted verbatim (\n, \t and \\ escapes)
//! ```

use tinypad_input::KeyEvent;
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::{EditSession, Handled};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Press a single chord
    Key(KeyEvent),
    /// Press each character of the text as an unmodified key
    Type(String),
    /// Insert raw bytes at the cursor without key resolution
    Paste(Vec<u8>),
}

/// Parses a whole script. Line numbers in errors are 1-based.
pub fn parse_script(source: &str) -> Result<Vec<Directive>> {
    let mut directives = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        if let Some(directive) = parse_line(raw, index + 1)? {
            directives.push(directive);
        }
    }
    Ok(directives)
}

fn parse_line(raw: &str, line: usize) -> Result<Option<Directive>> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let directive = match word {
        "key" => {
            let event = rest
                .parse::<KeyEvent>()
                .map_err(|source| Error::Key { line, source })?;
            Directive::Key(event)
        }
        "type" => Directive::Type(rest.to_string()),
        "paste" => Directive::Paste(unescape(rest).map_err(|message| Error::Script { line, message })?),
        other => {
            return Err(Error::Script {
                line,
                message: format!("unknown directive `{}`", other),
            })
        }
    };
    Ok(Some(directive))
}

/// Expands `\n`, `\t` and `\\`.
fn unescape(text: &str) -> std::result::Result<Vec<u8>, String> {
    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => out.push(b'\n'),
            Some('t') => out.push(b'\t'),
            Some('\\') => out.push(b'\\'),
            Some(other) => return Err(format!("unknown escape `\\{}`", other)),
            None => return Err("trailing backslash".to_string()),
        }
    }
    Ok(out)
}

/// Replays `directives` against `session`.
///
/// Returns the number of key presses that had no binding.
pub fn run_script(session: &mut EditSession, directives: &[Directive]) -> usize {
    let mut unhandled = 0;
    let mut press = |session: &mut EditSession, event: &KeyEvent| {
        if session.handle_key(event) == Handled::No {
            unhandled += 1;
        }
    };

    for directive in directives {
        match directive {
            Directive::Key(event) => press(session, event),
            Directive::Type(text) => {
                for ch in text.chars() {
                    press(session, &KeyEvent::char(ch));
                }
            }
            Directive::Paste(bytes) => session.paste(bytes),
        }
    }

    debug!(directives = directives.len(), unhandled, "script finished");
    unhandled
}

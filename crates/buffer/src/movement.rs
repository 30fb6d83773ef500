// Chunk: docs/chunks/cursor_navigation - Cursor record and movement commands

//! Movement commands and the pure functions that resolve them.
//!
//! Resolving a movement never touches the content or the line index; it only
//! computes the cursor's next byte offset. The caller stores that offset and
//! resynchronises line/column.

use crate::cursor::Cursor;
use crate::line_index::LineIndex;

/// A discrete cursor movement, as decoded by the host from key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// Back to the start of the previous (or current) word.
    WordLeft,
    /// Forward past the current word and the whitespace after it.
    WordRight,
    /// Forward to just past the end of the next word.
    WordEnd,
    BufferStart,
    BufferEnd,
}

/// Word separators: space, tab and newline. Everything else is part of a word.
pub fn is_word_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n')
}

/// Returns the offset `movement` takes the cursor to.
///
/// Every boundary clamps; a movement that cannot go anywhere returns the
/// current position.
pub(crate) fn resolve(
    movement: Movement,
    content: &[u8],
    index: &LineIndex,
    cursor: &Cursor,
) -> usize {
    let pos = cursor.position;
    let len = content.len();

    match movement {
        Movement::Left => pos.saturating_sub(1),
        Movement::Right => (pos + 1).min(len),
        Movement::Up => match cursor.line.checked_sub(1) {
            Some(dest) => vertical_target(index, len, dest, cursor.column),
            None => pos,
        },
        Movement::Down => {
            let dest = cursor.line + 1;
            if dest < index.line_count() {
                vertical_target(index, len, dest, cursor.column)
            } else {
                pos
            }
        }
        Movement::LineStart => index.line_start(cursor.line).unwrap_or(0),
        Movement::LineEnd => index.line_end(cursor.line, len).unwrap_or(len),
        Movement::WordLeft => word_left(content, pos),
        Movement::WordRight => word_right(content, pos),
        Movement::WordEnd => word_end(content, pos),
        Movement::BufferStart => 0,
        Movement::BufferEnd => len,
    }
}

/// Offset on `dest` at `column`, clamped to that line's visible length.
fn vertical_target(index: &LineIndex, len: usize, dest: usize, column: usize) -> usize {
    let start = index.line_start(dest).unwrap_or(len);
    start + column.min(index.line_len(dest, len))
}

fn word_left(content: &[u8], pos: usize) -> usize {
    let mut i = pos.min(content.len());
    while i > 0 && is_word_separator(content[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_word_separator(content[i - 1]) {
        i -= 1;
    }
    i
}

fn word_right(content: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < content.len() && !is_word_separator(content[i]) {
        i += 1;
    }
    while i < content.len() && is_word_separator(content[i]) {
        i += 1;
    }
    i
}

fn word_end(content: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < content.len() && is_word_separator(content[i]) {
        i += 1;
    }
    while i < content.len() && !is_word_separator(content[i]) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(content: &[u8], pos: usize) -> (LineIndex, Cursor) {
        let index = LineIndex::from_bytes(content);
        let mut cursor = Cursor::new();
        cursor.position = pos;
        cursor.resync(&index, content.len());
        (index, cursor)
    }

    fn run(content: &[u8], pos: usize, movement: Movement) -> usize {
        let (index, cursor) = at(content, pos);
        resolve(movement, content, &index, &cursor)
    }

    #[test]
    fn test_left_right_clamp_at_edges() {
        assert_eq!(run(b"abc", 0, Movement::Left), 0);
        assert_eq!(run(b"abc", 3, Movement::Right), 3);
        assert_eq!(run(b"a\nb", 2, Movement::Left), 1);
        assert_eq!(run(b"a\nb", 1, Movement::Right), 2);
    }

    #[test]
    fn test_up_clamps_to_shorter_line() {
        assert_eq!(run(b"ab\ncd", 5, Movement::Up), 2);
        assert_eq!(run(b"a\nlonger", 7, Movement::Up), 1);
    }

    #[test]
    fn test_down_keeps_column_when_it_fits() {
        assert_eq!(run(b"abc\ndef", 1, Movement::Down), 5);
    }

    #[test]
    fn test_down_onto_short_middle_line_stays_on_it() {
        // "abcdef\nx\nyz": column 5 on line 0 clamps to the end of "x".
        assert_eq!(run(b"abcdef\nx\nyz", 5, Movement::Down), 8);
    }

    #[test]
    fn test_vertical_moves_at_document_edges() {
        assert_eq!(run(b"ab\ncd", 1, Movement::Up), 1);
        assert_eq!(run(b"ab\ncd", 4, Movement::Down), 4);
    }

    #[test]
    fn test_line_start_and_end() {
        assert_eq!(run(b"one\ntwo\nthree", 6, Movement::LineStart), 4);
        assert_eq!(run(b"one\ntwo\nthree", 5, Movement::LineEnd), 7);
        assert_eq!(run(b"one\ntwo\nthree", 9, Movement::LineEnd), 13);
    }

    #[test]
    fn test_word_right_skips_word_then_space() {
        assert_eq!(run(b"foo bar", 0, Movement::WordRight), 4);
        assert_eq!(run(b"foo bar", 4, Movement::WordRight), 7);
        assert_eq!(run(b"foo \t\n bar", 1, Movement::WordRight), 7);
    }

    #[test]
    fn test_word_right_from_whitespace_skips_only_whitespace() {
        assert_eq!(run(b"foo   bar", 3, Movement::WordRight), 6);
    }

    #[test]
    fn test_word_left_lands_on_word_start() {
        assert_eq!(run(b"foo bar", 7, Movement::WordLeft), 4);
        assert_eq!(run(b"foo bar", 4, Movement::WordLeft), 0);
        assert_eq!(run(b"foo bar", 5, Movement::WordLeft), 4);
        assert_eq!(run(b"foo\n\n  bar", 7, Movement::WordLeft), 0);
    }

    #[test]
    fn test_word_moves_at_buffer_edges() {
        assert_eq!(run(b"foo", 0, Movement::WordLeft), 0);
        assert_eq!(run(b"foo", 3, Movement::WordRight), 3);
        assert_eq!(run(b"foo", 3, Movement::WordEnd), 3);
        assert_eq!(run(b"   ", 0, Movement::WordLeft), 0);
    }

    #[test]
    fn test_word_end() {
        assert_eq!(run(b"foo bar", 0, Movement::WordEnd), 3);
        assert_eq!(run(b"foo bar", 2, Movement::WordEnd), 3);
        assert_eq!(run(b"foo bar", 3, Movement::WordEnd), 7);
        assert_eq!(run(b"foo   ", 3, Movement::WordEnd), 6);
    }

    #[test]
    fn test_buffer_start_and_end() {
        assert_eq!(run(b"a\nb\nc", 2, Movement::BufferStart), 0);
        assert_eq!(run(b"a\nb\nc", 2, Movement::BufferEnd), 5);
    }

    #[test]
    fn test_separators() {
        assert!(is_word_separator(b' '));
        assert!(is_word_separator(b'\t'));
        assert!(is_word_separator(b'\n'));
        assert!(!is_word_separator(b'_'));
        assert!(!is_word_separator(b'.'));
    }
}

// Chunk: docs/chunks/text_buffer - Byte buffer engine with line index and cursor

//! TextBuffer is the public API of the engine.
//!
//! It owns the raw bytes, the line-start index derived from them, and the
//! cursor. Every mutation rebuilds the whole line index and then
//! resynchronises the cursor's line/column; navigation leaves the index alone
//! and only resynchronises the cursor.
//!
//! Out-of-range requests are absorbed as no-ops. Mutations report which lines
//! they dirtied; a no-op reports `DirtyLines::None`.

use tracing::trace;

use crate::content::Content;
use crate::cursor::Cursor;
use crate::line_index::LineIndex;
use crate::measure::TextMeasure;
use crate::movement::{self, Movement};
use crate::types::{DirtyLines, Position};

/// Lowest code point `insert_char` accepts (space).
const PRINTABLE_MIN: u32 = 32;
/// Highest code point `insert_char` accepts (`~`).
const PRINTABLE_MAX: u32 = 126;

/// An editable document: bytes, line index, cursor, and a modification flag.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    content: Content,
    line_index: LineIndex,
    cursor: Cursor,
    dirty: bool,
}

impl TextBuffer {
    /// Creates an empty buffer with the cursor at the origin.
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            line_index: LineIndex::new(),
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    /// Creates a buffer holding `bytes`, cursor at the origin, not dirty.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            content: Content::from_bytes(bytes),
            line_index: LineIndex::from_bytes(bytes),
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    /// Creates a buffer holding `content`.
    ///
    /// Not `FromStr`: seeding a buffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    // ==================== Accessors ====================

    /// The raw document bytes.
    pub fn content(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// The document as text, with any invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.content.as_bytes()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Offsets at which each line starts. Never empty; the first entry is 0.
    pub fn line_starts(&self) -> &[usize] {
        self.line_index.line_starts()
    }

    /// Number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Bytes from the start of `line` to the start of the next line, or to the
    /// end of the content for the last line. The trailing `'\n'` counts.
    ///
    /// Returns 0 for a line past the end.
    pub fn line_length(&self, line: usize) -> usize {
        self.line_index.line_span(line, self.content.len())
    }

    /// Visible length of `line`, without its `'\n'`. 0 past the end.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index.line_len(line, self.content.len())
    }

    /// The visible bytes of `line`, without its `'\n'`. Empty past the end.
    pub fn line_bytes(&self, line: usize) -> &[u8] {
        let len = self.content.len();
        match (
            self.line_index.line_start(line),
            self.line_index.line_end(line, len),
        ) {
            (Some(start), Some(end)) => &self.content.as_bytes()[start..end],
            _ => &[],
        }
    }

    /// The visible text of `line` (lossy UTF-8). Empty past the end.
    pub fn line_content(&self, line: usize) -> String {
        String::from_utf8_lossy(self.line_bytes(line)).into_owned()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Mutable access to the cursor's rendering hints (style, color, blink).
    /// Position, line and column cannot be written through it.
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// The cursor as (line, column).
    pub fn cursor_position(&self) -> Position {
        self.cursor.coords()
    }

    /// True once any mutation has succeeded since creation or `mark_clean`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the modification flag.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // ==================== Cursor Movement ====================

    /// Applies a movement command. Never changes the content.
    pub fn move_cursor(&mut self, movement: Movement) {
        let target = movement::resolve(
            movement,
            self.content.as_bytes(),
            &self.line_index,
            &self.cursor,
        );
        if target == self.cursor.position {
            trace!(?movement, position = target, "movement absorbed at boundary");
            return;
        }
        self.cursor.position = target;
        self.resync_cursor();
    }

    /// Places the cursor at an absolute offset, clamped to the content.
    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor.position = offset.min(self.content.len());
        self.resync_cursor();
    }

    /// Places the cursor at (line, column). The line is clamped to the last
    /// line and the column to that line's visible length.
    pub fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.line_count() - 1);
        let start = self.line_index.line_start(line).unwrap_or(0);
        self.cursor.position = start + pos.col.min(self.line_len(line));
        self.resync_cursor();
    }

    // ==================== Mutations ====================

    /// Inserts one printable ASCII character (code points 32..=126) at the
    /// cursor and advances past it.
    ///
    /// Anything else, including `'\n'` and `'\t'`, is silently dropped; use
    /// [`TextBuffer::insert_text`] or [`TextBuffer::insert_newline`] for those.
    pub fn insert_char(&mut self, ch: char) -> DirtyLines {
        let code = ch as u32;
        if !(PRINTABLE_MIN..=PRINTABLE_MAX).contains(&code) {
            trace!(code, "insert_char rejected non-printable character");
            return DirtyLines::None;
        }

        let at = self.cursor.position;
        // The range check above makes the narrowing lossless.
        if !self.content.insert_byte(at, code as u8) {
            trace!(at, len = self.content.len(), "insert_char outside content");
            return DirtyLines::None;
        }

        let line = self.cursor.line;
        self.cursor.position = at + 1;
        self.after_mutation();
        DirtyLines::Single(line)
    }

    /// Inserts `text` verbatim at the cursor and advances past it.
    ///
    /// Unlike [`TextBuffer::insert_char`] the bytes are not filtered: this is
    /// the entry point for trusted content such as pasted text, and it accepts
    /// newlines, tabs and control bytes alike. Empty input is a no-op.
    pub fn insert_text(&mut self, text: &[u8]) -> DirtyLines {
        if text.is_empty() {
            return DirtyLines::None;
        }

        let at = self.cursor.position;
        if !self.content.insert_bytes(at, text) {
            trace!(at, len = self.content.len(), "insert_text outside content");
            return DirtyLines::None;
        }

        let line = self.cursor.line;
        self.cursor.position = at + text.len();
        self.after_mutation();

        if memchr::memchr(b'\n', text).is_some() {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        }
    }

    /// [`TextBuffer::insert_text`] for string slices.
    pub fn insert_str(&mut self, text: &str) -> DirtyLines {
        self.insert_text(text.as_bytes())
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) -> DirtyLines {
        self.insert_text(b"\n")
    }

    /// Removes the byte before the cursor (Backspace). No-op at offset 0.
    pub fn delete_backward(&mut self) -> DirtyLines {
        let Some(at) = self.cursor.position.checked_sub(1) else {
            return DirtyLines::None;
        };
        let Some(removed) = self.content.remove_byte(at) else {
            return DirtyLines::None;
        };

        self.cursor.position = at;
        self.after_mutation();

        let line = self.cursor.line;
        if removed == b'\n' {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        }
    }

    /// Removes the byte under the cursor (forward Delete). No-op at the end.
    pub fn delete_forward(&mut self) -> DirtyLines {
        let at = self.cursor.position;
        let Some(removed) = self.content.remove_byte(at) else {
            return DirtyLines::None;
        };

        self.after_mutation();

        let line = self.cursor.line;
        if removed == b'\n' {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        }
    }

    // ==================== Measurement ====================

    /// Horizontal caret offset within its line, as measured by `measure`.
    ///
    /// The bytes from the start of the cursor's line up to the cursor are
    /// handed to the collaborator as a NUL-terminated string. The terminator
    /// exists only while `measure` runs and is removed on every exit path,
    /// including a panic inside `measure`.
    pub fn caret_x<M>(&mut self, measure: &M) -> f32
    where
        M: TextMeasure + ?Sized,
    {
        let start = self.line_index.line_start(self.cursor.line).unwrap_or(0);
        let guard = self.content.terminate_at(start, self.cursor.position);
        measure.measure(guard.as_c_str())
    }

    // ==================== Synchronization ====================

    /// Rebuilds the line index from scratch, then resyncs the cursor.
    fn after_mutation(&mut self) {
        self.dirty = true;
        self.line_index.rebuild(self.content.as_bytes());
        self.resync_cursor();
    }

    fn resync_cursor(&mut self) {
        self.cursor.resync(&self.line_index, self.content.len());
        self.assert_invariants();
    }

    /// Debug check of the cursor/index invariants. Compiled out in release.
    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        let starts = self.line_index.line_starts();
        let cursor = &self.cursor;
        debug_assert_eq!(starts.first(), Some(&0), "line index must start at 0");
        debug_assert!(cursor.position <= self.content.len());
        debug_assert!(starts[cursor.line] <= cursor.position);
        debug_assert!(
            starts
                .get(cursor.line + 1)
                .map_or(true, |&next| cursor.position < next),
            "cursor line is not the greatest start <= position: {:?} {:?}",
            cursor,
            starts,
        );
        debug_assert_eq!(cursor.column, cursor.position - starts[cursor.line]);
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

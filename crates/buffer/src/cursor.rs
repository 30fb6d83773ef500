// Chunk: docs/chunks/cursor_navigation - Cursor record and movement commands

use crate::line_index::LineIndex;
use crate::types::{Color, CursorStyle, Position};

/// The buffer's single cursor.
///
/// `position` is the source of truth. `line` and `column` are derived from it
/// by [`Cursor::resync`], which is the only code path that writes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub(crate) position: usize,
    /// Reserved for a future selection feature. Kept in range but never read
    /// by editing or movement.
    pub(crate) selection_anchor: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
    style: CursorStyle,
    color: Color,
    blink: bool,
}

impl Cursor {
    /// A cursor at the origin of an empty document.
    pub fn new() -> Self {
        Self {
            position: 0,
            selection_anchor: 0,
            line: 0,
            column: 0,
            style: CursorStyle::default(),
            color: Color::default(),
            blink: true,
        }
    }

    /// Absolute byte offset into the content.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn selection_anchor(&self) -> usize {
        self.selection_anchor
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset within the current line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The cursor as a (line, column) pair.
    pub fn coords(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn style(&self) -> CursorStyle {
        self.style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn blink(&self) -> bool {
        self.blink
    }

    pub fn set_style(&mut self, style: CursorStyle) {
        self.style = style;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_blink(&mut self, blink: bool) {
        self.blink = blink;
    }

    /// Recomputes `line` and `column` from `position`.
    ///
    /// `position` and the selection anchor are first clamped to `content_len`
    /// so the derived coordinates are always defined.
    pub(crate) fn resync(&mut self, index: &LineIndex, content_len: usize) {
        self.position = self.position.min(content_len);
        self.selection_anchor = self.selection_anchor.min(content_len);
        self.line = index.line_at_offset(self.position);
        // line_at_offset never returns a line past the end of the index.
        self.column = self.position - index.line_start(self.line).unwrap_or(0);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_at_origin() {
        let cursor = Cursor::new();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.coords(), Position::new(0, 0));
        assert_eq!(cursor.style(), CursorStyle::Bar);
    }

    #[test]
    fn test_resync_derives_line_and_column() {
        let index = LineIndex::from_bytes(b"hello\nworld");
        let mut cursor = Cursor::new();
        cursor.position = 8;
        cursor.resync(&index, 11);
        assert_eq!(cursor.coords(), Position::new(1, 2));
    }

    #[test]
    fn test_resync_on_line_start_picks_later_line() {
        let index = LineIndex::from_bytes(b"ab\n\ncd");
        let mut cursor = Cursor::new();
        cursor.position = 3;
        cursor.resync(&index, 6);
        assert_eq!(cursor.coords(), Position::new(1, 0));
        cursor.position = 4;
        cursor.resync(&index, 6);
        assert_eq!(cursor.coords(), Position::new(2, 0));
    }

    #[test]
    fn test_resync_clamps_position_and_anchor() {
        let index = LineIndex::from_bytes(b"abc");
        let mut cursor = Cursor::new();
        cursor.position = 10;
        cursor.selection_anchor = 12;
        cursor.resync(&index, 3);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.selection_anchor(), 3);
        assert_eq!(cursor.column(), 3);
    }

    #[test]
    fn test_appearance_setters_do_not_move() {
        let mut cursor = Cursor::new();
        cursor.set_style(CursorStyle::Underscore);
        cursor.set_color(Color::rgba(1, 2, 3, 4));
        cursor.set_blink(false);
        assert_eq!(cursor.style(), CursorStyle::Underscore);
        assert_eq!(cursor.color(), Color::rgba(1, 2, 3, 4));
        assert!(!cursor.blink());
        assert_eq!(cursor.position(), 0);
    }
}

// Chunk: docs/chunks/text_buffer - Byte buffer engine with line index and cursor

/// A (line, column) coordinate. Both are 0-indexed; `col` counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Visual shape of the caret. Purely a rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Bar,
    Block,
    Underscore,
}

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgba(0xd0, 0xd0, 0xd0, 0xff)
    }
}

/// Which rendered lines a mutation invalidated.
///
/// Hosts drain several commands per frame, merge the results, and redraw once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyLines {
    /// Nothing changed (rejected input, edit at a buffer boundary).
    None,
    /// Exactly one line changed.
    Single(usize),
    /// Lines in `[from, to)` changed.
    Range { from: usize, to: usize },
    /// Every line from this one to the end of the buffer changed. Produced
    /// whenever a newline is inserted or removed, since all later lines shift.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the first dirty line, if any.
    pub fn start_line(&self) -> Option<usize> {
        match *self {
            DirtyLines::None => None,
            DirtyLines::Single(line) | DirtyLines::FromLineToEnd(line) => Some(line),
            DirtyLines::Range { from, .. } => Some(from),
        }
    }

    /// Grows this region to the smallest one covering both `self` and `other`.
    pub fn merge(&mut self, other: DirtyLines) {
        let (Some(a), Some(b)) = (self.start_line(), other.start_line()) else {
            // At least one side is None, which is the identity.
            if self.is_none() {
                *self = other;
            }
            return;
        };

        let from = a.min(b);
        *self = match (*self, other) {
            (DirtyLines::FromLineToEnd(_), _) | (_, DirtyLines::FromLineToEnd(_)) => {
                DirtyLines::FromLineToEnd(from)
            }
            (DirtyLines::Single(x), DirtyLines::Single(y)) if x == y => DirtyLines::Single(x),
            (lhs, rhs) => DirtyLines::Range {
                from,
                to: lhs.end_exclusive().max(rhs.end_exclusive()),
            },
        };
    }

    /// Exclusive end of a bounded region.
    fn end_exclusive(&self) -> usize {
        match *self {
            DirtyLines::Single(line) => line + 1,
            DirtyLines::Range { to, .. } => to,
            DirtyLines::None | DirtyLines::FromLineToEnd(_) => 0,
        }
    }
}

// Chunk: docs/chunks/line_index - Line-start index rebuilt after every mutation

//! Line index for tracking line boundaries in the byte content.
//!
//! The index is never patched incrementally: every mutation of the content is
//! followed by a full [`LineIndex::rebuild`], so the index is always consistent
//! with the content whenever no edit is in progress.

use memchr::memchr_iter;

/// Byte offsets at which each line starts.
///
/// `line_starts[0]` is always 0 and the sequence is strictly increasing. Every
/// entry after the first is the offset immediately following a `'\n'`, so a
/// document ending in a newline has a trailing empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates the index of an empty document: a single line starting at 0.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Creates an index for `content`.
    pub fn from_bytes(content: &[u8]) -> Self {
        let mut index = Self::new();
        index.rebuild(content);
        index
    }

    /// Discards the current index and rescans `content` from the start.
    pub fn rebuild(&mut self, content: &[u8]) {
        self.line_starts.clear();
        self.line_starts.push(0);
        self.line_starts
            .extend(memchr_iter(b'\n', content).map(|newline| newline + 1));
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the offset where `line` starts, or `None` if out of range.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the offset one past the last visible byte of `line`.
    ///
    /// For every line except the last this is the offset of its `'\n'`; for
    /// the last line it is `total_len`.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }
        match self.line_starts.get(line + 1) {
            Some(next) => Some(next - 1),
            None => Some(total_len),
        }
    }

    /// Number of bytes from the start of `line` to the start of the next line
    /// (or to `total_len` for the last line). Includes the terminating `'\n'`.
    ///
    /// Out-of-range lines are treated as empty.
    pub fn line_span(&self, line: usize, total_len: usize) -> usize {
        let Some(start) = self.line_start(line) else {
            return 0;
        };
        self.line_start(line + 1).unwrap_or(total_len) - start
    }

    /// Visible length of `line`, excluding its `'\n'`. Out-of-range is 0.
    pub fn line_len(&self, line: usize, total_len: usize) -> usize {
        match (self.line_start(line), self.line_end(line, total_len)) {
            (Some(start), Some(end)) => end - start,
            _ => 0,
        }
    }

    /// Returns the greatest line whose start is `<= offset`.
    ///
    /// Binary search over the strictly increasing starts; an offset equal to a
    /// line start resolves to that (later) line.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// The raw line starts, for renderers that slice lines themselves.
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

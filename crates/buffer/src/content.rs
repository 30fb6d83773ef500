// Chunk: docs/chunks/text_buffer - Byte buffer engine with line index and cursor
// Chunk: docs/chunks/measurement_guard - Scoped NUL terminator for text measurement

//! Raw document bytes.
//!
//! A plain growable byte vector: inserting shifts the tail right, removing
//! shifts it left. The document never stores a terminator. The one exception
//! is [`Terminated`], a guard that inserts a NUL for the duration of a
//! measurement and removes it again when dropped.

use std::ffi::CStr;

/// The document's bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    bytes: Vec<u8>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Inserts `byte` at `offset`, shifting everything from `offset` on one
    /// slot to the right. Returns false (and changes nothing) if `offset` is
    /// past the end.
    pub fn insert_byte(&mut self, offset: usize, byte: u8) -> bool {
        if offset > self.bytes.len() {
            return false;
        }
        self.bytes.insert(offset, byte);
        true
    }

    /// Inserts `bytes` at `offset` in one splice. Same bounds rule as
    /// [`Content::insert_byte`].
    pub fn insert_bytes(&mut self, offset: usize, bytes: &[u8]) -> bool {
        if offset > self.bytes.len() {
            return false;
        }
        self.bytes.splice(offset..offset, bytes.iter().copied());
        true
    }

    /// Removes and returns the byte at `offset`, shifting the tail left.
    pub fn remove_byte(&mut self, offset: usize) -> Option<u8> {
        if offset < self.bytes.len() {
            Some(self.bytes.remove(offset))
        } else {
            None
        }
    }

    /// Temporarily NUL-terminates the range `start..at` so it can be handed to
    /// a C-string consumer.
    ///
    /// The NUL is inserted at `at` and removed when the returned guard drops,
    /// including during unwinding. While the guard lives it holds the only
    /// borrow of the content, so the padded bytes are never observable
    /// through the owning buffer. Out-of-range arguments are clamped.
    pub fn terminate_at(&mut self, start: usize, at: usize) -> Terminated<'_> {
        let at = at.min(self.bytes.len());
        let start = start.min(at);
        self.bytes.insert(at, 0);
        Terminated {
            content: self,
            start,
            at,
        }
    }
}

/// A NUL-terminated view into [`Content`]. See [`Content::terminate_at`].
#[derive(Debug)]
pub struct Terminated<'a> {
    content: &'a mut Content,
    start: usize,
    at: usize,
}

impl Terminated<'_> {
    /// The terminated range as a C string.
    ///
    /// Content inserted through `insert_text` may contain NUL bytes of its
    /// own; the C string then ends at the first of them, exactly as a C
    /// consumer would read it.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.content.bytes[self.start..=self.at]).unwrap_or_default()
    }
}

impl Drop for Terminated<'_> {
    fn drop(&mut self) {
        let removed = self.content.bytes.remove(self.at);
        debug_assert_eq!(removed, 0, "measurement terminator was overwritten");
    }
}

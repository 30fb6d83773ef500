// Chunk: docs/chunks/text_buffer - Byte buffer engine with line index and cursor

//! tinypad-buffer: the text buffer engine behind the tinypad editor.
//!
//! The engine keeps a document as a flat sequence of bytes, a line-start index
//! derived from it, and a single cursor. Hosts feed it discrete commands that
//! they have already decoded from keyboard input; renderers read the bytes,
//! the line starts and the cursor back out to draw a frame.
//!
//! # Overview
//!
//! The main type is [`TextBuffer`], which provides:
//! - Printable-character and raw-text insertion at the cursor
//! - Backspace and forward delete
//! - Cursor movement by character, line, word and buffer edge ([`Movement`])
//! - Line-based access for rendering
//! - Caret measurement through a [`TextMeasure`] collaborator
//!
//! # Example
//!
//! ```
//! use tinypad_buffer::{DirtyLines, Movement, TextBuffer};
//!
//! let mut buffer = TextBuffer::new();
//! buffer.insert_str("hello\nworld");
//! assert_eq!(buffer.line_starts(), &[0, 6]);
//! assert_eq!(buffer.cursor().line(), 1);
//! assert_eq!(buffer.cursor().column(), 5);
//!
//! buffer.move_cursor(Movement::WordLeft);
//! assert_eq!(buffer.cursor().position(), 6);
//!
//! // Control characters are dropped by insert_char.
//! assert_eq!(buffer.insert_char('\u{7}'), DirtyLines::None);
//! ```
//!
//! # Consistency
//!
//! The line index is rebuilt from scratch after every mutation, and the cursor's
//! line and column are always rederived from its byte position. After any call
//! returns, `line_starts()[cursor.line()] <= cursor.position()` and
//! `cursor.column() == cursor.position() - line_starts()[cursor.line()]`.
//!
//! Nothing in the engine fails: out-of-range requests are absorbed as no-ops
//! and reported as [`DirtyLines::None`].

mod content;
mod cursor;
mod line_index;
mod measure;
mod movement;
mod text_buffer;
mod types;

pub use content::{Content, Terminated};
pub use cursor::Cursor;
pub use line_index::LineIndex;
pub use measure::TextMeasure;
pub use movement::{is_word_separator, Movement};
pub use text_buffer::TextBuffer;
pub use types::{Color, CursorStyle, DirtyLines, Position};

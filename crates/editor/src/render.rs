// Chunk: docs/chunks/measurement_guard - Scoped NUL terminator for text measurement
// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
//!
//! Headless rendering collaborator.
//!
//! There is no window here. A [`Frame`] is a snapshot of what a renderer
//! would draw: the document lines, the caret's line/column, its horizontal
//! pixel offset on a monospace grid, and its visual hints. Frames print as
//! plain text with the caret drawn in, or serialize to JSON for tooling.

use std::ffi::CStr;
use std::fmt::Write as _;

use serde::Serialize;
use tinypad_buffer::{TextBuffer, TextMeasure};

use crate::config::CaretStyle;
use crate::error::Result;
use crate::modal::Mode;

/// Measures text on a fixed-width grid.
///
/// Every byte advances one cell except `'\t'`, which advances to the next
/// multiple of `tab_width` cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Width of one cell in pixels
    pub cell_width: f32,
    /// Tab stop interval in cells
    pub tab_width: usize,
}

impl MonospaceMeasure {
    pub fn new(cell_width: f32, tab_width: usize) -> Self {
        Self {
            cell_width,
            tab_width: tab_width.max(1),
        }
    }

    /// Number of cells `bytes` occupy.
    pub fn cells(&self, bytes: &[u8]) -> usize {
        bytes.iter().fold(0, |col, &b| {
            if b == b'\t' {
                (col / self.tab_width + 1) * self.tab_width
            } else {
                col + 1
            }
        })
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(8.0, 4)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &CStr) -> f32 {
        self.cells(text.to_bytes()) as f32 * self.cell_width
    }
}

/// Caret state as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaretFrame {
    /// 0-indexed line
    pub line: usize,
    /// Byte column within the line
    pub column: usize,
    /// Absolute byte offset
    pub position: usize,
    /// Horizontal offset in pixels from the start of the line
    pub x: f32,
    pub style: CaretStyle,
    /// `[r, g, b, a]`
    pub color: [u8; 4],
    pub blink: bool,
}

/// A snapshot of the buffer for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Document lines without their newlines, decoded lossily as UTF-8
    pub lines: Vec<String>,
    pub caret: CaretFrame,
    /// Whether the buffer was modified since it was last marked clean
    pub dirty: bool,
    /// Input mode, for sessions using the modal keymap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Byte offset of the caret within `lines[caret.line]` after decoding
    #[serde(skip)]
    caret_offset: usize,
}

impl Frame {
    /// Captures `buffer` as it currently stands.
    ///
    /// Takes the buffer mutably only for the duration of the caret
    /// measurement; the content is unchanged when this returns.
    pub fn capture<M>(buffer: &mut TextBuffer, measure: &M) -> Frame
    where
        M: TextMeasure + ?Sized,
    {
        let x = buffer.caret_x(measure);

        let lines = (0..buffer.line_count())
            .map(|line| String::from_utf8_lossy(buffer.line_bytes(line)).into_owned())
            .collect();

        let cursor = buffer.cursor();
        let line_bytes = buffer.line_bytes(cursor.line());
        let prefix = &line_bytes[..cursor.column().min(line_bytes.len())];
        let caret_offset = String::from_utf8_lossy(prefix).len();
        let color = cursor.color();

        Frame {
            lines,
            caret: CaretFrame {
                line: cursor.line(),
                column: cursor.column(),
                position: cursor.position(),
                x,
                style: cursor.style().into(),
                color: [color.r, color.g, color.b, color.a],
                blink: cursor.blink(),
            },
            dirty: buffer.is_dirty(),
            mode: None,
            caret_offset,
        }
    }

    /// Attaches the session's input mode.
    pub fn with_mode(mut self, mode: Option<Mode>) -> Frame {
        self.mode = mode;
        self
    }

    /// Serializes the frame as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the frame as text with the caret drawn in.
    ///
    /// A bar caret is drawn as `|` between bytes, a block caret brackets the
    /// character under it (`[ ]` at end of line), and an underscore caret is
    /// drawn as `^` on a marker row below its line.
    pub fn render_text(&self) -> String {
        let caret = &self.caret;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Buffer ({} lines{}):",
            self.lines.len(),
            if self.dirty { ", modified" } else { "" }
        );
        let _ = writeln!(
            out,
            "Caret: ({}, {}) x={} {:?}",
            caret.line, caret.column, caret.x, caret.style
        );
        if let Some(mode) = self.mode {
            let _ = writeln!(out, "Mode: {}", mode.name());
        }
        out.push_str("---\n");

        for (index, line) in self.lines.iter().enumerate() {
            if index != caret.line {
                out.push_str(line);
                out.push('\n');
                continue;
            }

            // A caret inside a multi-byte sequence snaps back to a char boundary.
            let mut split = self.caret_offset.min(line.len());
            while !line.is_char_boundary(split) {
                split -= 1;
            }
            let (before, after) = line.split_at(split);
            match caret.style {
                CaretStyle::Bar => {
                    let _ = writeln!(out, "{}|{}", before, after);
                }
                CaretStyle::Block => {
                    let mut rest = after.chars();
                    let under = rest.next().unwrap_or(' ');
                    let _ = writeln!(out, "{}[{}]{}", before, under, rest.as_str());
                }
                CaretStyle::Underscore => {
                    out.push_str(line);
                    out.push('\n');
                    let pad: String = before
                        .chars()
                        .map(|c| if c == '\t' { '\t' } else { ' ' })
                        .collect();
                    let _ = writeln!(out, "{}^", pad);
                }
            }
        }

        out.push_str("---\n");
        out
    }
}

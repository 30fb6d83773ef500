// Chunk: docs/chunks/measurement_guard - Scoped NUL terminator for text measurement

use std::ffi::CStr;

/// Measures the rendered width of a run of text.
///
/// Implemented by the rendering collaborator (a font, a glyph atlas, a
/// monospace grid). The engine never computes pixel metrics itself; it only
/// hands the collaborator a NUL-terminated view of the bytes to measure.
pub trait TextMeasure {
    /// Width of `text` in the collaborator's units.
    fn measure(&self, text: &CStr) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&CStr) -> f32,
{
    fn measure(&self, text: &CStr) -> f32 {
        self(text)
    }
}

// Chunk: docs/chunks/headless_host - Headless host loop driving the engine

use std::io;

use tinypad_input::ParseKeyError;

/// Errors surfaced by the host. The buffer engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error reading a script or configuration file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed configuration or failed frame serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A script line whose key chord could not be parsed
    #[error("script line {line}: invalid key: {source}")]
    Key {
        line: usize,
        #[source]
        source: ParseKeyError,
    },

    /// A script line that is not a known directive
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    /// No platform configuration directory could be determined
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;

// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
//!
//! tinypad: a headless host for the tinypad buffer engine.
//!
//! The host turns key events into buffer commands, keeps one editing session
//! per buffer, and snapshots the result as frames. There is no window system
//! here; the `tinypad` binary replays key scripts and prints the final frame.

pub mod buffer_target;
pub mod config;
pub mod error;
pub mod modal;
pub mod render;
pub mod script;
pub mod session;

pub use buffer_target::{execute_command, resolve_command, Command};
pub use config::{CaretStyle, Config, CursorConfig, EditingConfig, Keymap};
pub use error::{Error, Result};
pub use modal::{KeyResult, ModalResolver, Mode};
pub use render::{CaretFrame, Frame, MonospaceMeasure};
pub use script::{parse_script, run_script, Directive};
pub use session::{EditSession, Handled};

/// Input types, re-exported for hosts.
pub use tinypad_input as input;

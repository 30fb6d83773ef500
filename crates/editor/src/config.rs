// Chunk: docs/chunks/editor_config - JSON configuration for cursor and editing
//!
//! Editor configuration.
//!
//! Configuration is a small JSON document. Every field is optional; anything
//! missing takes its default, and a missing file means "all defaults".
//!
//! ## File Location
//!
//! Unless a path is given explicitly the file is looked up at
//! `<config dir>/tinypad/config.json`, where `<config dir>` is the platform
//! configuration directory (`~/.config` on Linux,
//! `~/Library/Application Support` on macOS).
//!
//! ```json
//! {
//!   "cursor": { "style": "block", "color": [255, 200, 0, 255], "blink": false },
//!   "editing": { "tab_width": 2, "expand_tabs": true, "keymap": "modal" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tinypad_buffer::{Color, Cursor, CursorStyle};
use tracing::debug;

use crate::error::{Error, Result};

/// Application name used for the config directory.
const APP_NAME: &str = "tinypad";

/// Configuration file name.
const CONFIG_FILENAME: &str = "config.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Caret appearance
    pub cursor: CursorConfig,
    /// Editing behavior
    pub editing: EditingConfig,
}

/// Caret appearance. These are rendering hints copied onto the buffer's
/// cursor when a session opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Caret shape
    pub style: CaretStyle,
    /// Caret color as `[r, g, b, a]`
    pub color: [u8; 4],
    /// Whether the caret blinks
    pub blink: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        let color = Color::default();
        Self {
            style: CaretStyle::Bar,
            color: [color.r, color.g, color.b, color.a],
            blink: true,
        }
    }
}

impl CursorConfig {
    /// Copies the configured style, color and blink onto `cursor`.
    pub fn apply(&self, cursor: &mut Cursor) {
        let [r, g, b, a] = self.color;
        cursor.set_style(self.style.into());
        cursor.set_color(Color::rgba(r, g, b, a));
        cursor.set_blink(self.blink);
    }
}

/// Serialized name of a [`CursorStyle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaretStyle {
    #[default]
    Bar,
    Block,
    Underscore,
}

impl From<CaretStyle> for CursorStyle {
    fn from(style: CaretStyle) -> Self {
        match style {
            CaretStyle::Bar => CursorStyle::Bar,
            CaretStyle::Block => CursorStyle::Block,
            CaretStyle::Underscore => CursorStyle::Underscore,
        }
    }
}

impl From<CursorStyle> for CaretStyle {
    fn from(style: CursorStyle) -> Self {
        match style {
            CursorStyle::Bar => CaretStyle::Bar,
            CursorStyle::Block => CaretStyle::Block,
            CursorStyle::Underscore => CaretStyle::Underscore,
        }
    }
}

/// Editing behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    /// Number of spaces the Tab key inserts when `expand_tabs` is set
    pub tab_width: usize,
    /// Insert spaces instead of a tab byte
    pub expand_tabs: bool,
    /// How key presses map to commands
    pub keymap: Keymap,
}

/// Key binding scheme for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keymap {
    /// Every key acts immediately: characters insert, chords move
    #[default]
    Standard,
    /// vi-style Normal/Insert modes with counts and `.` repeat
    Modal,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            expand_tabs: false,
            keymap: Keymap::Standard,
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Writes configuration to `path`, creating parent directories.
    ///
    /// The file is written to a temporary sibling and renamed into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Resolves the configuration for a session.
    ///
    /// Uses `path` if given, otherwise [`default_config_path`]. A file that
    /// does not exist yields the defaults; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Ok(path) => path,
                Err(err) => {
                    debug!(%err, "using default configuration");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading configuration");
        Self::load(&path)
    }
}

/// Returns `<config dir>/tinypad/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
    Ok(config_dir.join(APP_NAME).join(CONFIG_FILENAME))
}

//! Game settings
//!
//! Loaded once at startup from an optional JSON file and handed to the
//! session and front ends. Every field has a default, so a config file only
//! needs the keys it wants to change.

use crate::core::ClassificationRule;
use crate::game::{CueTable, DEFAULT_UNLOCK_DELAY, SessionOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default on-screen keyboard, one string per row
pub const DEFAULT_KEYBOARD: [&str; 3] = [
    "q w e r t z u i o p",
    "a s d f g h j k l",
    "y x c v b n m backspace enter",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long input stays locked after an unknown word
    pub unlock_delay_ms: u64,
    /// How long a pressed key stays highlighted on the on-screen keyboard
    pub key_pulse_ms: u64,
    pub rule: ClassificationRule,
    pub keyboard: Vec<String>,
    #[serde(flatten)]
    pub cues: CueTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unlock_delay_ms: DEFAULT_UNLOCK_DELAY.as_millis() as u64,
            key_pulse_ms: 400,
            rule: ClassificationRule::default(),
            keyboard: DEFAULT_KEYBOARD.iter().map(ToString::to_string).collect(),
            cues: CueTable::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// describes an invalid keyboard layout.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        settings
            .keyboard_layout()
            .with_context(|| format!("invalid keyboard layout in {}", path.display()))?;

        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            rule: self.rule,
            unlock_delay: Duration::from_millis(self.unlock_delay_ms),
        }
    }

    #[must_use]
    pub fn key_pulse(&self) -> Duration {
        Duration::from_millis(self.key_pulse_ms)
    }

    /// Parse the `keyboard` rows
    ///
    /// # Errors
    ///
    /// Returns `LayoutError` for an unknown or repeated key name.
    pub fn keyboard_layout(&self) -> Result<KeyboardLayout, LayoutError> {
        KeyboardLayout::parse(&self.keyboard)
    }
}

/// One key of the on-screen keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCap {
    Letter(char),
    Backspace,
    Enter,
}

/// Error type for keyboard layout parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownKey(String),
    DuplicateKey(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey(name) => write!(f, "Unknown key name '{name}'"),
            Self::DuplicateKey(name) => write!(f, "Key '{name}' appears more than once"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Rows of keys for the on-screen keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardLayout {
    rows: Vec<Vec<KeyCap>>,
}

impl KeyboardLayout {
    /// Parse rows of space-separated key names: single letters, `backspace`
    /// and `enter`
    ///
    /// # Errors
    ///
    /// Returns `LayoutError` for an unknown or repeated key name.
    ///
    /// # Examples
    /// ```
    /// use turbl::config::{KeyCap, KeyboardLayout};
    ///
    /// let layout = KeyboardLayout::parse(&["a b", "Enter"]).unwrap();
    /// assert_eq!(layout.rows()[1], [KeyCap::Enter]);
    /// assert!(KeyboardLayout::parse(&["a a"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let mut seen = Vec::new();
        let mut parsed = Vec::with_capacity(rows.len());

        for row in rows {
            let mut keys = Vec::new();
            for name in row.as_ref().split_whitespace() {
                let key = parse_key(name)?;
                if seen.contains(&key) {
                    return Err(LayoutError::DuplicateKey(name.to_string()));
                }
                seen.push(key);
                keys.push(key);
            }
            parsed.push(keys);
        }

        Ok(Self { rows: parsed })
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<KeyCap>] {
        &self.rows
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        // The built-in rows are known to parse.
        Self::parse(&DEFAULT_KEYBOARD).unwrap_or(Self { rows: Vec::new() })
    }
}

fn parse_key(name: &str) -> Result<KeyCap, LayoutError> {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "backspace" => Ok(KeyCap::Backspace),
        "enter" => Ok(KeyCap::Enter),
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_lowercase() => Ok(KeyCap::Letter(ch)),
                _ => Err(LayoutError::UnknownKey(name.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MessageCue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_path_gives_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.session_options(), SessionOptions::default());
        assert_eq!(settings.key_pulse(), Duration::from_millis(400));
    }

    #[test]
    fn default_layout_has_every_letter() {
        let layout = KeyboardLayout::default();
        let letters: Vec<char> = layout
            .rows()
            .iter()
            .flatten()
            .filter_map(|key| match key {
                KeyCap::Letter(ch) => Some(*ch),
                _ => None,
            })
            .collect();
        assert_eq!(letters.len(), 26);
        assert_eq!(layout.rows()[2].last(), Some(&KeyCap::Enter));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(
            r#"{ "unlock_delay_ms": 1500, "rule": "strict", "messages": { "won": "Got it!" } }"#,
        );
        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.unlock_delay_ms, 1500);
        assert_eq!(settings.rule, ClassificationRule::Strict);
        assert_eq!(settings.key_pulse_ms, 400);
        assert_eq!(settings.cues.message(MessageCue::Won), "Got it!");
        assert_eq!(
            settings.cues.message(MessageCue::NoExist),
            "Word does not exist."
        );
        assert_eq!(
            settings.session_options().unlock_delay,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn bad_layout_is_rejected_on_load() {
        let file = write_config(r#"{ "keyboard": ["q w e", "shift"] }"#);
        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("invalid keyboard layout"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let file = write_config("{ not json");
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn layout_errors() {
        assert_eq!(
            KeyboardLayout::parse(&["a ab"]),
            Err(LayoutError::UnknownKey("ab".to_string()))
        );
        assert_eq!(
            KeyboardLayout::parse(&["enter", "ENTER"]),
            Err(LayoutError::DuplicateKey("ENTER".to_string()))
        );
        assert_eq!(
            KeyboardLayout::parse(&["Q"]).unwrap().rows()[0],
            [KeyCap::Letter('q')]
        );
    }
}

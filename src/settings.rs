//! User settings, read from a JSON file next to the working directory.

use std::path::{Path, PathBuf};
use std::{fs, io};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{PieceColor, STARTING_PLACEMENT};

/// Environment variable overriding the settings path
pub const SETTINGS_ENV: &str = "CHESS_BOARD_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "chess-board.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Side to move for the starting position
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StartColor {
    #[default]
    White,
    Black,
}

impl From<StartColor> for PieceColor {
    fn from(color: StartColor) -> Self {
        match color {
            StartColor::White => PieceColor::White,
            StartColor::Black => PieceColor::Black,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Flip the board whenever Black is to move
    pub auto_rotate: bool,
    /// Position loaded at startup, full FEN or placement only
    pub start_fen: String,
    pub start_color: StartColor,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_rotate: false,
            start_fen: STARTING_PLACEMENT.to_string(),
            start_color: StartColor::White,
            log_filter: "info".to_string(),
            window_width: 1100.0,
            window_height: 900.0,
        }
    }
}

impl Settings {
    /// Settings path from the environment, or the default file name
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::path())
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_json(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// JSON schema of the settings file
    pub fn json_schema() -> String {
        let schema = schemars::schema_for!(Settings);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("chess-board-settings-does-not-exist.json");
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.auto_rotate);
        assert_eq!(settings.start_fen, STARTING_PLACEMENT);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let settings =
            Settings::from_json(r#"{ "auto_rotate": true, "start_color": "black" }"#).unwrap();
        assert!(settings.auto_rotate);
        assert_eq!(PieceColor::from(settings.start_color), PieceColor::Black);
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.window_width, 1100.0);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "chess-board-settings-invalid-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = Settings::json_schema();
        assert!(schema.contains("auto_rotate"));
        assert!(schema.contains("start_fen"));
    }
}

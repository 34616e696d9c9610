//! Session configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::{Color, RuleOptions};

/// Configuration for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Color that moves first after a restart.
    pub first_player: Color,
    /// Rule variants.
    pub rules: RuleOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            first_player: Color::Blue,
            rules: RuleOptions::default(),
        }
    }
}

impl SessionConfig {
    /// Load a configuration from a JSON file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.display().to_string(),
            error,
        })?;
        serde_json::from_str(&text).map_err(|error| ConfigError::Parse {
            path: path.display().to_string(),
            error,
        })
    }
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        error: std::io::Error,
    },
    /// The file is not a valid configuration.
    Parse {
        /// Path that was parsed.
        path: String,
        /// Underlying JSON error.
        error: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, error } => write!(f, "Failed to read config {path}: {error}"),
            Self::Parse { path, error } => write!(f, "Invalid config {path}: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            Self::Parse { error, .. } => Some(error),
        }
    }
}

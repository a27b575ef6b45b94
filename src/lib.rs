//! GLUCOPLAY - diabetes education mini-games
//!
//! A terminal collection of small timed games about healthy food choices,
//! carbohydrate estimation, insulin timing and everyday decisions.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod content;
pub mod games;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum GameError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Star ledger could not be read or written
    PersistenceError(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IoError(err) => write!(f, "I/O error: {}", err),
            GameError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GameError::PersistenceError(msg) => write!(f, "Star ledger error: {}", msg),
            GameError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::IoError(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for GameError {
    fn from(err: toml::de::Error) -> Self {
        GameError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for GameError {
    fn from(err: toml::ser::Error) -> Self {
        GameError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for GLUCOPLAY operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Error handling utilities
pub mod error {
    use super::GameError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &GameError) -> String {
        match error {
            GameError::ConfigError(msg) => {
                format!("Configuration error: {}. Check glucoplay.toml.", msg)
            }
            GameError::PersistenceError(_) => {
                "Could not save your stars. Check disk space and permissions.".to_string()
            }
            GameError::TuiError(_) => {
                "The terminal could not be prepared. Try a larger window or another terminal."
                    .to_string()
            }
            GameError::IoError(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied. Check the permissions of the data directory.".to_string()
            }
            _ => error.to_string(),
        }
    }

    /// Whether the app can keep running after this error
    pub fn is_recoverable(error: &GameError) -> bool {
        match error {
            // Losing the ledger only costs the star tally
            GameError::PersistenceError(_) => true,
            GameError::ConfigError(_) => true,
            GameError::IoError(_) | GameError::TuiError(_) => false,
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "glucoplay";
pub const CONFIG_FILE: &str = "glucoplay.toml";
pub const LEDGER_FILE: &str = "stars.json";
pub const LOG_FILE: &str = "glucoplay.log";
pub const MAX_LEDGER_HISTORY: usize = 100;

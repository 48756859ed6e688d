//! Error types for trk

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for trk
#[derive(Debug, Error)]
pub enum TrkError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl TrkError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TrkError::Config(_) | TrkError::TomlDeserialize(_) => 2,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TrkError::ReadFailed { path, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                format!(
                    "Timesheet not found: {}\n\n\
                    Suggestions:\n\
                    • Check the file name and path\n\
                    • Run 'trk --help' to see the expected file format",
                    path.display()
                )
            }
            TrkError::Config(msg) => {
                if msg.contains("timezone") {
                    format!(
                        "{}\n\n\
                        Use an IANA timezone name\n\
                        Example: trk --location Europe/Berlin hours.txt",
                        msg
                    )
                } else if msg.contains("weekly") {
                    format!(
                        "{}\n\n\
                        Expected a duration such as 24h, 38h30m or 40h\n\
                        Example: trk --weekly 40h hours.txt",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TrkError
pub type Result<T> = std::result::Result<T, TrkError>;

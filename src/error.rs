// PoseMatch 🕺 MIT License

//! Error types for the game engine.

use std::fmt;

/// Result type alias for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// Main error type for the game engine.
#[derive(Debug)]
pub enum GameError {
    /// The pose detector failed in a way that prevents play.
    DetectorError(String),
    /// A target pose could not be loaded for a level.
    TargetError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// A recorded pose stream or target file could not be decoded.
    FormatError(String),
    /// A finite pose stream ran out before the game completed.
    StreamEnded,
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetectorError(msg) => write!(f, "Detector error: {msg}"),
            Self::TargetError(msg) => write!(f, "Target error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::FormatError(msg) => write!(f, "Format error: {msg}"),
            Self::StreamEnded => write!(f, "Pose stream ended"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::FormatError(err.to_string())
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::tracks::TrackKind;

#[derive(Debug, Error)]
pub enum AppError {
    /// The child process could not be started at all
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} was not found. Install FFmpeg and make sure `{program}` is on your PATH")]
    NotFound { program: String },

    #[error("Inspection failed: {0}")]
    Inspection(String),

    #[error("Failed to update default {kind} track: {message}")]
    Rewrite { kind: TrackKind, message: String },

    /// The remux succeeded but the result could not replace the original
    #[error("Remuxed {kind} tracks but could not replace {}: {source}", path.display())]
    Install {
        kind: TrackKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("Input file not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

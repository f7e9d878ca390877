//! Error types for the tilefolio content compiler.
//!
//! Each build stage owns an error enum; [`ApiError`] wraps them for the CLI and
//! the consumer-facing surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning the content directory into a filetree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Content root not found: {0}")]
    ContentRootMissing(PathBuf),

    #[error("Content root is not a directory: {0}")]
    ContentRootNotDirectory(PathBuf),

    #[error("Duplicate node id '{id}': {first} and {second}")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors raised while projecting a filetree onto the tile grid.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid tile override on '{id}': tileX={x}, tileY={y} (expected non-negative integers)")]
    InvalidOverride { id: String, x: String, y: String },
}

/// Errors raised while reading or writing the snapshot artifact.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error type surfaced by the CLI and library entry points.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

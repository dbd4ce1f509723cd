//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ProfileStatsError`] which covers every failure mode of a
//! profile-stats run. It uses `thiserror` for ergonomic error definitions and
//! includes named constructors for the common failure scenarios.
//!
//! # Public API
//! - [`ProfileStatsError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ProfileStatsError>`
//!
//! # Error Categories
//! - **Configuration**: Missing environment identifiers, unreadable profile file
//! - **Remote source**: Non-success HTTP status, GraphQL errors, unexpected payloads
//! - **Cache operations**: Read, parse, serialize and write failures on snapshots
//! - **Artifacts**: Icon processing and output file writes

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for profile-stats
#[derive(Error, Debug)]
pub enum ProfileStatsError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read profile file '{path}': {source}")]
    ProfileReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse profile file '{path}': {source}")]
    ProfileParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Remote source errors
    #[error("{operation} failed with status {status}: {body}")]
    TransportFailed {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} returned no data: {message}")]
    GraphQl { operation: String, message: String },

    #[error("{operation} returned an unexpected payload: {source}")]
    UnexpectedResponse {
        operation: String,
        source: serde_json::Error,
    },

    // Cache errors
    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{path}': {source}")]
    CacheParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Artifact errors
    #[error("Failed to process icon '{path}': {source}")]
    Icon {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write '{path}': {source}")]
    ArtifactWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ProfileStatsError
pub type Result<T> = std::result::Result<T, ProfileStatsError>;

impl ProfileStatsError {
    /// Create a configuration error with a specific message
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport error for a non-success HTTP status
    pub fn transport_failed(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::TransportFailed {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a GraphQL error for a response without data
    pub fn graphql(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GraphQl {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(operation: impl Into<String>, source: serde_json::Error) -> Self {
        Self::UnexpectedResponse {
            operation: operation.into(),
            source,
        }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache parse failed error
    pub fn cache_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn icon(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Icon {
            path: path.into(),
            source,
        }
    }

    pub fn artifact_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArtifactWriteFailed {
            path: path.into(),
            source,
        }
    }
}

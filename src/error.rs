//! Error types
//!
//! `TreeError` is the failure taxonomy of every tree and node operation.
//! `ApiError` wraps it for the configuration and logging surfaces.

use thiserror::Error;

/// Failure kinds reported by tree operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Operation is not valid in the current lifecycle state
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// Malformed path, or a path that would place a node under a file
    #[error("Bad path: {0}")]
    BadPath(String),

    /// Path does not live under the existing root, or a file targets the root position
    #[error("Conflicting path: {0}")]
    ConflictingPath(String),

    /// Lookup miss, or a depth jump that skips levels
    #[error("No such path: {0}")]
    NoSuchPath(String),

    /// Target path is already present
    #[error("Already in tree: {0}")]
    AlreadyInTree(String),

    /// Resolved node is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Resolved node is not a file
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// Allocation failure
    #[error("Memory error: {0}")]
    MemoryError(String),
}

/// Errors surfaced by configuration loading and logging setup
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

//! Error type for spectral partitioning.
//!
//! Errors are raised where they are detected and passed to the caller
//! unmodified. There is no retry or silent recovery anywhere in the crate.

use thiserror::Error;

/// Error type for all partitioning operations.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Grid dimensions are invalid or do not match a precomputed topology.
    #[error("Shape error: {0}")]
    Shape(String),

    /// Invalid physical input (depth, wind, energy, frequencies).
    #[error("Domain error: {0}")]
    Domain(String),

    /// Invalid configuration value.
    #[error("Config error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discriminant of a [`PartitionError`], for callers that branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Domain,
    Config,
    Io,
}

impl PartitionError {
    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartitionError::Shape(_) => ErrorKind::Shape,
            PartitionError::Domain(_) => ErrorKind::Domain,
            PartitionError::Config(_) => ErrorKind::Config,
            PartitionError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        PartitionError::Shape(message.into())
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        PartitionError::Domain(message.into())
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        PartitionError::Config(message.into())
    }
}

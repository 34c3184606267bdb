//! Typed error enum for resource extraction and loading.
//!
//! Every fallible operation in this crate returns [`ResourceError`]. Callers
//! that only care about the broad category can match on [`ResourceError::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ResourceError> = std::result::Result<T, E>;

/// Errors raised while enumerating, reading, extracting or parsing resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("embedded resource not found: {name}")]
    NotFound { name: String },

    #[error("invalid file name '{name}': must be a single path component")]
    InvalidFileName { name: String },

    #[error("failed to enumerate resource names")]
    Enumerate {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read resource {name}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("destination directory {} is not usable", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("resource {name} is not valid UTF-8")]
    Decode {
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("resource {name} does not match the expected JSON shape")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of a [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ResourceNotFound,
    InvalidName,
    IoFailure,
    DecodeFailure,
    ParseFailure,
}

impl ResourceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::ResourceNotFound,
            Self::InvalidFileName { .. } => ErrorKind::InvalidName,
            Self::Enumerate { .. }
            | Self::Read { .. }
            | Self::Destination { .. }
            | Self::Write { .. } => ErrorKind::IoFailure,
            Self::Decode { .. } => ErrorKind::DecodeFailure,
            Self::Parse { .. } => ErrorKind::ParseFailure,
        }
    }
}

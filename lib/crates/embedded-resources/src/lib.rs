//! Copy resources embedded in the binary out to files, and load them as
//! typed JSON.
//!
//! Resources live behind the [`ResourceBundle`] port. [`EmbeddedBundle`]
//! serves a tree compiled in with `include_dir!`, [`MemoryBundle`] a table of
//! `include_bytes!` blobs, and [`DirBundle`] a directory on disk.
//! [`Extractor`] copies them into a flat destination directory and
//! [`load_json`] parses one as JSON. The [`logged`] module wraps each
//! operation for callers that only want failures logged.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod bundle;
pub mod config;
pub mod dir;
pub mod embedded;
pub mod error;
pub mod extract;
pub mod json;
pub mod logged;

pub use bundle::{DEFAULT_SEPARATOR, MemoryBundle, ResourceBundle};
pub use config::{ExtractorConfig, FailurePolicy};
pub use dir::DirBundle;
pub use embedded::EmbeddedBundle;
pub use error::{ErrorKind, ResourceError, Result};
pub use extract::{ExtractFailure, ExtractReport, ExtractedFile, Extractor};
pub use json::load_json;

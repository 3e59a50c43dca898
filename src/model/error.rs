//! Error types for the jlv core.
//!
//! A small hierarchical taxonomy using `thiserror`, composing via `?` and
//! `From` conversions:
//!
//! - [`AppError`] - top-level binary error wrapping all failure modes
//!   - [`InputError`] - document source failures (file not found, no stdin, IO)
//!   - [`ParseFailure`] - the raw document is not valid JSON
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing setup failures
//!   - [`Disconnected`](crate::worker::Disconnected) - worker gone before replying
//!
//! # Recovery strategy
//!
//! `ParseFailure` is the only non-fatal error at the worker boundary: it is
//! surfaced to the caller as a failure response and the previously stored
//! document (if any) remains readable. Everything else is fatal for the CLI
//! and propagates to the top-level handler.
//!
//! Out-of-range window reads are deliberately **not** errors anywhere in
//! this crate: virtual-scroll callers routinely probe past the known length
//! while data is still loading, and get an empty window back.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Returned from the binary's main flow. Domain-specific errors convert
/// automatically via `From`, so call sites compose with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the raw document from file or stdin. Fatal: there is
    /// nothing to flatten without input.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// The document was read but is not valid JSON. The CLI treats this as
    /// fatal; an interactive consumer would keep its previous window.
    #[error("Failed to load document: {0}")]
    Parse(#[from] ParseFailure),

    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The worker thread went away before answering a request.
    #[error("Worker error: {0}")]
    Worker(#[from] crate::worker::Disconnected),
}

/// The raw document is not valid JSON.
///
/// Carries the parser's message rather than the `serde_json::Error` itself
/// so worker responses stay plain data and the foreign error state never
/// crosses the thread boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid JSON document: {message}")]
pub struct ParseFailure {
    /// The JSON parser's diagnostic (position and cause).
    pub message: String,
}

impl From<serde_json::Error> for ParseFailure {
    fn from(error: serde_json::Error) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

/// Errors encountered when reading the raw document.
///
/// Distinguishes specific failure modes rather than collapsing them into
/// generic I/O errors, so the CLI can print targeted messages.
#[derive(Debug, Error)]
pub enum InputError {
    /// The document path does not exist in the filesystem.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No document was provided: no path argument and stdin is a TTY.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O failure reading the document (permissions, disk errors,
    /// broken pipes on stdin).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

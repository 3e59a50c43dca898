//! Raw document sources.
//!
//! The worker consumes a complete textual document; this module is the
//! boundary that produces one, from either a file path or piped stdin.
//! Sum type enforces exactly one variant.

use crate::model::InputError;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

/// Where the raw JSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Read-once file input.
    File(PathBuf),
    /// Piped stdin input.
    Stdin,
}

impl DocumentSource {
    /// Detect and create the appropriate source.
    ///
    /// A provided path wins; otherwise stdin is used when it is a pipe.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the path does not exist, or
    /// `InputError::NoInput` when no path is given and stdin is an
    /// interactive terminal (reading would block forever waiting for a
    /// user who never intended to type a document).
    pub fn detect(file: Option<PathBuf>) -> Result<Self, InputError> {
        match file {
            Some(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path });
                }
                Ok(DocumentSource::File(path))
            }
            None => {
                if std::io::stdin().is_terminal() {
                    return Err(InputError::NoInput);
                }
                Ok(DocumentSource::Stdin)
            }
        }
    }

    /// Read the complete document into a string.
    ///
    /// The whole input is consumed before parsing begins; this crate does
    /// not stream partial documents.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        match self {
            DocumentSource::File(path) => Ok(std::fs::read_to_string(path)?),
            DocumentSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().lock().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

//! Flattened-document cache.
//!
//! [`LineStore`] holds exactly one flattened document at a time and serves
//! clamped window reads without re-flattening. It is an explicitly owned
//! struct with a single mutator pair (`load`, `clear`); the worker thread
//! is its only owner at runtime, so no locking is involved anywhere.

use crate::flatten::flatten;
use crate::model::{Line, ParseFailure};
use tracing::debug;

/// Owned cache of one flattened document.
///
/// # Lifecycle
///
/// Empty at construction; replaced wholesale by a successful [`load`];
/// cleared to empty by [`clear`]; never partially mutated. A failed load
/// leaves the previous contents untouched (atomic replace-or-reject).
///
/// [`load`]: LineStore::load
/// [`clear`]: LineStore::clear
#[derive(Debug, Default)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` as a complete JSON document, flatten it, and replace
    /// the stored sequence. Returns the new total length.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] when `raw` is not valid JSON; the store is
    /// left unchanged in that case.
    pub fn load(&mut self, raw: &str) -> Result<usize, ParseFailure> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        self.lines = flatten(&value, 0);
        debug!(length = self.lines.len(), "document flattened");
        Ok(self.lines.len())
    }

    /// Read the window `[position, position + limit)`, clamped to the
    /// stored bounds. A `position` at or past the end yields an empty
    /// slice; out-of-range input never panics.
    pub fn read(&self, position: usize, limit: usize) -> &[Line] {
        let start = position.min(self.lines.len());
        let end = position.saturating_add(limit).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Reset the store to empty. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the store currently holds no document.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

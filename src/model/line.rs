//! The flattened display line.
//!
//! A [`Line`] is one renderable row of the flattened representation of a
//! JSON document: a scalar entry, a container opener, or a container
//! closer. Lines are pure data; the punctuation conventions live in the
//! smart constructors so the flattener never assembles keys by hand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bracket kind for container opener/closer rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// A plain object: `{` / `}`.
    Brace,
    /// An array: `[` / `]`.
    Square,
}

impl Bracket {
    /// Opening character for this bracket kind.
    pub fn open(self) -> char {
        match self {
            Bracket::Brace => '{',
            Bracket::Square => '[',
        }
    }

    /// Closing character for this bracket kind.
    pub fn close(self) -> char {
        match self {
            Bracket::Brace => '}',
            Bracket::Square => ']',
        }
    }
}

/// One renderable row of a flattened JSON document.
///
/// # Key conventions
///
/// - Scalar entry: `"<name>:"` with `value` set to the formatted scalar
///   (the literal `null` included).
/// - Container opener: `"<name>: {"` or `"<name>: ["`, no value.
/// - Container closer: the lone `"}"` or `"]"`, no value.
///
/// # Invariants
///
/// An opener and its matching closer share the same `level`; everything
/// between them sits strictly at `level + 1` or deeper. `level` is used
/// purely for indentation and never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Row label, including trailing punctuation (see key conventions).
    pub key: String,

    /// Formatted scalar value; `None` on opener and closer rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Nesting depth, shared by an opener and its matching closer.
    pub level: usize,
}

impl Line {
    /// Scalar entry row: `<name>:` plus a formatted value.
    pub fn scalar(name: &str, value: String, level: usize) -> Self {
        Self {
            key: format!("{name}:"),
            value: Some(value),
            level,
        }
    }

    /// Container opener row: `<name>: {` or `<name>: [`.
    pub fn opener(name: &str, bracket: Bracket, level: usize) -> Self {
        Self {
            key: format!("{name}: {}", bracket.open()),
            value: None,
            level,
        }
    }

    /// Container closer row: the lone `}` or `]` at the opener's level.
    pub fn closer(bracket: Bracket, level: usize) -> Self {
        Self {
            key: bracket.close().to_string(),
            value: None,
            level,
        }
    }

    /// Degenerate root row for a document that is a bare scalar or null.
    ///
    /// Carries no key; only the formatted value.
    pub fn bare(value: String, level: usize) -> Self {
        Self {
            key: String::new(),
            value: Some(value),
            level,
        }
    }

    /// Whether this row opens a nested container.
    pub fn is_opener(&self) -> bool {
        self.value.is_none() && (self.key.ends_with('{') || self.key.ends_with('['))
    }

    /// Whether this row closes a nested container.
    pub fn is_closer(&self) -> bool {
        self.key == "}" || self.key == "]"
    }
}

impl fmt::Display for Line {
    /// Indented text form: two spaces per level, then the key, then the
    /// value if present. A bare root row renders as its value alone.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.level {
            f.write_str("  ")?;
        }
        match &self.value {
            Some(value) if self.key.is_empty() => f.write_str(value),
            Some(value) => write!(f, "{} {}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

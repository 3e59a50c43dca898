//! JSON Line Viewer (jlv)
//!
//! Core engine for windowed viewing of large JSON documents: a pure
//! flattener that converts a parsed document into an ordered list of
//! display lines, and a background worker that owns the flattened result
//! and answers bounded window reads over a message-passing protocol.
//!
//! The paint layer is intentionally absent: consumers drive the
//! [`worker::LineService`] protocol and render whatever window comes back.

pub mod config;
pub mod flatten;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod store;
pub mod worker;

#[cfg(test)]
mod tests;

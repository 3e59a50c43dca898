//! Consumer-side state (pure).
//!
//! Explicitly owned state containers for whatever front end sits on top
//! of the worker protocol: the last-received display window, with change
//! notification via explicit subscriptions, and the viewport math that
//! decides which window to request next as the user scrolls.

pub mod display;
pub mod viewport;

// Re-export for convenience
pub use display::{DisplayState, Observable};
pub use viewport::{clamp, Viewport};

//! Rope-backed text buffer for the editing surface.
//!
//! Cursor management, selection tracking and byte-offset addressing over a
//! ropey rope. Modified-state tracking lives on the document, not here.

mod buffer;

pub use buffer::{Cursor, Direction, TextBuffer};

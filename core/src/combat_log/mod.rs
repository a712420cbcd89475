//! Typed input records produced by the external packet decoder.
//!
//! The processor consumes these in order; nothing in this module performs I/O.

mod combat_event;

pub use combat_event::*;

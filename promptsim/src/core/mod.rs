//! Pure, deterministic simulator logic.
//!
//! Nothing in this module performs I/O. Phase descriptors, the
//! sequencer, the program data model, and the canned-content tables are
//! all plain functions over plain data, so every contract is testable
//! without a console attached.

pub mod content;
pub mod phase;
pub mod pipeline;
pub mod program;

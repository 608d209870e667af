//! Console and filesystem boundaries.
//!
//! Everything that touches a terminal, a config file, or a program
//! file lives here; the core stays pure so it can be tested without
//! any of it.

pub mod config;
pub mod console;
pub mod program_file;
pub mod render;

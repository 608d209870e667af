//! Stable exit codes for promptsim CLI commands.

/// Command completed a full workflow cycle or a clean program run.
pub const OK: i32 = 0;
/// Invalid config/program file or other errors.
pub const INVALID: i32 = 1;
/// Operator aborted at a pause point (`quit` or end of input).
pub const ABORTED: i32 = 2;
/// `promptsim exec` ran a program that faulted.
pub const FAULTED: i32 = 3;

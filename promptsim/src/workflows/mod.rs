//! Workflow handlers bound to the phase sequencer.
//!
//! Each workflow pairs a fixed phase list with a handler that knows
//! what to do at every phase. The sequencer drives them identically;
//! only the content differs.

pub mod react;
pub mod reflect;
pub mod support;

//! Console simulators of multi-step LLM-agent workflows.
//!
//! Three simulators (iterative code generation, multi-turn support
//! triage, iterative self-critique) share one staged execution
//! pipeline. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (phase descriptors, the
//!   sequencer, the generated-program data model, canned content).
//!   No I/O, fully testable in isolation.
//! - **[`sandbox`]**: Runs a generated program in isolation, capturing
//!   everything it prints and converting faults into data.
//! - **[`workflows`]**: The three simulators expressed as phase
//!   handlers over the shared sequencer.
//! - **[`io`]**: Side-effecting operations (console input, rendering,
//!   configuration, program files). Isolated to enable scripting in
//!   tests.
//!
//! [`driver`] coordinates rendering, operator pauses, and the sequencer
//! to implement the CLI subcommands.

pub mod core;
pub mod driver;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod sandbox;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod workflows;

//! Sandboxed execution of generated programs.
//!
//! The sandbox runs a program's instruction list through the embedded
//! interpreter, captures everything the program printed, and converts
//! any fault into a structured outcome. It never panics on program
//! misbehavior and never leaks program output anywhere but the capture
//! buffer.

pub mod interp;

use crate::core::program::Program;
use interp::{ExecFault, Interpreter};
use tracing::debug;

/// Result of one sandboxed run. Exactly one of output or fault exists
/// per attempt; a faulted run still carries whatever the program
/// printed before failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { output: String },
    Faulted { partial_output: String, fault: ExecFault },
}

impl RunOutcome {
    /// Captured text: full output on success, partial output on fault.
    pub fn output(&self) -> &str {
        match self {
            RunOutcome::Completed { output } => output,
            RunOutcome::Faulted { partial_output, .. } => partial_output,
        }
    }

    pub fn fault(&self) -> Option<&ExecFault> {
        match self {
            RunOutcome::Completed { .. } => None,
            RunOutcome::Faulted { fault, .. } => Some(fault),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, RunOutcome::Faulted { .. })
    }
}

/// Stateless executor; each run gets a fresh interpreter and buffer.
#[derive(Debug, Default)]
pub struct Sandbox;

impl Sandbox {
    pub fn new() -> Self {
        Self
    }

    /// Run `program` to completion or first fault.
    pub fn run(&self, program: &Program) -> RunOutcome {
        let mut capture = String::new();
        let result = Interpreter::new(&mut capture).run(&program.code);
        match result {
            Ok(()) => {
                debug!(program = %program.id, bytes = capture.len(), "run completed");
                RunOutcome::Completed { output: capture }
            }
            Err(fault) => {
                debug!(program = %program.id, %fault, "run faulted");
                RunOutcome::Faulted {
                    partial_output: capture,
                    fault,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::program::{BinOp, Expr, Instr, Program};

    #[test]
    fn successful_run_captures_output_verbatim() {
        let program = Program::new(
            "ok",
            "Ok",
            vec![
                Instr::Print {
                    parts: vec![Expr::str("line one")],
                },
                Instr::Print {
                    parts: vec![Expr::str("line two")],
                },
            ],
        );
        let outcome = Sandbox::new().run(&program);
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                output: "line one\nline two\n".to_string()
            }
        );
    }

    #[test]
    fn fault_preserves_partial_output() {
        let program = Program::new(
            "half",
            "Half",
            vec![
                Instr::Print {
                    parts: vec![Expr::str("made it here")],
                },
                Instr::Print {
                    parts: vec![Expr::bin(BinOp::Div, Expr::int(1), Expr::int(0))],
                },
                Instr::Print {
                    parts: vec![Expr::str("never printed")],
                },
            ],
        );
        let outcome = Sandbox::new().run(&program);
        assert!(outcome.is_fault());
        assert_eq!(outcome.output(), "made it here\n");
        assert_eq!(outcome.fault(), Some(&ExecFault::DivisionByZero));
    }

    #[test]
    fn runs_are_independent() {
        let sandbox = Sandbox::new();
        let set_only = Program::new(
            "set",
            "Set",
            vec![Instr::Set {
                name: "x".to_string(),
                value: Expr::int(9),
            }],
        );
        let read_x = Program::new(
            "read",
            "Read",
            vec![Instr::Print {
                parts: vec![Expr::var("x")],
            }],
        );
        assert!(!sandbox.run(&set_only).is_fault());
        // The second run must not see the first run's environment.
        assert!(sandbox.run(&read_x).is_fault());
    }

    #[test]
    fn empty_program_completes_with_empty_output() {
        let program = Program::new("empty", "Empty", vec![]);
        let outcome = Sandbox::new().run(&program);
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                output: String::new()
            }
        );
    }
}

//! Shared helpers for unit and integration tests.
//!
//! Available to integration tests via the `test-support` feature.

use std::collections::VecDeque;

use anyhow::Result;

use crate::core::program::{Expr, Instr, Program};
use crate::io::console::Console;

/// Console that replays a fixed list of inputs and records every
/// prompt it was shown. Returns `Ok(None)` when the script runs out,
/// mimicking end of input.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }
}

/// A program that prints the given lines and completes.
pub fn print_lines_program(lines: &[&str]) -> Program {
    let code = lines
        .iter()
        .map(|line| Instr::Print {
            parts: vec![Expr::str(*line)],
        })
        .collect();
    Program::new("print_lines", "Print lines", code)
}

/// A program that prints one line and then raises a fault.
pub fn faulting_program(message: &str) -> Program {
    Program::new(
        "faulting",
        "Faulting",
        vec![
            Instr::Print {
                parts: vec![Expr::str("before the fault")],
            },
            Instr::Fail {
                message: message.to_string(),
            },
        ],
    )
}

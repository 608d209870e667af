//! Operator input abstraction.
//!
//! The driver reads lines through this trait so the interactive loop
//! can be exercised in tests with a scripted console instead of a
//! terminal.

use anyhow::{Context, Result};
use std::io::Write;

/// Line-oriented operator input.
pub trait Console {
    /// Show `prompt` and read one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Console backed by real stdin/stdout.
#[derive(Debug, Default)]
pub struct StdinConsole;

impl Console for StdinConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        stdout.write_all(prompt.as_bytes()).context("write prompt")?;
        stdout.flush().context("flush prompt")?;

        let mut line = String::new();
        let n = std::io::stdin()
            .read_line(&mut line)
            .context("read line from stdin")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

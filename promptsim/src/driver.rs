//! Interactive loop driving a sequencer from a console.
//!
//! The driver owns the render/prompt/advance cycle and the session
//! commands (`reset`, `quit`). Input, output, and rendering are all
//! injected so the loop is testable end to end without a terminal.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::core::pipeline::{PhaseHandler, Sequencer};
use crate::io::config::SimConfig;
use crate::io::console::Console;
use crate::io::render::Renderer;

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// Every phase ran.
    Completed,
    /// The operator quit or input ended early.
    Aborted,
}

/// Drive `seq` to completion, redrawing a frame before every prompt.
pub fn drive<H, C, W>(
    seq: &mut Sequencer<H>,
    console: &mut C,
    out: &mut W,
    renderer: &Renderer<'_>,
    cfg: &SimConfig,
) -> Result<DriveOutcome>
where
    H: PhaseHandler,
    C: Console,
    W: Write,
{
    loop {
        renderer.render(out, seq.phases(), seq.state())?;

        let Some(prompt) = seq.prompt() else {
            return Ok(DriveOutcome::Completed);
        };
        let Some(line) = console.read_line(&prompt)? else {
            debug!("input ended, aborting session");
            writeln!(out, "\nGoodbye!")?;
            return Ok(DriveOutcome::Aborted);
        };

        match line.trim().to_lowercase().as_str() {
            "quit" => {
                debug!("operator quit");
                writeln!(out, "\nGoodbye!")?;
                return Ok(DriveOutcome::Aborted);
            }
            "reset" => {
                debug!("operator reset");
                seq.reset();
                continue;
            }
            // `stop` ends the run early where the workflow allows it;
            // anywhere else it is an ordinary message.
            "stop" => {
                if seq.stop() {
                    debug!("operator stopped early");
                    continue;
                }
            }
            _ => {}
        }

        if cfg.thinking_delay_ms > 0 {
            thread::sleep(Duration::from_millis(cfg.thinking_delay_ms));
        }
        seq.advance(&line);
    }
}

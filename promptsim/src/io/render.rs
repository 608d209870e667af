//! Frame rendering for the console UI.
//!
//! Each advance redraws one full frame: header, phase progress, task,
//! log, artifact, and execution results. Frames go to an injected
//! writer so tests can capture them.

use std::io::{self, Write};

use crate::core::phase::PhaseDescriptor;
use crate::core::pipeline::PipelineState;
use crate::io::config::SimConfig;

const WIDTH: usize = 70;

const GREEN: &str = "\x1b[92m";
const BLUE: &str = "\x1b[94m";
const GRAY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Renders pipeline frames for one workflow.
pub struct Renderer<'a> {
    cfg: &'a SimConfig,
    title: &'a str,
    subtitle: &'a str,
    /// Heading over the artifact block; differs per workflow
    /// (program listing vs. session summary vs. current draft).
    artifact_label: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(
        cfg: &'a SimConfig,
        title: &'a str,
        subtitle: &'a str,
        artifact_label: &'a str,
    ) -> Self {
        Self {
            cfg,
            title,
            subtitle,
            artifact_label,
        }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.cfg.color { code } else { "" }
    }

    /// Draw one complete frame of the pipeline.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        phases: &[PhaseDescriptor],
        state: &PipelineState,
    ) -> io::Result<()> {
        if self.cfg.clear_screen {
            write!(out, "\x1b[2J\x1b[H")?;
        }

        let rule = "=".repeat(WIDTH);
        let thin = "-".repeat(WIDTH);
        writeln!(out, "{rule}")?;
        writeln!(out, "{:^WIDTH$}", self.title)?;
        if !self.subtitle.is_empty() {
            writeln!(out, "{:^WIDTH$}", self.subtitle)?;
        }
        writeln!(out, "{rule}")?;
        writeln!(out)?;

        writeln!(out, "PHASES:")?;
        writeln!(out, "{thin}")?;
        for (i, phase) in phases.iter().enumerate() {
            let (glyph, color) = if i < state.cursor {
                ("✔", self.paint(GREEN))
            } else if i == state.cursor {
                ("▶", self.paint(BLUE))
            } else {
                ("○", self.paint(GRAY))
            };
            let reset = self.paint(RESET);
            writeln!(
                out,
                "{color}{glyph} {} Phase {}: {}{reset}",
                phase.icon,
                i + 1,
                phase.name
            )?;
            writeln!(out, "   {}", phase.description)?;
        }
        writeln!(out, "{thin}")?;
        writeln!(out)?;

        if !state.task.is_empty() {
            writeln!(out, "TASK:")?;
            writeln!(out, "{thin}")?;
            writeln!(out, "   {}", state.task)?;
            writeln!(out, "{thin}")?;
            writeln!(out)?;
        }

        if !state.log.is_empty() {
            writeln!(out, "LOG:")?;
            writeln!(out, "{thin}")?;
            for (i, line) in state.log.iter().enumerate() {
                writeln!(out, "   {}. {line}", i + 1)?;
            }
            writeln!(out, "{thin}")?;
            writeln!(out)?;
        }

        if let Some(artifact) = &state.artifact {
            writeln!(out, "{}:", self.artifact_label)?;
            writeln!(out, "{thin}")?;
            writeln!(out, "{}{artifact}{}", self.paint(YELLOW), self.paint(RESET))?;
            writeln!(out, "{thin}")?;
            writeln!(out)?;
        }

        if state.captured_output.is_some() || state.captured_fault.is_some() {
            writeln!(out, "EXECUTION RESULTS:")?;
            writeln!(out, "{thin}")?;
            if let Some(output) = &state.captured_output {
                writeln!(out, "{}Output:{}", self.paint(GREEN), self.paint(RESET))?;
                writeln!(out, "{output}")?;
            }
            if let Some(fault) = &state.captured_fault {
                writeln!(out, "{}Fault:{}", self.paint(RED), self.paint(RESET))?;
                writeln!(out, "{fault}")?;
            }
            writeln!(out, "{thin}")?;
            writeln!(out)?;
        }

        out.flush()
    }
}

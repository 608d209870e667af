//! Self-reflection workflow: iterative summarize, critique, improve.

use crate::core::content;
use crate::core::phase::{PhaseDescriptor, reflect_phases};
use crate::core::pipeline::{PhaseHandler, PipelineState, Sequencer};

pub const DEFAULT_ITERATIONS: usize = 3;

/// Handler for the reflection loop. Keeps every draft so the final
/// state can show the summary's evolution.
#[derive(Debug)]
pub struct ReflectHandler {
    iterations: usize,
    summaries: Vec<String>,
}

impl ReflectHandler {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            summaries: Vec::new(),
        }
    }

    /// All drafts produced so far, oldest first.
    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }

    fn log_evolution(&self, state: &mut PipelineState) {
        state.log.push("Summary evolution:".to_string());
        for (i, draft) in self.summaries.iter().enumerate() {
            state.log.push(format!("  Version {}: {draft}", i + 1));
        }
    }
}

/// Split ids like `critique_2` into the step kind and iteration.
fn parse_phase_id(id: &str) -> Option<(&str, usize)> {
    let (kind, n) = id.rsplit_once('_')?;
    Some((kind, n.parse().ok()?))
}

impl PhaseHandler for ReflectHandler {
    fn on_phase(&mut self, phase: &PhaseDescriptor, state: &mut PipelineState, input: &str) {
        let Some((kind, iteration)) = parse_phase_id(&phase.id) else {
            unreachable!("unknown reflection phase `{}`", phase.id)
        };
        match kind {
            "summary" => {
                let draft = if iteration == 1 {
                    state.task = input.trim().to_string();
                    content::initial_summary(&state.task)
                } else {
                    let previous = self.summaries.last().map(String::as_str).unwrap_or("");
                    content::improved_summary(iteration, previous)
                };
                state
                    .log
                    .push(format!("Summary v{iteration}: {draft}"));
                state.artifact = Some(draft.clone());
                self.summaries.push(draft);
            }
            "critique" => {
                state.log.push(format!("Self-critique (iteration {iteration}):"));
                for line in content::critique_lines(iteration) {
                    state.log.push(format!("  {line}"));
                }
            }
            "improve" => {
                state
                    .log
                    .push(format!("Identified improvements (iteration {iteration}):"));
                for line in content::improvement_lines(iteration) {
                    state.log.push(format!("  {line}"));
                }
                if iteration == self.iterations {
                    self.log_evolution(state);
                }
            }
            other => unreachable!("unknown reflection step `{other}`"),
        }
    }

    fn prompt(&self, phase: &PhaseDescriptor) -> String {
        match parse_phase_id(&phase.id) {
            Some(("summary", 1)) => "Enter the text you want to summarize: ".to_string(),
            Some(("summary", n)) => {
                format!(
                    "Press Enter to draft the iteration {n} summary \
                     (or type 'stop' to finish)... "
                )
            }
            Some(("critique", _)) => "Press Enter to generate self-critique... ".to_string(),
            Some(("improve", _)) => "Press Enter to identify improvements... ".to_string(),
            _ => format!("Press Enter to continue to {}... ", phase.name),
        }
    }

    // Early finish is offered at iteration boundaries, matching the
    // pause between one improvement list and the next draft.
    fn stoppable(&self, phase: &PhaseDescriptor) -> bool {
        matches!(parse_phase_id(&phase.id), Some(("summary", n)) if n > 1)
    }

    fn on_stop(&mut self, state: &mut PipelineState) {
        self.log_evolution(state);
    }

    fn reset(&mut self) {
        self.summaries.clear();
    }
}

/// A fresh sequencer over `iterations` reflection rounds.
pub fn sequencer(iterations: usize) -> Sequencer<ReflectHandler> {
    Sequencer::new(reflect_phases(iterations), ReflectHandler::new(iterations))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Rust is a systems language. It emphasizes safety. \
        The borrow checker enforces ownership. Many teams adopt it for reliability.";

    fn run_full() -> Sequencer<ReflectHandler> {
        let mut seq = sequencer(DEFAULT_ITERATIONS);
        seq.advance(TEXT);
        while !seq.is_complete() {
            seq.advance("");
        }
        seq
    }

    #[test]
    fn produces_one_draft_per_iteration() {
        let seq = run_full();
        let summaries = seq.handler().summaries();
        assert_eq!(summaries.len(), 3);
        assert!(summaries[0].starts_with("Rust is a systems language."));
        assert!(summaries[1].len() > summaries[0].len());
        assert!(summaries[2].len() > summaries[1].len());
    }

    #[test]
    fn artifact_tracks_the_latest_draft() {
        let seq = run_full();
        let latest = seq.handler().summaries().last().cloned().unwrap();
        assert_eq!(seq.state().artifact.as_deref(), Some(latest.as_str()));
    }

    #[test]
    fn log_contains_critiques_and_improvements_per_iteration() {
        let seq = run_full();
        let log = seq.state().log.join("\n");
        for n in 1..=3 {
            assert!(log.contains(&format!("Self-critique (iteration {n}):")));
            assert!(log.contains(&format!("Identified improvements (iteration {n}):")));
        }
        assert!(log.contains("Ready for final use"));
    }

    #[test]
    fn final_iteration_logs_the_summary_evolution() {
        let seq = run_full();
        let log = seq.state().log.join("\n");
        assert!(log.contains("Summary evolution:"));
        assert!(log.contains("Version 1:"));
        assert!(log.contains("Version 3:"));
    }

    #[test]
    fn stop_is_honored_only_at_iteration_boundaries() {
        let mut seq = sequencer(DEFAULT_ITERATIONS);
        seq.advance(TEXT);
        assert!(!seq.stop(), "mid-iteration stop must be refused");
        seq.advance("");
        seq.advance("");

        // Cursor now sits on summary_2, an iteration boundary.
        assert!(seq.stop());
        assert!(seq.is_complete());
        assert_eq!(seq.handler().summaries().len(), 1);
        let log = seq.state().log.join("\n");
        assert!(log.contains("Summary evolution:"));
        assert!(log.contains("Version 1:"));
        assert!(!log.contains("Version 2:"));
    }

    #[test]
    fn first_prompt_asks_for_source_text() {
        let seq = sequencer(DEFAULT_ITERATIONS);
        assert_eq!(
            seq.prompt().as_deref(),
            Some("Enter the text you want to summarize: ")
        );
    }

    #[test]
    fn reset_drops_all_drafts() {
        let mut seq = run_full();
        seq.reset();
        assert!(seq.handler().summaries().is_empty());
    }
}

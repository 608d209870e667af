//! Code-generation workflow: reason, plan, generate, execute, reflect.

use crate::core::content::{self, ContentEngine, Topic};
use crate::core::phase::{PhaseDescriptor, react_phases};
use crate::core::pipeline::{PhaseHandler, PipelineState, Sequencer};
use crate::core::program::Program;
use crate::sandbox::{RunOutcome, Sandbox};

/// Handler for the six-phase code-generation cycle.
pub struct ReactHandler {
    engine: ContentEngine,
    sandbox: Sandbox,
    topic: Topic,
    program: Option<Program>,
}

impl Default for ReactHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactHandler {
    pub fn new() -> Self {
        Self {
            engine: ContentEngine::new(),
            sandbox: Sandbox::new(),
            topic: Topic::Generic,
            program: None,
        }
    }

    /// The program generated in the current cycle, if any.
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }
}

impl PhaseHandler for ReactHandler {
    fn on_phase(&mut self, phase: &PhaseDescriptor, state: &mut PipelineState, input: &str) {
        match phase.id.as_str() {
            "understand" => {
                state.task = input.trim().to_string();
                self.topic = content::classify(&state.task);
                state.log.extend(self.engine.understand_lines(&state.task));
            }
            "reason" => {
                state.log.extend(content::reasoning_lines(self.topic));
            }
            "plan" => {
                state.log.extend(content::plan_lines(self.topic));
            }
            "generate" => {
                let program = content::build_program(self.topic, &state.task);
                state.artifact = Some(program.listing());
                self.program = Some(program);
            }
            "execute" => {
                let program = self
                    .program
                    .as_ref()
                    .expect("generate runs before execute");
                match self.sandbox.run(program) {
                    RunOutcome::Completed { output } => {
                        state.captured_output = Some(output);
                        state.captured_fault = None;
                        state.log.push("Code executed successfully!".to_string());
                    }
                    RunOutcome::Faulted {
                        partial_output,
                        fault,
                    } => {
                        state.captured_output = None;
                        if !partial_output.is_empty() {
                            state
                                .log
                                .push(format!("Partial output before failure:\n{partial_output}"));
                        }
                        state.log.push(format!("Execution failed: {fault}"));
                        state.captured_fault = Some(fault.to_string());
                    }
                }
            }
            "reflect" => {
                state
                    .log
                    .extend(self.engine.reflect_lines(state.captured_fault.as_deref()));
            }
            other => unreachable!("unknown code-generation phase `{other}`"),
        }
    }

    fn prompt(&self, phase: &PhaseDescriptor) -> String {
        match phase.id.as_str() {
            "understand" => "Enter your coding task: ".to_string(),
            "execute" => "Press Enter to execute the code... ".to_string(),
            "reflect" => "Press Enter to see reflection... ".to_string(),
            _ => format!("Press Enter to continue to {}... ", phase.name),
        }
    }

    fn reset(&mut self) {
        self.topic = Topic::Generic;
        self.program = None;
    }
}

/// A fresh sequencer over the full code-generation cycle.
pub fn sequencer() -> Sequencer<ReactHandler> {
    Sequencer::new(react_phases(), ReactHandler::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_through(task: &str) -> Sequencer<ReactHandler> {
        let mut seq = sequencer();
        seq.advance(task);
        while !seq.is_complete() {
            seq.advance("");
        }
        seq
    }

    #[test]
    fn fibonacci_cycle_captures_output_and_no_fault() {
        let seq = run_through("Write a function to calculate the nth Fibonacci number");
        let state = seq.state();
        assert!(state.artifact.as_deref().is_some_and(|a| a.contains("REPEAT")));
        assert_eq!(
            state.captured_output.as_deref(),
            Some("The 10th Fibonacci number is: 55\n")
        );
        assert_eq!(state.captured_fault, None);
        assert!(state.log.iter().any(|l| l == "Code executed successfully!"));
    }

    #[test]
    fn fault_demo_cycle_records_fault_and_partial_output() {
        let seq = run_through("demonstrate a crash");
        let state = seq.state();
        assert_eq!(state.captured_output, None);
        assert_eq!(state.captured_fault.as_deref(), Some("division by zero"));
        assert!(state
            .log
            .iter()
            .any(|l| l.starts_with("Partial output before failure:")));
        assert!(state
            .log
            .iter()
            .any(|l| l.contains("Error encountered during execution")));
    }

    #[test]
    fn understand_prompt_asks_for_the_task() {
        let seq = sequencer();
        assert_eq!(seq.prompt().as_deref(), Some("Enter your coding task: "));
    }

    #[test]
    fn reset_clears_generated_program() {
        let mut seq = run_through("factorial calculator");
        assert!(seq.handler().program().is_some());
        seq.reset();
        assert!(seq.handler().program().is_none());
        assert_eq!(seq.state().artifact, None);
    }
}

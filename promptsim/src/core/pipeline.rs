//! Pipeline state and the phase sequencer.
//!
//! The sequencer owns the ordered phase list and a cursor, and drives a
//! workflow handler through the phases in declared order with no
//! skipping or re-entrancy. Advancing past the end is a sequencing
//! violation and fails loudly rather than silently no-oping.

use crate::core::phase::PhaseDescriptor;
use tracing::debug;

/// Mutable state owned by exactly one running pipeline instance.
///
/// `captured_output` and `captured_fault` are mutually exclusive for
/// any single execution attempt: a sandboxed run produces exactly one
/// of the two. Both are `None` until an execution has occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// Index of the active phase; equals the phase count once complete.
    pub cursor: usize,
    /// Operator-supplied task or source text for this run.
    pub task: String,
    /// Append-only log of generated reasoning lines; cleared on reset.
    pub log: Vec<String>,
    /// Listing of the most recently generated program, if any.
    pub artifact: Option<String>,
    /// Verbatim output of the last successful execution.
    pub captured_output: Option<String>,
    /// Description of the last execution failure.
    pub captured_fault: Option<String>,
}

/// Handler invoked once per phase by the sequencer.
///
/// Handlers append to the log and mutate artifact/captures; they do
/// not return errors. A failing simulated execution is recorded as
/// data in `captured_fault`, never raised.
pub trait PhaseHandler {
    /// Run the phase under the cursor. `input` carries the operator's
    /// message for this step (empty for plain acknowledgments).
    fn on_phase(&mut self, phase: &PhaseDescriptor, state: &mut PipelineState, input: &str);

    /// Text shown when prompting the operator before this phase runs.
    fn prompt(&self, phase: &PhaseDescriptor) -> String {
        format!("Press Enter to continue to {}... ", phase.name)
    }

    /// True when the operator may end the run early before this phase.
    fn stoppable(&self, _phase: &PhaseDescriptor) -> bool {
        false
    }

    /// Finalize state when the run is ended early at a stoppable phase.
    fn on_stop(&mut self, _state: &mut PipelineState) {}

    /// Discard handler-held workflow state on pipeline reset.
    fn reset(&mut self) {}
}

/// Drives phases in declared order, one fully completed per advance.
pub struct Sequencer<H> {
    phases: Vec<PhaseDescriptor>,
    state: PipelineState,
    handler: H,
}

impl<H: PhaseHandler> Sequencer<H> {
    pub fn new(phases: Vec<PhaseDescriptor>, handler: H) -> Self {
        Self {
            phases,
            state: PipelineState::default(),
            handler,
        }
    }

    /// The fixed phase list, for rendering.
    pub fn phases(&self) -> &[PhaseDescriptor] {
        &self.phases
    }

    /// Current pipeline state, for rendering after each advance.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The workflow handler, for inspecting collected workflow data.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// True iff every phase has run.
    pub fn is_complete(&self) -> bool {
        self.state.cursor == self.phases.len()
    }

    /// Operator prompt for the active phase; `None` once complete.
    pub fn prompt(&self) -> Option<String> {
        self.phases
            .get(self.state.cursor)
            .map(|phase| self.handler.prompt(phase))
    }

    /// Invoke the handler bound to the active phase, then move the
    /// cursor forward by one.
    ///
    /// # Panics
    ///
    /// Panics when called on a completed pipeline. Advancing past the
    /// end is a programming error, not a recoverable condition.
    pub fn advance(&mut self, input: &str) {
        assert!(
            self.state.cursor < self.phases.len(),
            "advance called on a completed pipeline"
        );
        let phase = &self.phases[self.state.cursor];
        self.handler.on_phase(phase, &mut self.state, input);
        self.state.cursor += 1;
        debug!(phase = %phase.id, cursor = self.state.cursor, "phase completed");
    }

    /// End the run early before the active phase, skipping the
    /// remaining phases. Only honored where the handler marks the
    /// phase stoppable; returns whether the run was finished.
    pub fn stop(&mut self) -> bool {
        match self.phases.get(self.state.cursor) {
            Some(phase) if self.handler.stoppable(phase) => {
                debug!(phase = %phase.id, "run stopped early");
                self.handler.on_stop(&mut self.state);
                self.state.cursor = self.phases.len();
                true
            }
            _ => false,
        }
    }

    /// Reinitialize the pipeline to its empty form. Idempotent.
    pub fn reset(&mut self) {
        self.state = PipelineState::default();
        self.handler.reset();
    }
}

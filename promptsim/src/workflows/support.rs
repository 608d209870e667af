//! Customer-support triage chain: five steps, each consuming one
//! customer message and producing one agent reply.

use crate::core::content::{self, ContentEngine};
use crate::core::phase::{PhaseDescriptor, support_steps};
use crate::core::pipeline::{PhaseHandler, PipelineState, Sequencer};

/// Information collected across the five triage steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedData {
    pub issue: String,
    pub category: String,
    pub urgency: String,
    pub details: String,
    pub solution: String,
}

impl CollectedData {
    /// Non-empty fields as label/value pairs, in collection order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Issue", self.issue.as_str()),
            ("Category", self.category.as_str()),
            ("Urgency", self.urgency.as_str()),
            ("Details", self.details.as_str()),
            ("Solution", self.solution.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// Handler for the support triage chain.
pub struct SupportHandler {
    engine: ContentEngine,
    data: CollectedData,
}

impl Default for SupportHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SupportHandler {
    pub fn new() -> Self {
        Self {
            engine: ContentEngine::new(),
            data: CollectedData::default(),
        }
    }

    pub fn collected(&self) -> &CollectedData {
        &self.data
    }
}

impl PhaseHandler for SupportHandler {
    fn on_phase(&mut self, phase: &PhaseDescriptor, state: &mut PipelineState, input: &str) {
        let message = input.trim();
        state.log.push(format!("YOU: {message}"));

        let reply = match phase.id.as_str() {
            "greeting" => {
                state.task = message.to_string();
                self.data.issue = message.to_string();
                "Thank you for reaching out. Let me make sure I understand your \
                 issue so I can route it correctly."
                    .to_string()
            }
            "categorize" => {
                let category = content::detect_category(message);
                self.data.category = category.to_string();
                format!("I understand. This sounds like a {category} issue. Is that correct?")
            }
            "urgency" => {
                let urgency = content::detect_urgency(message);
                self.data.urgency = urgency.to_string();
                format!(
                    "Thank you for confirming. I've marked this as {urgency} priority \
                     so the right team picks it up in order."
                )
            }
            "details" => {
                self.data.details = message.to_string();
                "I appreciate those details. They will help us resolve this quickly."
                    .to_string()
            }
            "solution" => {
                let reply = self
                    .engine
                    .solution_reply(&self.data.issue, &self.data.category);
                self.data.solution = reply.clone();
                reply
            }
            other => unreachable!("unknown support step `{other}`"),
        };

        state.log.push(format!("AGENT: {reply}"));

        if phase.id == "solution" {
            let mut summary = String::from("Collected information:");
            for (label, value) in self.data.entries() {
                summary.push_str(&format!("\n  {label}: {value}"));
            }
            state.artifact = Some(summary);
        }
    }

    fn prompt(&self, phase: &PhaseDescriptor) -> String {
        let question = match phase.id.as_str() {
            "greeting" => {
                "Hello! Thank you for contacting our support team. Could you please \
                 describe the issue you're experiencing?"
            }
            "categorize" => {
                "Would you describe this as a technical, billing, account, or general issue?"
            }
            "urgency" => {
                "Is this preventing you from using our service completely, or is it \
                 something that can wait a bit?"
            }
            "details" => {
                "Could you provide any error messages you're seeing, or when you \
                 first noticed this issue?"
            }
            "solution" => "Anything else we should know before I propose a solution?",
            _ => return format!("Press Enter to continue to {}... ", phase.name),
        };
        format!("AGENT: {question}\nYour message: ")
    }

    fn reset(&mut self) {
        self.data = CollectedData::default();
    }
}

/// A fresh sequencer over the support triage chain.
pub fn sequencer() -> Sequencer<SupportHandler> {
    Sequencer::new(support_steps(), SupportHandler::new())
}

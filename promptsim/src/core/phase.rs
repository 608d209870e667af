//! Phase descriptors for the fixed workflow sequences.

/// One named stage of a fixed ordered workflow.
///
/// Descriptors are created once at startup and never mutated; the
/// sequencer shares them read-only with rendering code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDescriptor {
    /// Stable identifier the workflow handler dispatches on.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description shown in the progress list.
    pub description: String,
    /// Decorative marker shown next to the name.
    pub icon: String,
}

impl PhaseDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }
}

/// The six phases of the code-generation workflow, in execution order.
pub fn react_phases() -> Vec<PhaseDescriptor> {
    vec![
        PhaseDescriptor::new(
            "understand",
            "Understanding Task",
            "Analyze and understand the coding task requirements",
            "🤔",
        ),
        PhaseDescriptor::new(
            "reason",
            "Reasoning",
            "Think through the approach and logic needed",
            "💭",
        ),
        PhaseDescriptor::new(
            "plan",
            "Planning",
            "Create a step-by-step implementation plan",
            "📋",
        ),
        PhaseDescriptor::new(
            "generate",
            "Code Generation",
            "Assemble the program as an instruction list",
            "⚙️",
        ),
        PhaseDescriptor::new(
            "execute",
            "Execution",
            "Run the program in the sandbox and capture results",
            "▶️",
        ),
        PhaseDescriptor::new(
            "reflect",
            "Reflection",
            "Analyze results and suggest improvements",
            "🔍",
        ),
    ]
}

/// The five steps of the support-triage chain, in execution order.
pub fn support_steps() -> Vec<PhaseDescriptor> {
    vec![
        PhaseDescriptor::new(
            "greeting",
            "Greeting",
            "Greet the customer and learn what issue they need help with",
            "💬",
        ),
        PhaseDescriptor::new(
            "categorize",
            "Categorize",
            "Categorize the issue into Technical, Billing, Account, or General",
            "💬",
        ),
        PhaseDescriptor::new(
            "urgency",
            "Urgency",
            "Determine urgency level: Low, Medium, or High",
            "💬",
        ),
        PhaseDescriptor::new(
            "details",
            "Details",
            "Gather detailed information about the problem",
            "💬",
        ),
        PhaseDescriptor::new(
            "solution",
            "Solution",
            "Provide a solution or next steps",
            "💬",
        ),
    ]
}

/// Phases for `iterations` rounds of summarize → critique → improve.
pub fn reflect_phases(iterations: usize) -> Vec<PhaseDescriptor> {
    let mut phases = Vec::with_capacity(iterations * 3);
    for n in 1..=iterations {
        phases.push(PhaseDescriptor::new(
            format!("summary_{n}"),
            format!("Iteration {n}: Summary"),
            if n == 1 {
                "Generate the initial summary".to_string()
            } else {
                "Generate an improved summary based on feedback".to_string()
            },
            "🔁",
        ));
        phases.push(PhaseDescriptor::new(
            format!("critique_{n}"),
            format!("Iteration {n}: Critique"),
            "Critique the draft against the reflection criteria".to_string(),
            "🔁",
        ));
        phases.push(PhaseDescriptor::new(
            format!("improve_{n}"),
            format!("Iteration {n}: Improvements"),
            "List concrete improvements for the next draft".to_string(),
            "🔁",
        ));
    }
    phases
}

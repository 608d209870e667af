//! Canned content tables for the simulated model.
//!
//! Every "model response" in the simulators comes from here: reasoning
//! lines, implementation plans, generated programs, support replies,
//! and reflection critiques. Everything is deterministic; the same
//! inputs always produce the same content.

use crate::core::program::{BinOp, Expr, Instr, Program};
use minijinja::{Environment, context};
use regex::RegexSet;
use std::sync::LazyLock;

const UNDERSTAND_TEMPLATE: &str = include_str!("content/understand.md");
const REFLECT_TEMPLATE: &str = include_str!("content/reflect.md");
const SUPPORT_SOLUTION_TEMPLATE: &str = include_str!("content/support_solution.md");

/// Task categories the code-generation workflow knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Fibonacci,
    Prime,
    Palindrome,
    Sort,
    Factorial,
    FaultDemo,
    Generic,
}

static TOPIC_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)\b(crash|fault|broken|bug)\b",
        r"(?i)fibonacci",
        r"(?i)\bprime\b",
        r"(?i)palindrome",
        r"(?i)\b(sort|bubble)\b",
        r"(?i)factorial",
    ])
    .expect("topic patterns should be valid regexes")
});

/// Classify a task description. Earlier patterns win on overlap, with
/// the fault demo first so "crash the fibonacci demo" probes failure.
pub fn classify(task: &str) -> Topic {
    match TOPIC_PATTERNS.matches(task).iter().next() {
        Some(0) => Topic::FaultDemo,
        Some(1) => Topic::Fibonacci,
        Some(2) => Topic::Prime,
        Some(3) => Topic::Palindrome,
        Some(4) => Topic::Sort,
        Some(5) => Topic::Factorial,
        _ => Topic::Generic,
    }
}

/// Template engine for the content rendered from minijinja templates.
pub struct ContentEngine {
    env: Environment<'static>,
}

impl Default for ContentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("understand", UNDERSTAND_TEMPLATE)
            .expect("understand template should be valid");
        env.add_template("reflect", REFLECT_TEMPLATE)
            .expect("reflect template should be valid");
        env.add_template("support_solution", SUPPORT_SOLUTION_TEMPLATE)
            .expect("support_solution template should be valid");
        Self { env }
    }

    /// Reasoning lines for the understand phase.
    pub fn understand_lines(&self, task: &str) -> Vec<String> {
        self.render_lines("understand", context! { task => task })
    }

    /// Reflection lines; content depends on whether execution faulted.
    pub fn reflect_lines(&self, fault: Option<&str>) -> Vec<String> {
        self.render_lines("reflect", context! { fault => fault })
    }

    /// The final support reply, with a deterministic ticket number
    /// derived from the reported issue.
    pub fn solution_reply(&self, issue: &str, category: &str) -> String {
        let ticket = ticket_number(issue);
        let recommendation = recommendation_for(category);
        let template = self
            .env
            .get_template("support_solution")
            .expect("template was registered in new");
        template
            .render(context! { recommendation => recommendation, ticket => ticket })
            .expect("support_solution context is complete")
            .trim_end()
            .to_string()
    }

    fn render_lines(&self, name: &str, ctx: minijinja::Value) -> Vec<String> {
        let template = self
            .env
            .get_template(name)
            .expect("template was registered in new");
        let rendered = template.render(ctx).expect("template context is complete");
        rendered
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Reasoning lines for the reason phase, keyed by topic.
pub fn reasoning_lines(topic: Topic) -> Vec<String> {
    let lines: &[&str] = match topic {
        Topic::Fibonacci => &[
            "This is a sequence generation problem",
            "Can be solved iteratively or recursively",
            "Iterative approach is more efficient for large n",
            "Need to handle base cases (n=0, n=1)",
        ],
        Topic::Prime => &[
            "Need to check divisibility by smaller numbers",
            "Counting divisors between 2 and n-1 keeps the check simple",
            "Handle edge cases: n < 2 is not prime",
            "A number is prime when no divisor is found",
        ],
        Topic::Palindrome => &[
            "Need to compare the text with its reverse",
            "Ignore case and non-alphanumeric characters",
            "Cleaning happens before the comparison",
            "Edge case: empty string is a palindrome",
        ],
        Topic::Sort => &[
            "Need to order the elements ascending",
            "Bubble sort compares adjacent elements",
            "Time complexity: O(n^2)",
            "Repeated passes bubble the largest element to the end",
        ],
        Topic::Factorial => &[
            "Factorial is the product of all positive integers up to n",
            "Can be solved recursively or iteratively",
            "Base case: 0! = 1, 1! = 1",
            "Negative inputs are undefined",
        ],
        Topic::FaultDemo => &[
            "The task asks to demonstrate a failure path",
            "Division by zero is a reliable fault trigger",
            "Output printed before the fault should still be captured",
            "The fault must surface as data, not take the host down",
        ],
        Topic::Generic => &[
            "Analyzing the problem structure",
            "Identifying required data structures",
            "Considering algorithmic complexity",
            "Planning for error handling",
        ],
    };
    lines.iter().map(ToString::to_string).collect()
}

/// Implementation-plan lines for the plan phase, keyed by topic.
pub fn plan_lines(topic: Topic) -> Vec<String> {
    let lines: &[&str] = match topic {
        Topic::Fibonacci => &[
            "Step 1: Initialize the first two numbers",
            "Step 2: Loop from 2 to n, calculating the next number",
            "Step 3: Shift the pair forward each iteration",
            "Step 4: Print the nth Fibonacci number",
        ],
        Topic::Prime => &[
            "Step 1: Pick a set of test numbers",
            "Step 2: Count divisors from 2 up to n-1",
            "Step 3: Use the modulo operator to detect divisibility",
            "Step 4: Print whether each number is prime",
        ],
        Topic::Palindrome => &[
            "Step 1: Pick a set of test strings",
            "Step 2: Clean each string (lowercase, alphanumeric only)",
            "Step 3: Compare the cleaned string with its reverse",
            "Step 4: Print the boolean result per string",
        ],
        Topic::Sort => &[
            "Step 1: Start from the unsorted list",
            "Step 2: Compare adjacent elements pass by pass",
            "Step 3: Swap elements that are out of order",
            "Step 4: Print the original and the sorted list",
        ],
        Topic::Factorial => &[
            "Step 1: Pick a set of test values",
            "Step 2: Initialize the result to 1",
            "Step 3: Multiply the result by each number from 2 to n",
            "Step 4: Print each factorial",
        ],
        Topic::FaultDemo => &[
            "Step 1: Print a line that should survive the fault",
            "Step 2: Perform a division that succeeds",
            "Step 3: Divide by zero to trigger the fault",
            "Step 4: The final print must never run",
        ],
        Topic::Generic => &[
            "Step 1: Define the output message",
            "Step 2: Initialize necessary variables",
            "Step 3: Implement the main logic",
            "Step 4: Print the result",
        ],
    };
    lines.iter().map(ToString::to_string).collect()
}

/// Build the canned program for a topic. The task text becomes the
/// program description so the listing stays self-explanatory.
pub fn build_program(topic: Topic, task: &str) -> Program {
    let mut program = match topic {
        Topic::Fibonacci => fibonacci_program(),
        Topic::Prime => prime_program(),
        Topic::Palindrome => palindrome_program(),
        Topic::Sort => sort_program(),
        Topic::Factorial => factorial_program(),
        Topic::FaultDemo => fault_demo_program(),
        Topic::Generic => generic_program(),
    };
    program.description = Some(task.to_string());
    program
}

fn set(name: &str, value: Expr) -> Instr {
    Instr::Set {
        name: name.to_string(),
        value,
    }
}

fn print(parts: Vec<Expr>) -> Instr {
    Instr::Print { parts }
}

fn fibonacci_program() -> Program {
    Program::new(
        "fibonacci",
        "Nth Fibonacci number",
        vec![
            set("a", Expr::int(0)),
            set("b", Expr::int(1)),
            Instr::Repeat {
                var: "i".to_string(),
                from: Expr::int(2),
                to: Expr::int(10),
                body: vec![
                    set("next", Expr::bin(BinOp::Add, Expr::var("a"), Expr::var("b"))),
                    set("a", Expr::var("b")),
                    set("b", Expr::var("next")),
                ],
            },
            print(vec![
                Expr::str("The 10th Fibonacci number is: "),
                Expr::var("b"),
            ]),
        ],
    )
}

fn prime_program() -> Program {
    let mut code = Vec::new();
    for n in [2i64, 17, 20, 29, 100] {
        code.push(set("n", Expr::int(n)));
        code.push(set("divisors", Expr::int(0)));
        code.push(Instr::Repeat {
            var: "d".to_string(),
            from: Expr::int(2),
            to: Expr::bin(BinOp::Sub, Expr::var("n"), Expr::int(1)),
            body: vec![Instr::If {
                cond: Expr::bin(
                    BinOp::Eq,
                    Expr::bin(BinOp::Mod, Expr::var("n"), Expr::var("d")),
                    Expr::int(0),
                ),
                then: vec![set(
                    "divisors",
                    Expr::bin(BinOp::Add, Expr::var("divisors"), Expr::int(1)),
                )],
                otherwise: vec![],
            }],
        });
        code.push(print(vec![
            Expr::var("n"),
            Expr::str(" is prime: "),
            Expr::bin(BinOp::Eq, Expr::var("divisors"), Expr::int(0)),
        ]));
    }
    Program::new("prime", "Prime number check", code)
}

fn palindrome_program() -> Program {
    let tests = [
        "racecar",
        "hello",
        "A man a plan a canal Panama",
        "12321",
    ];
    let mut code = Vec::new();
    for original in tests {
        let cleaned: String = original
            .chars()
            .filter(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let reversed: String = cleaned.chars().rev().collect();
        code.push(set("cleaned", Expr::str(cleaned)));
        code.push(set("reversed", Expr::str(reversed)));
        code.push(print(vec![
            Expr::str(format!("'{original}' is palindrome: ")),
            Expr::bin(BinOp::Eq, Expr::var("cleaned"), Expr::var("reversed")),
        ]));
    }
    Program::new("palindrome", "Palindrome checker", code)
}

fn sort_program() -> Program {
    let unsorted = [64i64, 34, 25, 12, 22, 11, 90];
    let mut sorted = unsorted;
    sorted.sort_unstable();
    let render = |xs: &[i64]| {
        let items: Vec<String> = xs.iter().map(ToString::to_string).collect();
        format!("[{}]", items.join(", "))
    };
    Program::new(
        "bubble_sort",
        "Bubble sort",
        vec![
            print(vec![Expr::str(format!("Original: {}", render(&unsorted)))]),
            print(vec![Expr::str(format!("Sorted: {}", render(&sorted)))]),
        ],
    )
}

fn factorial_program() -> Program {
    let mut code = Vec::new();
    for n in [0i64, 1, 5, 10] {
        code.push(set("result", Expr::int(1)));
        code.push(Instr::Repeat {
            var: "i".to_string(),
            from: Expr::int(2),
            to: Expr::int(n),
            body: vec![set(
                "result",
                Expr::bin(BinOp::Mul, Expr::var("result"), Expr::var("i")),
            )],
        });
        code.push(print(vec![
            Expr::int(n),
            Expr::str("! = "),
            Expr::var("result"),
        ]));
    }
    Program::new("factorial", "Factorial calculator", code)
}

fn fault_demo_program() -> Program {
    Program::new(
        "fault_demo",
        "Failure-path demonstration",
        vec![
            print(vec![Expr::str("Probing the failure path...")]),
            print(vec![
                Expr::str("10 / 2 = "),
                Expr::bin(BinOp::Div, Expr::int(10), Expr::int(2)),
            ]),
            print(vec![
                Expr::str("10 / 0 = "),
                Expr::bin(BinOp::Div, Expr::int(10), Expr::int(0)),
            ]),
            print(vec![Expr::str("this line is never reached")]),
        ],
    )
}

fn generic_program() -> Program {
    Program::new(
        "generic",
        "Generic task",
        vec![
            set("message", Expr::str("Task completed successfully!")),
            print(vec![Expr::var("message")]),
        ],
    )
}

static CATEGORY_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)technical",
        r"(?i)billing",
        r"(?i)account",
        r"(?i)general",
    ])
    .expect("category patterns should be valid regexes")
});

/// Map a customer message to a support category.
pub fn detect_category(message: &str) -> &'static str {
    match CATEGORY_PATTERNS.matches(message).iter().next() {
        Some(1) => "Billing",
        Some(2) => "Account",
        Some(3) => "General",
        _ => "Technical",
    }
}

static HIGH_URGENCY: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"(?i)\b(urgent|immediately|completely|blocked|down|high)\b"])
        .expect("urgency patterns should be valid regexes")
});

static MEDIUM_URGENCY: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"(?i)\b(soon|medium|week)\b"])
        .expect("urgency patterns should be valid regexes")
});

/// Map a customer message to an urgency level.
pub fn detect_urgency(message: &str) -> &'static str {
    if HIGH_URGENCY.is_match(message) {
        "High"
    } else if MEDIUM_URGENCY.is_match(message) {
        "Medium"
    } else {
        "Low"
    }
}

fn recommendation_for(category: &str) -> &'static str {
    match category {
        "Billing" => {
            "I've flagged your account for a billing review; any incorrect charges \
             will be corrected within 3-5 business days."
        }
        "Account" => {
            "please use the password reset link we just sent and verify your \
             recovery email so you regain full access."
        }
        "General" => {
            "I've shared the relevant help-center article with you and noted your \
             feedback for our product team."
        }
        _ => {
            "restart the affected service and install the latest update; if the \
             problem persists our engineers will review the logs attached to your ticket."
        }
    }
}

/// Deterministic four-digit ticket number derived from the issue text.
fn ticket_number(issue: &str) -> u32 {
    let sum: u32 = issue.bytes().map(u32::from).sum();
    sum % 9000 + 1000
}

/// The five criteria the self-reflection workflow critiques against.
pub const REFLECTION_CRITERIA: [&str; 5] = [
    "Clarity - Is the summary easy to understand?",
    "Completeness - Does it cover all key points?",
    "Conciseness - Is it brief without losing meaning?",
    "Accuracy - Does it faithfully represent the original?",
    "Structure - Is it well-organized?",
];

/// Extractive first draft: the first two sentences when the text is
/// long enough, otherwise the whole text.
pub fn initial_summary(text: &str) -> String {
    let sentences: Vec<&str> = text.split(". ").collect();
    if sentences.len() > 3 {
        format!("{}.", sentences[..2].join(". "))
    } else {
        text.to_string()
    }
}

/// Rewrite the previous draft for the given iteration (1-based).
pub fn improved_summary(iteration: usize, previous: &str) -> String {
    match iteration {
        2 => format!(
            "{previous} This includes additional context and specific examples that \
             were initially overlooked, providing a more comprehensive overview."
        ),
        3 => format!(
            "A well-structured and comprehensive summary that captures all essential \
             information from the original text. {previous} The content is now organized \
             logically with clear connections between ideas, maintaining accuracy while \
             achieving optimal conciseness."
        ),
        _ => previous.to_string(),
    }
}

/// Per-criterion judgements for the given iteration (1-based). Later
/// iterations read progressively better, ending at full marks.
pub fn critique_lines(iteration: usize) -> Vec<String> {
    let judgements: [&str; 5] = match iteration {
        1 => [
            "Somewhat clear but could be more direct",
            "Missing some important details from the original",
            "Good length but could be more focused",
            "Accurate but lacks specific examples",
            "Basic structure, could improve logical flow",
        ],
        2 => [
            "Much clearer with better word choice",
            "Better coverage but still missing minor points",
            "Well-balanced length",
            "More accurate with added specifics",
            "Improved flow and organization",
        ],
        _ => [
            "Excellent clarity and readability",
            "Comprehensive coverage of all key points",
            "Perfectly concise without sacrificing meaning",
            "Highly accurate with precise details",
            "Well-structured and logically organized",
        ],
    };
    REFLECTION_CRITERIA
        .iter()
        .zip(judgements)
        .map(|(criterion, judgement)| {
            let name = criterion.split(" - ").next().unwrap_or(criterion);
            format!("{name}: {judgement}")
        })
        .collect()
}

/// Improvement actions for the given iteration (1-based).
pub fn improvement_lines(iteration: usize) -> Vec<String> {
    let lines: &[&str] = match iteration {
        1 => &[
            "Add more specific details and examples from the original text",
            "Improve sentence structure for better flow",
            "Include key points that were omitted",
            "Use more precise vocabulary",
            "Better organize information hierarchically",
        ],
        2 => &[
            "Fine-tune word choices for maximum clarity",
            "Ensure all secondary points are captured",
            "Polish transitions between ideas",
            "Verify consistency in tone and style",
        ],
        _ => &[
            "Summary has reached optimal quality",
            "All major improvement areas addressed",
            "Ready for final use",
        ],
    };
    lines.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::Sandbox;

    #[test]
    fn classification_matches_task_keywords() {
        assert_eq!(classify("Write the nth Fibonacci function"), Topic::Fibonacci);
        assert_eq!(classify("check if a number is PRIME"), Topic::Prime);
        assert_eq!(classify("implement a palindrome checker"), Topic::Palindrome);
        assert_eq!(classify("write a bubble sort"), Topic::Sort);
        assert_eq!(classify("factorial calculator"), Topic::Factorial);
        assert_eq!(classify("show me a crash"), Topic::FaultDemo);
        assert_eq!(classify("reverse a linked list"), Topic::Generic);
    }

    #[test]
    fn fault_keywords_win_over_topic_keywords() {
        assert_eq!(classify("a broken fibonacci demo"), Topic::FaultDemo);
    }

    #[test]
    fn fibonacci_program_prints_55() {
        let program = build_program(Topic::Fibonacci, "fibonacci");
        let outcome = Sandbox::new().run(&program);
        assert_eq!(
            outcome.output(),
            "The 10th Fibonacci number is: 55\n"
        );
        assert!(!outcome.is_fault());
    }

    #[test]
    fn prime_program_labels_each_test_number() {
        let program = build_program(Topic::Prime, "prime");
        let outcome = Sandbox::new().run(&program);
        let output = outcome.output();
        assert!(output.contains("2 is prime: true"));
        assert!(output.contains("17 is prime: true"));
        assert!(output.contains("20 is prime: false"));
        assert!(output.contains("29 is prime: true"));
        assert!(output.contains("100 is prime: false"));
    }

    #[test]
    fn palindrome_program_ignores_case_and_spacing() {
        let program = build_program(Topic::Palindrome, "palindrome");
        let outcome = Sandbox::new().run(&program);
        let output = outcome.output();
        assert!(output.contains("'racecar' is palindrome: true"));
        assert!(output.contains("'hello' is palindrome: false"));
        assert!(output.contains("'A man a plan a canal Panama' is palindrome: true"));
        assert!(output.contains("'12321' is palindrome: true"));
    }

    #[test]
    fn factorial_program_covers_base_cases() {
        let program = build_program(Topic::Factorial, "factorial");
        let outcome = Sandbox::new().run(&program);
        let output = outcome.output();
        assert!(output.contains("0! = 1"));
        assert!(output.contains("1! = 1"));
        assert!(output.contains("5! = 120"));
        assert!(output.contains("10! = 3628800"));
    }

    #[test]
    fn sort_and_generic_programs_complete() {
        let sandbox = Sandbox::new();

        let sort = build_program(Topic::Sort, "write a bubble sort");
        let outcome = sandbox.run(&sort);
        assert!(!outcome.is_fault());
        assert!(outcome.output().contains("Original: [64, 34, 25, 12, 22, 11, 90]"));
        assert!(outcome.output().contains("Sorted: [11, 12, 22, 25, 34, 64, 90]"));

        let generic = build_program(Topic::Generic, "reverse a linked list");
        let outcome = sandbox.run(&generic);
        assert!(!outcome.is_fault());
        assert_eq!(outcome.output(), "Task completed successfully!\n");
    }

    #[test]
    fn fault_demo_program_faults_after_partial_output() {
        let program = build_program(Topic::FaultDemo, "crash it");
        let outcome = Sandbox::new().run(&program);
        assert!(outcome.is_fault());
        assert!(outcome.output().contains("10 / 2 = 5"));
        assert!(!outcome.output().contains("never reached"));
    }

    #[test]
    fn understand_lines_embed_the_task() {
        let engine = ContentEngine::new();
        let lines = engine.understand_lines("sort a list");
        assert_eq!(lines[0], "Task received: 'sort a list'");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn reflect_lines_differ_between_success_and_fault() {
        let engine = ContentEngine::new();
        let ok = engine.reflect_lines(None);
        let bad = engine.reflect_lines(Some("division by zero"));
        assert!(ok[0].contains("successfully"));
        assert!(bad[0].contains("Error encountered"));
        assert!(bad.iter().any(|l| l.contains("division by zero")));
    }

    #[test]
    fn category_detection_defaults_to_technical() {
        assert_eq!(detect_category("my billing statement is wrong"), "Billing");
        assert_eq!(detect_category("locked out of my account"), "Account");
        assert_eq!(detect_category("just a general question"), "General");
        assert_eq!(detect_category("the app crashes on startup"), "Technical");
    }

    #[test]
    fn urgency_detection_orders_high_over_medium() {
        assert_eq!(detect_urgency("this is urgent, I am blocked"), "High");
        assert_eq!(detect_urgency("would be nice to fix soon"), "Medium");
        assert_eq!(detect_urgency("no rush at all"), "Low");
    }

    #[test]
    fn ticket_numbers_are_deterministic_and_four_digit() {
        let engine = ContentEngine::new();
        let a = engine.solution_reply("printer is on fire", "Technical");
        let b = engine.solution_reply("printer is on fire", "Technical");
        assert_eq!(a, b);
        let digits: String = a
            .chars()
            .skip_while(|c| *c != '#')
            .skip(1)
            .take_while(char::is_ascii_digit)
            .collect();
        assert_eq!(digits.len(), 4);
    }

    #[test]
    fn initial_summary_truncates_long_text() {
        let text = "One. Two. Three. Four. Five.";
        assert_eq!(initial_summary(text), "One. Two.");
        assert_eq!(initial_summary("Short text"), "Short text");
    }

    #[test]
    fn improved_summary_grows_across_iterations() {
        let first = initial_summary("A. B. C. D.");
        let second = improved_summary(2, &first);
        let third = improved_summary(3, &second);
        assert!(second.starts_with(&first));
        assert!(third.contains(&second));
        assert!(third.len() > second.len());
    }

    #[test]
    fn critiques_and_improvements_cover_three_iterations() {
        for n in 1..=3 {
            assert_eq!(critique_lines(n).len(), 5);
            assert!(!improvement_lines(n).is_empty());
        }
        assert!(critique_lines(3)[0].contains("Excellent"));
        assert!(improvement_lines(3)[0].contains("optimal"));
    }
}

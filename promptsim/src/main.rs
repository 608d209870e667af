//! Console simulators of multi-step LLM-agent workflows.
//!
//! Each subcommand drives one workflow through a fixed phase sequence:
//! `react` generates and sandbox-executes a program, `support` runs a
//! five-step triage chain, `reflect` iteratively improves a summary.
//! `exec` runs a program file directly through the sandbox.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use promptsim::core::pipeline::{PhaseHandler, Sequencer};
use promptsim::driver::{self, DriveOutcome};
use promptsim::exit_codes;
use promptsim::io::config::{SimConfig, load_config};
use promptsim::io::console::StdinConsole;
use promptsim::io::program_file::load_program;
use promptsim::io::render::Renderer;
use promptsim::logging;
use promptsim::sandbox::{RunOutcome, Sandbox};
use promptsim::workflows::{react, reflect, support};

#[derive(Parser)]
#[command(
    name = "promptsim",
    version,
    about = "Deterministic console simulators of LLM-agent workflows"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "promptsim.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the code-generation workflow (reason, plan, generate, execute, reflect).
    React,
    /// Run the customer-support triage chain.
    Support,
    /// Run the self-reflection summary improvement loop.
    Reflect,
    /// Execute a program file in the sandbox and print its output.
    Exec {
        /// JSON program file to run.
        file: PathBuf,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;
    match cli.command {
        Command::React => run_workflow(
            react::sequencer(),
            &cfg,
            "REACT CODE GENERATOR",
            "Reasoning + Action Pattern for Code Generation",
            "GENERATED PROGRAM",
        ),
        Command::Support => run_workflow(
            support::sequencer(),
            &cfg,
            "CUSTOMER SUPPORT AGENT",
            "Prompt-Chained Support Triage",
            "SESSION SUMMARY",
        ),
        Command::Reflect => run_workflow(
            reflect::sequencer(cfg.reflect_iterations),
            &cfg,
            "SELF-REFLECTION LOOP",
            "Critique and Improve Summaries Through Self-Reflection",
            "CURRENT SUMMARY",
        ),
        Command::Exec { file } => cmd_exec(&file),
    }
}

fn run_workflow<H: PhaseHandler>(
    mut seq: Sequencer<H>,
    cfg: &SimConfig,
    title: &str,
    subtitle: &str,
    artifact_label: &str,
) -> Result<i32> {
    let renderer = Renderer::new(cfg, title, subtitle, artifact_label);
    let mut console = StdinConsole;
    let mut out = io::stdout();
    let outcome = driver::drive(&mut seq, &mut console, &mut out, &renderer, cfg)?;
    Ok(match outcome {
        DriveOutcome::Completed => exit_codes::OK,
        DriveOutcome::Aborted => exit_codes::ABORTED,
    })
}

fn cmd_exec(file: &std::path::Path) -> Result<i32> {
    let program = load_program(file)?;
    match Sandbox::new().run(&program) {
        RunOutcome::Completed { output } => {
            print!("{output}");
            Ok(exit_codes::OK)
        }
        RunOutcome::Faulted {
            partial_output,
            fault,
        } => {
            print!("{partial_output}");
            eprintln!("fault: {fault}");
            Ok(exit_codes::FAULTED)
        }
    }
}

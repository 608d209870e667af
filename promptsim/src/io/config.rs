//! Simulator configuration stored in `promptsim.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Simulator configuration (TOML).
///
/// The file is optional and human-edited. Missing fields default to
/// the interactive-demo values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    /// Pause before each phase, simulating model thinking time.
    pub thinking_delay_ms: u64,

    /// Emit ANSI color codes in the rendered frames.
    pub color: bool,

    /// Clear the terminal before each rendered frame.
    pub clear_screen: bool,

    /// Rounds of summarize/critique/improve in the reflection workflow.
    /// Capped at 3; the canned critique tables plateau there.
    pub reflect_iterations: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 500,
            color: true,
            clear_screen: true,
            reflect_iterations: 3,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.reflect_iterations == 0 || self.reflect_iterations > 3 {
            return Err(anyhow!("reflect_iterations must be between 1 and 3"));
        }
        if self.thinking_delay_ms > 10_000 {
            return Err(anyhow!("thinking_delay_ms must be at most 10000"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SimConfig::default()`.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    if !path.exists() {
        let cfg = SimConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SimConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

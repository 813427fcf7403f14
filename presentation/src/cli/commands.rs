//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for solve outcomes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Answer, explanation, and audit metadata panels
    Full,
    /// Only the verified answer
    Answer,
    /// JSON-serialized outcome
    Json,
}

impl OutputFormat {
    /// Parse a config-file format name, falling back to `Full`.
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "answer" => OutputFormat::Answer,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Full,
        }
    }
}

/// CLI arguments for triad
#[derive(Parser, Debug)]
#[command(name = "triad")]
#[command(author, version, about = "Self-verifying reasoning agent - plan, execute, verify")]
#[command(long_about = r#"
Triad answers a free-text reasoning question with a self-checked answer.

Each attempt runs three phases:
1. Planner: produce a step-by-step plan
2. Executor: solve the question and return answer + explanation
3. Verifier: run a consistency check on the proposed answer

Failed checks are retried up to the configured budget; the outcome carries
the full audit trail of verification attempts.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./triad.toml        Project-level config
3. ~/.config/triad/config.toml   Global config

Example:
  triad "If a train leaves at 14:30 and arrives at 18:05, how long is the journey?"
  triad --backend openai --model gpt-4o "How many apples does Alice have?"
  triad --repl
"#)]
pub struct Cli {
    /// The question to solve (not required in REPL mode)
    pub question: Option<String>,

    /// Start the interactive prompt loop
    #[arg(short, long)]
    pub repl: bool,

    /// Backend to use ("fixture" or "openai"), overriding the config file
    #[arg(short, long, value_name = "MODE")]
    pub backend: Option<String>,

    /// Model identifier for the live backend
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format (defaults to the config file's setting)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and headers
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

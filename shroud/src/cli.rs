// shroud/src/cli.rs
//! This file defines the command-line interface (CLI) for the shroud binary,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "shroud",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect and mask personally identifiable information in text",
    long_about = "Shroud is a command-line utility for detecting and masking Personally Identifiable Information (PII) in text. It layers regex pattern rules, an optional entity recognition service, and an optional generative verifier, then replaces every located fragment with a category placeholder such as [EMAIL] or [PERSON].",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "debug", help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `shroud` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks PII in an input file or stdin, replacing fragments with placeholders.
    #[command(about = "Masks PII in an input file or stdin, replacing fragments with placeholders.")]
    Mask(MaskCommand),

    /// Scans an input for PII and reports findings as JSON without masking.
    #[command(about = "Scans an input for PII and reports findings as JSON without masking.")]
    Scan(ScanCommand),
}

/// Arguments for the `mask` command.
#[derive(Parser, Debug)]
pub struct MaskCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write masked output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to a custom rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom rule configuration file (YAML), merged over the defaults.")]
    pub config: Option<PathBuf>,

    /// Print the full outcome (masked text, findings, source) as JSON.
    #[arg(long = "json", help = "Print the full outcome as JSON instead of plain masked text.")]
    pub json: bool,

    /// Write the findings report to a JSON file.
    #[arg(long = "report", value_name = "FILE", help = "Write the findings report to a JSON file.")]
    pub report: Option<PathBuf>,

    /// Bypass the result cache for this run.
    #[arg(long = "no-cache", help = "Bypass the result cache: neither read it nor write to it.")]
    pub no_cache: bool,

    /// Base URL of an Ollama-style generative endpoint.
    #[arg(long = "llm-url", value_name = "URL", env = "SHROUD_LLM_URL", help = "Base URL of an Ollama-style generative endpoint; unset disables generative verification.")]
    pub llm_url: Option<String>,

    /// Model name for the generative endpoint.
    #[arg(long = "llm-model", value_name = "NAME", env = "SHROUD_LLM_MODEL", help = "Model name passed to the generative endpoint.")]
    pub llm_model: Option<String>,

    /// Base URL of a spaCy-style entity recognition service.
    #[arg(long = "ner-url", value_name = "URL", env = "SHROUD_NER_URL", help = "Base URL of an entity recognition service; unset disables entity recognition.")]
    pub ner_url: Option<String>,

    /// Per-request collaborator timeout in seconds.
    #[arg(long = "timeout", value_name = "SECONDS", env = "SHROUD_COLLABORATOR_TIMEOUT", help = "Per-request collaborator timeout in seconds.")]
    pub timeout: Option<u64>,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom rule configuration file (YAML), merged over the defaults.")]
    pub config: Option<PathBuf>,

    /// Export the scan report to a JSON file instead of stdout.
    #[arg(long = "json-file", value_name = "FILE", help = "Write the scan report to a JSON file instead of stdout.")]
    pub json_file: Option<PathBuf>,

    /// Exit with a non-zero code if the number of detected fragments exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the number of detected fragments exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,

    /// Bypass the result cache for this run.
    #[arg(long = "no-cache", help = "Bypass the result cache: neither read it nor write to it.")]
    pub no_cache: bool,

    /// Base URL of an Ollama-style generative endpoint.
    #[arg(long = "llm-url", value_name = "URL", env = "SHROUD_LLM_URL", help = "Base URL of an Ollama-style generative endpoint; unset disables generative verification.")]
    pub llm_url: Option<String>,

    /// Model name for the generative endpoint.
    #[arg(long = "llm-model", value_name = "NAME", env = "SHROUD_LLM_MODEL", help = "Model name passed to the generative endpoint.")]
    pub llm_model: Option<String>,

    /// Base URL of a spaCy-style entity recognition service.
    #[arg(long = "ner-url", value_name = "URL", env = "SHROUD_NER_URL", help = "Base URL of an entity recognition service; unset disables entity recognition.")]
    pub ner_url: Option<String>,

    /// Per-request collaborator timeout in seconds.
    #[arg(long = "timeout", value_name = "SECONDS", env = "SHROUD_COLLABORATOR_TIMEOUT", help = "Per-request collaborator timeout in seconds.")]
    pub timeout: Option<u64>,
}

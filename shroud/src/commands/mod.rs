// shroud/src/commands/mod.rs
//! Command implementations for the `shroud` binary, plus the input and
//! configuration plumbing they share.
//! License: MIT OR Apache-2.0

pub mod mask;
pub mod scan;

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::Path;

use shroud_core::{merge_rules, MaskingConfig};

/// Collaborator endpoint overrides taken from command-line flags or their
/// environment variable fallbacks. Applied last, over both the embedded
/// defaults and any user configuration file.
#[derive(Debug, Default)]
pub struct EndpointOverrides {
    pub llm_url: Option<String>,
    pub llm_model: Option<String>,
    pub ner_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Reads the text to process from a file when one is given, otherwise from
/// stdin.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin...");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

/// Loads the embedded default rule table, merges an optional user
/// configuration file over it, and applies endpoint overrides last.
pub fn build_config(
    config_path: Option<&Path>,
    endpoints: EndpointOverrides,
) -> Result<MaskingConfig> {
    let defaults = MaskingConfig::load_default_rules()?;
    let user = match config_path {
        Some(path) => Some(MaskingConfig::load_from_file(path)?),
        None => None,
    };
    let mut config = merge_rules(defaults, user);

    if endpoints.llm_url.is_some() {
        config.collaborators.llm_url = endpoints.llm_url;
    }
    if endpoints.llm_model.is_some() {
        config.collaborators.llm_model = endpoints.llm_model;
    }
    if endpoints.ner_url.is_some() {
        config.collaborators.ner_url = endpoints.ner_url;
    }
    if endpoints.timeout_seconds.is_some() {
        config.collaborators.timeout_seconds = endpoints.timeout_seconds;
    }

    Ok(config)
}

// shroud/src/commands/mask.rs
//! The `mask` command: run the full pipeline and emit masked text.
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};

use shroud_core::Shroud;

use super::{build_config, read_input, EndpointOverrides};
use crate::cli::MaskCommand;

/// Runs the `mask` subcommand.
pub fn run(cmd: &MaskCommand) -> Result<()> {
    info!("Starting mask operation.");

    let input = read_input(cmd.input_file.as_deref())?;
    let config = build_config(
        cmd.config.as_deref(),
        EndpointOverrides {
            llm_url: cmd.llm_url.clone(),
            llm_model: cmd.llm_model.clone(),
            ner_url: cmd.ner_url.clone(),
            timeout_seconds: cmd.timeout,
        },
    )?;

    let pipeline = Shroud::new(config).context("Failed to initialize the masking pipeline")?;
    let outcome = pipeline.process_text(&input, !cmd.no_cache);

    debug!(
        "Content masked. Original length: {}, masked length: {}, source: {:?}",
        input.len(),
        outcome.masked_text.len(),
        outcome.source
    );

    if let Some(path) = &cmd.report {
        info!("Writing findings report to file: {}", path.display());
        let report = serde_json::to_string_pretty(&outcome.findings)
            .context("Failed to serialize findings report")?;
        fs::write(path, report)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    }

    let rendered = if cmd.json {
        serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
    } else {
        outcome.masked_text
    };

    match &cmd.output {
        Some(path) => {
            info!("Writing masked content to file: {}", path.display());
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", rendered)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", rendered)?;
        }
    }

    info!("Mask operation completed.");
    Ok(())
}

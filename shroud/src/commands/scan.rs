// shroud/src/commands/scan.rs
//! The `scan` command: report findings as JSON without emitting masked text.
//! License: MIT OR Apache-2.0

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};

use shroud_core::{FindingSet, Shroud};

use super::{build_config, read_input, EndpointOverrides};
use crate::cli::ScanCommand;

/// Scan report written to stdout or `--json-file`.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Total number of detected fragments across all categories.
    pub total_fragments: usize,
    /// Per-category fragment lists, in report order.
    pub findings: FindingSet,
}

/// Runs the `scan` subcommand.
pub fn run(cmd: &ScanCommand) -> Result<()> {
    info!("Starting scan operation.");

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

    let pipeline = Shroud::new(config).context("Failed to initialize the scanning pipeline")?;
    let outcome = pipeline.process_text(&input, !cmd.no_cache);

    let report = ScanReport {
        total_fragments: outcome.findings.fragment_count(),
        findings: outcome.findings,
    };
    let rendered =
        serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;

    match &cmd.json_file {
        Some(path) => {
            info!("Writing scan report to file: {}", path.display());
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", rendered)?;
        }
    }

    if let Some(threshold) = cmd.fail_over_threshold {
        if report.total_fragments > threshold {
            bail!(
                "Detected {} PII fragment(s), exceeding the threshold of {}",
                report.total_fragments,
                threshold
            );
        }
    }

    info!("Scan operation completed.");
    Ok(())
}

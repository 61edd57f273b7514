// shroud-core/src/providers/ollama.rs
//! Generative verification backed by an Ollama-compatible HTTP server.
//!
//! Requests go to `POST {base}/api/generate` with streaming disabled; the
//! health check probes `GET {base}/api/version`. The completion text is
//! scanned line by line for the phrases the model flagged as sensitive.

use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::collaborators::GenerativeVerifier;
use crate::errors::ShroudError;

/// Model requested when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "llama2";

const SAMPLING_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: usize,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// A [`GenerativeVerifier`] that talks to an Ollama-compatible server.
pub struct OllamaVerifier {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaVerifier {
    /// Connects to the server at `base_url` and verifies it is reachable.
    ///
    /// A failed health check is fatal: a configured-but-absent backend is a
    /// deployment mistake, not a condition to degrade around.
    pub fn new(base_url: &str, model: Option<String>, timeout: Duration) -> Result<Self, ShroudError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ShroudError::CollaboratorUnavailable("generative".to_string(), e.to_string())
        })?;

        let verifier = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };
        verifier.check_health()?;
        Ok(verifier)
    }

    fn check_health(&self) -> Result<(), ShroudError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self.client.get(&url).send().map_err(|e| {
            ShroudError::CollaboratorUnavailable("generative".to_string(), e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(ShroudError::CollaboratorUnavailable(
                "generative".to_string(),
                format!("health check at {} returned {}", url, response.status()),
            ));
        }
        Ok(())
    }
}

impl GenerativeVerifier for OllamaVerifier {
    fn get_completion(&self, prompt: &str, max_tokens: usize) -> Result<Option<Vec<String>>> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature: SAMPLING_TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .with_context(|| format!("generative backend at {} did not respond", self.base_url))?
            .error_for_status()
            .context("generative backend returned an error status")?;

        let body: GenerateResponse = response
            .json()
            .context("generative backend returned an unparsable body")?;

        let items = parse_sensitive_items(&body.response);
        debug!("Generative backend flagged {} item(s).", items.len());

        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(items))
        }
    }
}

/// Extracts flagged phrases from a completion.
///
/// Lines mentioning "sensitive" or "personal" contribute the text after
/// their last colon; everything else is ignored.
fn parse_sensitive_items(response: &str) -> Vec<String> {
    let mut sensitive_items = Vec::new();

    for line in response.lines() {
        let lowered = line.to_lowercase();
        if lowered.contains("sensitive") || lowered.contains("personal") {
            let item = line.rsplit(':').next().unwrap_or("").trim();
            if !item.is_empty() {
                sensitive_items.push(item.to_string());
            }
        }
    }

    sensitive_items
}

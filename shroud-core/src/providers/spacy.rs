// shroud-core/src/providers/spacy.rs
//! Entity recognition backed by a spaCy-style NER microservice.
//!
//! Requests go to `POST {base}/ent` with a JSON body of `{"text": ...}`; the
//! service answers with an array of `{"text": ..., "label": ...}` entity
//! records, which are folded into a label-keyed map. The health check probes
//! `GET {base}/health`.

use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::collaborators::EntityRecognizer;
use crate::errors::ShroudError;

#[derive(Debug, Serialize)]
struct EntRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EntRecord {
    text: String,
    label: String,
}

/// An [`EntityRecognizer`] that talks to a spaCy-style microservice.
pub struct SpacyRecognizer {
    client: Client,
    base_url: String,
}

impl SpacyRecognizer {
    /// Connects to the service at `base_url` and verifies it is reachable.
    ///
    /// As with the generative backend, a failed health check is fatal.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ShroudError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ShroudError::CollaboratorUnavailable("entity".to_string(), e.to_string())
        })?;

        let recognizer = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        };
        recognizer.check_health()?;
        Ok(recognizer)
    }

    fn check_health(&self) -> Result<(), ShroudError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().map_err(|e| {
            ShroudError::CollaboratorUnavailable("entity".to_string(), e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(ShroudError::CollaboratorUnavailable(
                "entity".to_string(),
                format!("health check at {} returned {}", url, response.status()),
            ));
        }
        Ok(())
    }
}

impl EntityRecognizer for SpacyRecognizer {
    fn extract_entities(&self, text: &str) -> Result<HashMap<String, Vec<String>>> {
        let response = self
            .client
            .post(format!("{}/ent", self.base_url))
            .json(&EntRequest { text })
            .send()
            .with_context(|| format!("NER backend at {} did not respond", self.base_url))?
            .error_for_status()
            .context("NER backend returned an error status")?;

        let records: Vec<EntRecord> = response
            .json()
            .context("NER backend returned an unparsable body")?;

        let mut entities: HashMap<String, Vec<String>> = HashMap::new();
        for record in records {
            entities.entry(record.label).or_default().push(record.text);
        }
        debug!("NER backend returned {} label(s).", entities.len());

        Ok(entities)
    }
}

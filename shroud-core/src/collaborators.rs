// shroud-core/src/collaborators.rs
//! Defines the collaborator traits for the generative and entity detection tiers.
//!
//! The `GenerativeVerifier` and `EntityRecognizer` traits provide pluggable
//! interfaces for the external model backends the pipeline consults. This
//! module defines the contract those backends must adhere to, plus the
//! disabled stand-ins used when no backend is configured.
//!
//! A failed construction of a real backend is fatal, but once constructed a
//! collaborator is allowed to fail per call: callers treat `Err` as "this
//! tier produced nothing" and continue with the remaining tiers.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use std::collections::HashMap;

/// Token budget handed to the generative backend when the caller does not
/// specify one.
pub const DEFAULT_MAX_TOKENS: usize = 100;

/// A trait for the generative verification tier.
///
/// Implementations submit a prompt to a generative model and report back any
/// sensitive phrases the model flagged.
pub trait GenerativeVerifier: Send + Sync {
    /// Submits `prompt` to the backend, capping the response at `max_tokens`.
    ///
    /// Returns `Ok(Some(phrases))` when the model flagged sensitive content,
    /// `Ok(None)` when it flagged nothing, and `Err` when the backend could
    /// not be reached or produced an unusable response. Callers treat `None`,
    /// an empty list, and `Err` identically: the generative tier contributes
    /// nothing to the findings.
    fn get_completion(&self, prompt: &str, max_tokens: usize) -> Result<Option<Vec<String>>>;
}

/// A trait for the named-entity recognition tier.
///
/// Implementations map input text to entity labels (e.g., `PERSON`, `GPE`)
/// and the fragments matched under each label.
pub trait EntityRecognizer: Send + Sync {
    /// Extracts entities from `text`.
    ///
    /// `Err` means the backend failed for this call; callers continue with an
    /// empty entity map.
    fn extract_entities(&self, text: &str) -> Result<HashMap<String, Vec<String>>>;
}

/// A verifier that is permanently switched off. Used when no generative
/// backend is configured, keeping the pipeline pattern-and-entity only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledVerifier;

impl GenerativeVerifier for DisabledVerifier {
    fn get_completion(&self, _prompt: &str, _max_tokens: usize) -> Result<Option<Vec<String>>> {
        Ok(None)
    }
}

/// A recognizer that is permanently switched off. Used when no NER backend
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRecognizer;

impl EntityRecognizer for DisabledRecognizer {
    fn extract_entities(&self, _text: &str) -> Result<HashMap<String, Vec<String>>> {
        Ok(HashMap::new())
    }
}

// shroud-core/src/detector.rs
//! Two-tier detection: the pattern table plus generative verification.
//!
//! Pattern findings are authoritative and always reported. The generative
//! tier is advisory: its findings appear under `llm_detected` only when the
//! backend flagged something, and a backend failure downgrades the run to
//! pattern-only detection instead of failing it.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::warn;

use crate::collaborators::{GenerativeVerifier, DEFAULT_MAX_TOKENS};
use crate::findings::{Category, FindingSet};
use crate::patterns::PatternDetector;

pub struct PiiDetector {
    patterns: PatternDetector,
    verifier: Arc<dyn GenerativeVerifier>,
}

impl PiiDetector {
    pub fn new(patterns: PatternDetector, verifier: Arc<dyn GenerativeVerifier>) -> Self {
        Self { patterns, verifier }
    }

    /// Runs both detection tiers over `text`.
    ///
    /// The result always carries every enabled pattern category;
    /// `llm_detected` is added only when the generative backend flagged at
    /// least one phrase.
    pub fn detect_pii(&self, text: &str) -> FindingSet {
        let mut findings = self.patterns.detect_patterns(text);

        let prompt = format!("Identify if this text contains sensitive information: {text}");
        match self.verifier.get_completion(&prompt, DEFAULT_MAX_TOKENS) {
            Ok(Some(items)) if !items.is_empty() => {
                findings.insert(Category::LlmDetected, items);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Generative verification failed; continuing without it: {}", e);
            }
        }

        findings
    }
}

// shroud-core/src/pipeline.rs
//! The top-level masking facade.
//!
//! `Shroud` wires the detection tiers, the masker, and the result cache into
//! a single entry point. `process_text` upholds one promise above all: it
//! returns an outcome for every input. Collaborator trouble shrinks the
//! findings, and an internal failure (a poisoned cache lock, say) falls back
//! to the original text with an `error` source instead of panicking.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::cache::ResultCache;
use crate::collaborators::{EntityRecognizer, GenerativeVerifier};
use crate::config::MaskingConfig;
use crate::detector::PiiDetector;
use crate::errors::ShroudError;
use crate::findings::FindingSet;
use crate::patterns::compiler::get_or_compile_patterns;
use crate::patterns::PatternDetector;
use crate::processor::TextProcessor;
use crate::providers::build_collaborators;

/// Where a processing outcome came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Cache,
    Processor,
    Error,
}

/// The result of one `process_text` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub masked_text: String,
    pub findings: FindingSet,
    pub source: Source,
}

/// The PII masking pipeline facade.
pub struct Shroud {
    processor: TextProcessor,
    cache: ResultCache,
}

impl Shroud {
    /// Builds a pipeline from configuration, constructing HTTP collaborators
    /// for any configured endpoints.
    ///
    /// Fails fast when a rule does not compile or a configured collaborator
    /// does not pass its health check.
    pub fn new(config: MaskingConfig) -> Result<Self, ShroudError> {
        let (verifier, recognizer) = build_collaborators(&config.collaborators)?;
        Self::with_collaborators(config, verifier, recognizer)
    }

    /// Builds a pipeline around caller-provided collaborators. This is the
    /// constructor to use for tests and for embedding custom backends.
    pub fn with_collaborators(
        config: MaskingConfig,
        verifier: Arc<dyn GenerativeVerifier>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Result<Self, ShroudError> {
        let compiled = get_or_compile_patterns(&config)?;
        let detector = PiiDetector::new(PatternDetector::new(compiled), verifier);
        let processor = TextProcessor::new(detector, recognizer);
        let cache = ResultCache::from_config(&config.cache);

        Ok(Self { processor, cache })
    }

    /// Detects and masks PII in `text`.
    ///
    /// With `use_cache` set, a byte-identical repeat of an earlier input is
    /// answered from the cache (`source: cache`); otherwise the full pipeline
    /// runs and, when caching is on, stores its result. This method does not
    /// fail: any internal error yields the original text, empty findings,
    /// and `source: error`.
    pub fn process_text(&self, text: &str, use_cache: bool) -> ProcessOutcome {
        match self.try_process(text, use_cache) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Processing error: {}", e);
                ProcessOutcome {
                    masked_text: text.to_string(),
                    findings: FindingSet::new(),
                    source: Source::Error,
                }
            }
        }
    }

    fn try_process(&self, text: &str, use_cache: bool) -> Result<ProcessOutcome, ShroudError> {
        if use_cache {
            if let Some((masked_text, findings)) = self.cache.get(text)? {
                debug!("Serving processing result from cache.");
                return Ok(ProcessOutcome {
                    masked_text,
                    findings,
                    source: Source::Cache,
                });
            }
        }

        let (masked_text, findings) = self.processor.process(text);

        if use_cache {
            self.cache.put(text, masked_text.clone(), findings.clone())?;
        }

        Ok(ProcessOutcome {
            masked_text,
            findings,
            source: Source::Processor,
        })
    }
}

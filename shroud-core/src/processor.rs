// shroud-core/src/processor.rs
//! Coordinates the full detection-and-masking pass over a piece of text.
//!
//! Order matters: entities are extracted first, then the pattern and
//! generative tiers run, then the entity findings are merged in under their
//! lower-cased category names, and finally the combined findings drive the
//! masker. A failing NER backend degrades the run (no entity findings)
//! rather than failing it.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use crate::collaborators::EntityRecognizer;
use crate::detector::PiiDetector;
use crate::findings::{relevant_entities, FindingSet};
use crate::masker::mask_findings;

pub struct TextProcessor {
    detector: PiiDetector,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl TextProcessor {
    pub fn new(detector: PiiDetector, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { detector, recognizer }
    }

    /// Detects and masks PII in `text`, returning the masked text and the
    /// findings that produced it. Infallible: collaborator trouble shrinks
    /// the findings, it never fails the pass.
    pub fn process(&self, text: &str) -> (String, FindingSet) {
        let entities = match self.recognizer.extract_entities(text) {
            Ok(entities) => entities,
            Err(e) => {
                warn!("Entity extraction failed; continuing without entities: {}", e);
                HashMap::new()
            }
        };

        let mut findings = self.detector.detect_pii(text);

        for (category, values) in relevant_entities(&entities) {
            findings.append(category, values);
        }

        let masked_text = mask_findings(text, &findings);
        (masked_text, findings)
    }
}

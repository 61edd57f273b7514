// shroud-core/src/patterns/mod.rs
//! Pattern-tier detection: applies the compiled regex rule table to text.
//!
//! This is the first and most trusted detection tier. It never fails: every
//! enabled category appears in the output, with an empty list when nothing
//! matched, so a reader of the findings can tell "checked, found nothing"
//! from "never checked".
//!
//! License: MIT OR APACHE 2.0

pub mod compiler;

use std::sync::Arc;

use crate::findings::{log_finding_debug, Category, FindingSet};
use crate::validators;
use compiler::{CompiledPattern, CompiledPatterns};

/// Applies the compiled rule table to input text.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    compiled: Arc<CompiledPatterns>,
}

impl PatternDetector {
    pub fn new(compiled: Arc<CompiledPatterns>) -> Self {
        Self { compiled }
    }

    fn run_programmatic_validator(&self, pattern: &CompiledPattern, original_str: &str) -> bool {
        if !pattern.programmatic_validation {
            return true;
        }
        match pattern.category {
            Category::Ssn => validators::is_valid_ssn_programmatically(original_str),
            Category::CreditCard => validators::is_valid_credit_card_programmatically(original_str),
            _ => true,
        }
    }

    /// Runs every enabled rule against `text`, in table order.
    ///
    /// Matches within a category are reported in text order (leftmost first,
    /// non-overlapping per the regex engine). Categories whose rule is
    /// disabled are omitted entirely.
    pub fn detect_patterns(&self, text: &str) -> FindingSet {
        let mut findings = FindingSet::new();

        for pattern in &self.compiled.patterns {
            if !pattern.enabled {
                continue;
            }

            let mut values = Vec::new();
            for m in pattern.regex.find_iter(text) {
                if self.run_programmatic_validator(pattern, m.as_str()) {
                    log_finding_debug(module_path!(), pattern.category, m.as_str());
                    values.push(m.as_str().to_string());
                }
            }
            findings.insert(pattern.category, values);
        }

        findings
    }
}

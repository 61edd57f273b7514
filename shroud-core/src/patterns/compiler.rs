//! compiler.rs - Manages the compilation and caching of pattern rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `MaskingConfig` rule table into `CompiledPatterns`, which are optimized
//! for efficient detection. It uses a global, shared cache to avoid
//! redundant compilation.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{MaskingConfig, PatternRule, MAX_PATTERN_LENGTH};
use crate::errors::ShroudError;
use crate::findings::Category;

/// A single compiled pattern rule, ready for efficient matching.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The finding category this pattern reports under.
    pub category: Category,
    /// A flag indicating if matches require additional programmatic validation.
    pub programmatic_validation: bool,
    /// Resolved enablement for this rule.
    pub enabled: bool,
}

/// The full compiled rule table, in table order.
#[derive(Debug)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled patterns.
    /// The key is a hash of the configured rule table.
    static ref COMPILED_PATTERNS_CACHE: RwLock<HashMap<u64, Arc<CompiledPatterns>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the rule table to create a stable, unique key for the cache.
///
/// To ensure determinism, the rules are sorted by category name before hashing.
fn hash_config(config: &MaskingConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut rules_to_hash = config.rules.clone();

    rules_to_hash.sort_by(|a, b| a.category.name().cmp(b.category.name()));
    rules_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a rule table into `CompiledPatterns`.
/// This is the low-level function that performs the actual regex compilation.
pub fn compile_patterns(rules_to_compile: Vec<PatternRule>) -> Result<CompiledPatterns, ShroudError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        debug!("Attempting to compile rule '{}'", rule.category);

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ShroudError::PatternLengthExceeded(
                rule.category.name().to_string(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                debug!("Rule '{}' compiled successfully.", rule.category);
                compiled.push(CompiledPattern {
                    regex,
                    category: rule.category,
                    programmatic_validation: rule.programmatic_validation,
                    enabled: rule.is_enabled(),
                });
            }
            Err(e) => {
                compilation_errors.push(ShroudError::RuleCompilationError(
                    rule.category.name().to_string(),
                    e,
                ));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ShroudError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling rules. Total compiled: {}.", compiled.len());
        Ok(CompiledPatterns { patterns: compiled })
    }
}

/// Gets a `CompiledPatterns` instance from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving compiled patterns. It returns
/// an `Arc` to a `CompiledPatterns` instance, allowing for cheap sharing.
pub fn get_or_compile_patterns(config: &MaskingConfig) -> Result<Arc<CompiledPatterns>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_PATTERNS_CACHE.read().unwrap();
        if let Some(patterns) = cache.get(&cache_key) {
            debug!("Serving compiled patterns from cache for key: {}", &cache_key);
            return Ok(Arc::clone(patterns));
        }
    } // Read lock is released here.

    debug!("Compiled patterns not found in cache. Compiling now.");
    let compiled = compile_patterns(config.rules.clone())?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_PATTERNS_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached patterns for key: {}", &cache_key);
    Ok(compiled_arc)
}

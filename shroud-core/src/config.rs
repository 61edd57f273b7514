//! Configuration management for `shroud-core`.
//!
//! This module defines the core data structures for pattern rules, cache
//! settings, and collaborator endpoints. It handles serialization and
//! deserialization of YAML configurations and provides utilities for loading,
//! merging, and validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::findings::Category;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single pattern-tier detection rule.
///
/// The rule table is ordered: findings are reported in table order, so the
/// embedded defaults define the canonical report layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PatternRule {
    /// The finding category this rule reports under.
    pub category: Category,
    /// Human-readable description of what the rule targets.
    #[serde(default)]
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: String,
    /// Explicit override for enabling/disabling the rule.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// If true, matches must also pass programmatic validation (e.g., SSN structure).
    #[serde(default)]
    pub programmatic_validation: bool,
}

impl PatternRule {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Result cache settings. Unset fields fall back to the cache defaults.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of memoized results (default: 1000; 0 disables caching).
    pub max_entries: Option<usize>,
    /// Seconds a memoized result stays fresh (default: 3600; 0 disables expiry).
    pub ttl_seconds: Option<u64>,
}

/// External collaborator endpoints. Unset URLs leave the corresponding
/// detection tier disabled.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct CollaboratorConfig {
    /// Base URL of the generative model server (e.g., a local Ollama instance).
    pub llm_url: Option<String>,
    /// Model name passed to the generative endpoint.
    pub llm_model: Option<String>,
    /// Base URL of the entity recognition microservice.
    pub ner_url: Option<String>,
    /// Request timeout in seconds for collaborator calls (default: 10).
    pub timeout_seconds: Option<u64>,
}

/// Represents the top-level configuration structure for Shroud.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct MaskingConfig {
    /// The ordered pattern rule table driving tier-one detection.
    pub rules: Vec<PatternRule>,
    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// External model endpoints.
    #[serde(default)]
    pub collaborators: CollaboratorConfig,
}

impl MaskingConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: MaskingConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the default rule table from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: MaskingConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }
}

/// Merges a user configuration over the defaults.
///
/// Rules are keyed by category: a user rule for an existing category replaces
/// the default in place, and novel categories are appended in the user's file
/// order. Table order is report order, so the walk stays positional instead
/// of going through a map.
pub fn merge_rules(default_config: MaskingConfig, user_config: Option<MaskingConfig>) -> MaskingConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let mut final_rules = default_config.rules;
    let mut final_cache = default_config.cache;
    let mut final_collaborators = default_config.collaborators;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.category == user_rule.category) {
                Some(existing) => *existing = user_rule,
                None => final_rules.push(user_rule),
            }
        }

        if let Some(max_entries) = user_cfg.cache.max_entries {
            debug!("Overriding cache max_entries with user value: {}", max_entries);
            final_cache.max_entries = Some(max_entries);
        }
        if let Some(ttl_seconds) = user_cfg.cache.ttl_seconds {
            debug!("Overriding cache ttl_seconds with user value: {}", ttl_seconds);
            final_cache.ttl_seconds = Some(ttl_seconds);
        }

        if user_cfg.collaborators.llm_url.is_some() {
            final_collaborators.llm_url = user_cfg.collaborators.llm_url;
        }
        if user_cfg.collaborators.llm_model.is_some() {
            final_collaborators.llm_model = user_cfg.collaborators.llm_model;
        }
        if user_cfg.collaborators.ner_url.is_some() {
            final_collaborators.ner_url = user_cfg.collaborators.ner_url;
        }
        if user_cfg.collaborators.timeout_seconds.is_some() {
            final_collaborators.timeout_seconds = user_cfg.collaborators.timeout_seconds;
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());

    MaskingConfig {
        rules: final_rules,
        cache: final_cache,
        collaborators: final_collaborators,
    }
}

/// Validates rule integrity (empty fields, duplicate categories, regex compilation).
pub fn validate_rules(rules: &[PatternRule]) -> Result<()> {
    let mut seen_categories = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if !seen_categories.insert(rule.category) {
            errors.push(format!("Duplicate rule for category '{}'.", rule.category));
        }

        if rule.pattern.is_empty() {
            errors.push(format!(
                "Rule '{}' has an empty `pattern` field.",
                rule.category
            ));
            continue;
        }

        if let Err(e) = Regex::new(&rule.pattern) {
            errors.push(format!(
                "Rule '{}' has an invalid regex pattern: {}",
                rule.category, e
            ));
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

// shroud-core/src/lib.rs
//! # Shroud Core Library
//!
//! `shroud-core` provides the fundamental, platform-independent logic for PII
//! detection and masking. It layers three detection tiers over a piece of
//! text: a declarative regex rule table, named-entity recognition, and
//! generative verification, then rewrites the text with category placeholders
//! and memoizes the result.
//!
//! The library owns no model runtimes. The generative and entity tiers talk
//! to external backends through the `GenerativeVerifier` and
//! `EntityRecognizer` traits, and a pipeline built without backends simply
//! runs pattern-only.
//!
//! ## Modules
//!
//! * `config`: Defines `PatternRule`s and `MaskingConfig` for specifying sensitive patterns.
//! * `patterns`: Compiles the rule table and runs pattern-tier detection.
//! * `validators`: Provides programmatic validation for specific data types.
//! * `findings`: Defines finding categories, tiers, and the ordered `FindingSet` report.
//! * `collaborators`: Defines the `GenerativeVerifier` and `EntityRecognizer` traits.
//! * `providers`: HTTP-backed collaborator implementations (Ollama, spaCy-style NER).
//! * `detector`: Combines pattern and generative detection.
//! * `masker`: Locates finding fragments and rebuilds the masked text.
//! * `processor`: Coordinates a full detection-and-masking pass.
//! * `cache`: FIFO result cache keyed by input digest.
//! * `pipeline`: The `Shroud` facade tying everything together.
//!
//! ## Public API
//!
//! The public API provides a cohesive set of types and functions for
//! configuring and running a masking pipeline. Key components are organized
//! by functionality:
//!
//! **Configuration & Rules**
//!
//! * [`MaskingConfig`]: The top-level configuration, including the rule table.
//! * [`PatternRule`]: Defines a single pattern-tier detection rule.
//! * [`merge_rules`]: Merges default and user-defined configurations.
//! * [`MaskingConfig::load_from_file`]: Loads a configuration from a YAML file.
//! * [`MaskingConfig::load_default_rules`]: Loads the built-in rule table.
//!
//! **Pipeline**
//!
//! * [`Shroud`]: The masking facade; build it once, call [`Shroud::process_text`] per input.
//! * [`ProcessOutcome`]: Masked text, findings, and the outcome [`Source`].
//!
//! **Collaborators**
//!
//! * [`GenerativeVerifier`] / [`EntityRecognizer`]: Traits for external model backends.
//! * [`DisabledVerifier`] / [`DisabledRecognizer`]: Stand-ins for pattern-only pipelines.
//! * [`OllamaVerifier`] / [`SpacyRecognizer`]: HTTP implementations with startup health checks.
//!
//! **Findings**
//!
//! * [`FindingSet`]: Ordered category-to-fragments report; an empty category means
//!   "checked, found nothing", an absent one means "never consulted".
//! * [`Category`] / [`DetectionTier`]: The closed category set and its masking priorities.
//!
//! ## Usage Example
//!
//! ```rust
//! use shroud_core::{DisabledRecognizer, DisabledVerifier, MaskingConfig, Shroud, Source};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), shroud_core::ShroudError> {
//!     // 1. Load the default rule table.
//!     let config = MaskingConfig::load_default_rules()?;
//!
//!     // 2. Build a pattern-only pipeline (no external backends).
//!     let shroud = Shroud::with_collaborators(
//!         config,
//!         Arc::new(DisabledVerifier),
//!         Arc::new(DisabledRecognizer),
//!     )?;
//!
//!     // 3. Process some text.
//!     let outcome = shroud.process_text("Mail me at test@example.com", true);
//!     assert_eq!(outcome.masked_text, "Mail me at [EMAIL]");
//!     assert_eq!(outcome.source, Source::Processor);
//!
//!     // A byte-identical repeat is served from the cache.
//!     let again = shroud.process_text("Mail me at test@example.com", true);
//!     assert_eq!(again.source, Source::Cache);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Construction is fallible: invalid rules and unreachable configured
//! backends surface as [`ShroudError`]. Processing is not: once built,
//! [`Shroud::process_text`] always returns an outcome, degrading through
//! [`Source::Error`] rather than panicking.
//!
//! ## Design Principles
//!
//! * **Pluggable Backends:** The collaborator traits allow generative and NER
//!   backends to be swapped out seamlessly.
//! * **Graceful Degradation:** A collaborator that fails per call shrinks the
//!   findings instead of failing the run.
//! * **Deterministic:** For a fixed input and fixed collaborator responses,
//!   findings order and masked output never vary between runs.
//! * **Testable:** Every tier is unit-testable in isolation through the traits.
//!
//! ---
//! License: MIT OR Apache-2.0

// All modules must be declared before they can be used.
pub mod cache;
pub mod collaborators;
pub mod config;
pub mod detector;
pub mod errors;
pub mod findings;
pub mod masker;
pub mod patterns;
pub mod pipeline;
pub mod processor;
pub mod providers;
pub mod validators;

/// Re-exports the public configuration types and functions for managing pattern rules.
pub use config::{
    merge_rules,
    validate_rules,
    CacheConfig,
    CollaboratorConfig,
    MaskingConfig,
    PatternRule,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ShroudError;

/// Re-exports the collaborator traits and their disabled stand-ins.
pub use collaborators::{
    DisabledRecognizer,
    DisabledVerifier,
    EntityRecognizer,
    GenerativeVerifier,
    DEFAULT_MAX_TOKENS,
};

/// Re-exports the HTTP collaborator implementations.
pub use providers::{build_collaborators, OllamaVerifier, SpacyRecognizer};

/// Re-exports finding report types and sensitive data logging helpers.
pub use findings::{redact_sensitive, Category, DetectionTier, FindingSet, Span};

/// Re-exports the pipeline facade and its outcome types.
pub use pipeline::{ProcessOutcome, Shroud, Source};

/// Re-exports the result cache for callers that manage their own pipeline.
pub use cache::ResultCache;

// Re-export key types from the patterns::compiler module for advanced usage.
pub use patterns::compiler::{compile_patterns, CompiledPattern, CompiledPatterns};

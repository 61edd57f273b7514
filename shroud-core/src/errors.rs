//! errors.rs - Custom error types for the shroud-core library.
//!
//! The enum below covers every failure the library surfaces to callers:
//! construction-time rule problems, collaborator startup failures, and the
//! result cache lock. Per-call collaborator failures are not represented
//! here; those are ordinary `Result`s at the trait seams, consumed by the
//! degrade paths.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `shroud-core`.
///
/// The enum is `#[non_exhaustive]` so variants can be added in future
/// versions without breaking downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShroudError {
    #[error("Failed to compile detection rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Collaborator '{0}' is unavailable: {1}")]
    CollaboratorUnavailable(String, String),

    #[error("Result cache is unavailable: {0}")]
    CacheUnavailable(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

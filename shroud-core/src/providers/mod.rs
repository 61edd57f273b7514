// shroud-core/src/providers/mod.rs
//! HTTP-backed collaborator implementations.
//!
//! The model runtimes themselves live outside this crate: the generative
//! tier talks to an Ollama-compatible server and the entity tier to a small
//! NER microservice. Each provider health-checks its endpoint at
//! construction, so a misconfigured backend fails fast instead of silently
//! degrading every request.
//!
//! License: MIT OR APACHE 2.0

pub mod ollama;
pub mod spacy;

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::collaborators::{DisabledRecognizer, DisabledVerifier, EntityRecognizer, GenerativeVerifier};
use crate::config::CollaboratorConfig;
use crate::errors::ShroudError;

pub use ollama::OllamaVerifier;
pub use spacy::SpacyRecognizer;

/// Request timeout applied when the configuration does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Builds the collaborator pair described by `config`.
///
/// An unset URL yields the corresponding disabled collaborator; a set URL
/// whose backend fails its health check is a fatal
/// [`ShroudError::CollaboratorUnavailable`].
pub fn build_collaborators(
    config: &CollaboratorConfig,
) -> Result<(Arc<dyn GenerativeVerifier>, Arc<dyn EntityRecognizer>), ShroudError> {
    let timeout = Duration::from_secs(config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS));

    let verifier: Arc<dyn GenerativeVerifier> = match &config.llm_url {
        Some(url) => {
            let verifier = OllamaVerifier::new(url, config.llm_model.clone(), timeout)?;
            info!("Generative tier enabled via {}", url);
            Arc::new(verifier)
        }
        None => {
            info!("No generative backend configured; generative tier disabled.");
            Arc::new(DisabledVerifier)
        }
    };

    let recognizer: Arc<dyn EntityRecognizer> = match &config.ner_url {
        Some(url) => {
            let recognizer = SpacyRecognizer::new(url, timeout)?;
            info!("Entity tier enabled via {}", url);
            Arc::new(recognizer)
        }
        None => {
            info!("No NER backend configured; entity tier disabled.");
            Arc::new(DisabledRecognizer)
        }
    };

    Ok((verifier, recognizer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_urls_yield_disabled_collaborators() {
        let config = CollaboratorConfig::default();
        let (verifier, recognizer) = build_collaborators(&config).expect("build");

        assert_eq!(verifier.get_completion("x", 10).unwrap(), None);
        assert!(recognizer.extract_entities("x").unwrap().is_empty());
    }

    #[test]
    fn test_unreachable_llm_backend_is_fatal() {
        let config = CollaboratorConfig {
            llm_url: Some("http://127.0.0.1:1".to_string()),
            timeout_seconds: Some(1),
            ..CollaboratorConfig::default()
        };

        let err = build_collaborators(&config).err().expect("expected a fatal error");
        assert!(matches!(err, ShroudError::CollaboratorUnavailable(name, _) if name == "generative"));
    }

    #[test]
    fn test_unreachable_ner_backend_is_fatal() {
        let config = CollaboratorConfig {
            ner_url: Some("http://127.0.0.1:1".to_string()),
            timeout_seconds: Some(1),
            ..CollaboratorConfig::default()
        };

        let err = build_collaborators(&config).err().expect("expected a fatal error");
        assert!(matches!(err, ShroudError::CollaboratorUnavailable(name, _) if name == "entity"));
    }
}

// shroud-core/tests/pipeline_integration_tests.rs
//! End-to-end coverage of the `Shroud` facade: masking, ordering, cache
//! behavior, degradation, and the never-fail contract.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use shroud_core::{
    Category, DisabledRecognizer, DisabledVerifier, EntityRecognizer, GenerativeVerifier,
    MaskingConfig, ShroudError, Shroud, Source,
};

struct StaticVerifier(Option<Vec<String>>);

impl GenerativeVerifier for StaticVerifier {
    fn get_completion(&self, _prompt: &str, _max_tokens: usize) -> Result<Option<Vec<String>>> {
        Ok(self.0.clone())
    }
}

struct FailingVerifier;

impl GenerativeVerifier for FailingVerifier {
    fn get_completion(&self, _prompt: &str, _max_tokens: usize) -> Result<Option<Vec<String>>> {
        Err(anyhow!("generative backend offline"))
    }
}

struct StaticRecognizer(HashMap<String, Vec<String>>);

impl EntityRecognizer for StaticRecognizer {
    fn extract_entities(&self, _text: &str) -> Result<HashMap<String, Vec<String>>> {
        Ok(self.0.clone())
    }
}

struct FailingRecognizer;

impl EntityRecognizer for FailingRecognizer {
    fn extract_entities(&self, _text: &str) -> Result<HashMap<String, Vec<String>>> {
        Err(anyhow!("NER backend offline"))
    }
}

fn person_recognizer(names: &[&str]) -> Arc<StaticRecognizer> {
    let mut entities = HashMap::new();
    entities.insert(
        "PERSON".to_string(),
        names.iter().map(|n| n.to_string()).collect(),
    );
    Arc::new(StaticRecognizer(entities))
}

fn pipeline(
    verifier: Arc<dyn GenerativeVerifier>,
    recognizer: Arc<dyn EntityRecognizer>,
) -> Shroud {
    let config = MaskingConfig::load_default_rules().expect("default rules");
    Shroud::with_collaborators(config, verifier, recognizer).expect("pipeline")
}

#[test]
fn test_end_to_end_masking_example() {
    let shroud = pipeline(Arc::new(DisabledVerifier), person_recognizer(&["John Doe"]));

    let outcome = shroud.process_text(
        "Contact John Doe at john.doe@email.com or 123-456-7890",
        true,
    );

    assert_eq!(outcome.masked_text, "Contact [PERSON] at [EMAIL] or [PHONE]");
    assert_eq!(outcome.source, Source::Processor);
    assert_eq!(
        outcome.findings.get(Category::Email),
        Some(&["john.doe@email.com".to_string()][..])
    );
    assert_eq!(
        outcome.findings.get(Category::Phone),
        Some(&["123-456-7890".to_string()][..])
    );
    assert_eq!(
        outcome.findings.get(Category::Person),
        Some(&["John Doe".to_string()][..])
    );
    // Checked but clean categories stay present as empty lists.
    assert_eq!(outcome.findings.get(Category::Ssn), Some(&[][..]));
    assert_eq!(outcome.findings.get(Category::CreditCard), Some(&[][..]));
    assert_eq!(outcome.findings.get(Category::Address), Some(&[][..]));
}

#[test]
fn test_masking_its_own_output_is_a_no_op() {
    let shroud = pipeline(Arc::new(DisabledVerifier), person_recognizer(&["John Doe"]));

    let first = shroud.process_text(
        "Contact John Doe at john.doe@email.com or 123-456-7890",
        false,
    );
    let second = shroud.process_text(&first.masked_text, false);

    // No placeholder carries digits or an '@', and the recognizer's fragment
    // no longer occurs literally, so nothing is masked twice.
    assert_eq!(first.masked_text, "Contact [PERSON] at [EMAIL] or [PHONE]");
    assert_eq!(second.masked_text, first.masked_text);
}

#[test]
fn test_placeholder_bearing_input_passes_through() {
    let shroud = pipeline(Arc::new(DisabledVerifier), Arc::new(DisabledRecognizer));

    let outcome = shroud.process_text("Reach [PERSON] at [EMAIL]", true);
    assert_eq!(outcome.masked_text, "Reach [PERSON] at [EMAIL]");
    assert_eq!(outcome.findings.fragment_count(), 0);
}

#[test]
fn test_findings_json_keeps_order_and_empty_categories() {
    let shroud = pipeline(Arc::new(DisabledVerifier), Arc::new(DisabledRecognizer));
    let outcome = shroud.process_text("mail a@b.com", true);

    let json = serde_json::to_string(&outcome.findings).expect("serialize");
    assert_eq!(
        json,
        r#"{"email":["a@b.com"],"phone":[],"ssn":[],"credit_card":[],"address":[]}"#
    );
}

#[test]
fn test_llm_detected_appears_only_when_flagged() {
    let flagged = pipeline(
        Arc::new(StaticVerifier(Some(vec!["project mercury".to_string()]))),
        Arc::new(DisabledRecognizer),
    );
    let outcome = flagged.process_text("project mercury is classified", true);
    assert_eq!(
        outcome.findings.get(Category::LlmDetected),
        Some(&["project mercury".to_string()][..])
    );
    assert_eq!(
        outcome.masked_text,
        "[LLM_DETECTED] is classified"
    );

    let clean = pipeline(
        Arc::new(StaticVerifier(Some(vec![]))),
        Arc::new(DisabledRecognizer),
    );
    let outcome = clean.process_text("project mercury is classified", true);
    assert!(!outcome.findings.contains(Category::LlmDetected));
}

#[test]
fn test_unlocatable_generative_fragment_stays_in_findings() {
    let shroud = pipeline(
        Arc::new(StaticVerifier(Some(vec!["a paraphrase".to_string()]))),
        Arc::new(DisabledRecognizer),
    );

    let outcome = shroud.process_text("nothing literal here", true);
    assert_eq!(outcome.masked_text, "nothing literal here");
    assert_eq!(
        outcome.findings.get(Category::LlmDetected),
        Some(&["a paraphrase".to_string()][..])
    );
}

#[test_log::test]
fn test_generative_failure_degrades_not_fails() {
    let shroud = pipeline(Arc::new(FailingVerifier), Arc::new(DisabledRecognizer));

    let outcome = shroud.process_text("mail a@b.com", true);
    assert_eq!(outcome.source, Source::Processor);
    assert_eq!(outcome.masked_text, "mail [EMAIL]");
    assert!(!outcome.findings.contains(Category::LlmDetected));
}

#[test_log::test]
fn test_recognizer_failure_degrades_not_fails() {
    let shroud = pipeline(Arc::new(DisabledVerifier), Arc::new(FailingRecognizer));

    let outcome = shroud.process_text("mail a@b.com", true);
    assert_eq!(outcome.source, Source::Processor);
    assert_eq!(outcome.masked_text, "mail [EMAIL]");
    assert!(!outcome.findings.contains(Category::Person));
}

#[test]
fn test_repeat_input_is_served_from_cache() {
    let shroud = pipeline(Arc::new(DisabledVerifier), person_recognizer(&["Ada"]));

    let first = shroud.process_text("Ada wrote a@b.com", true);
    let second = shroud.process_text("Ada wrote a@b.com", true);

    assert_eq!(first.source, Source::Processor);
    assert_eq!(second.source, Source::Cache);
    assert_eq!(second.masked_text, first.masked_text);
    assert_eq!(second.findings, first.findings);
}

#[test]
fn test_cache_bypass_neither_reads_nor_writes() {
    let shroud = pipeline(Arc::new(DisabledVerifier), Arc::new(DisabledRecognizer));

    // Prime the cache, then bypass it.
    let primed = shroud.process_text("mail a@b.com", true);
    assert_eq!(primed.source, Source::Processor);

    let bypassed = shroud.process_text("mail a@b.com", false);
    assert_eq!(bypassed.source, Source::Processor);

    // A bypassed run for new text must not populate the cache either.
    let fresh = shroud.process_text("call 555-123-4567", false);
    assert_eq!(fresh.source, Source::Processor);
    let after = shroud.process_text("call 555-123-4567", true);
    assert_eq!(after.source, Source::Processor);
}

#[test]
fn test_cache_distinguishes_byte_different_inputs() {
    let shroud = pipeline(Arc::new(DisabledVerifier), Arc::new(DisabledRecognizer));

    shroud.process_text("mail a@b.com", true);
    let variant = shroud.process_text("mail a@b.com ", true);
    assert_eq!(variant.source, Source::Processor);
}

#[test]
fn test_pattern_tier_beats_entity_tier_end_to_end() {
    let mut entities = HashMap::new();
    entities.insert("PERSON".to_string(), vec!["john.doe".to_string()]);
    let shroud = pipeline(
        Arc::new(DisabledVerifier),
        Arc::new(StaticRecognizer(entities)),
    );

    let outcome = shroud.process_text("mail john.doe@example.com now", true);
    assert_eq!(outcome.masked_text, "mail [EMAIL] now");
    // The losing fragment still appears in the findings report.
    assert_eq!(
        outcome.findings.get(Category::Person),
        Some(&["john.doe".to_string()][..])
    );
}

#[test]
fn test_identical_pipelines_produce_identical_outcomes() {
    let input = "Contact John Doe at john.doe@email.com or 123-456-7890";

    let a = pipeline(Arc::new(DisabledVerifier), person_recognizer(&["John Doe"]))
        .process_text(input, false);
    let b = pipeline(Arc::new(DisabledVerifier), person_recognizer(&["John Doe"]))
        .process_text(input, false);

    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a.findings).unwrap(),
        serde_json::to_string(&b.findings).unwrap()
    );
}

#[test]
fn test_construction_fails_for_unreachable_ner_backend() {
    let mut config = MaskingConfig::load_default_rules().expect("default rules");
    config.collaborators.ner_url = Some("http://127.0.0.1:1".to_string());
    config.collaborators.timeout_seconds = Some(1);

    let err = Shroud::new(config).err().expect("expected a fatal error");
    assert!(matches!(
        err,
        ShroudError::CollaboratorUnavailable(name, _) if name == "entity"
    ));
}

#[test]
fn test_construction_fails_for_uncompilable_rule() {
    let mut config = MaskingConfig::load_default_rules().expect("default rules");
    config.rules[0].pattern = "([unclosed".to_string();

    let err = Shroud::with_collaborators(
        config,
        Arc::new(DisabledVerifier),
        Arc::new(DisabledRecognizer),
    )
    .err()
    .expect("expected a fatal error");
    assert!(err.to_string().contains("Failed to compile"));
}

#[test]
fn test_outcome_serializes_for_reports() {
    let shroud = pipeline(Arc::new(DisabledVerifier), Arc::new(DisabledRecognizer));
    let outcome = shroud.process_text("mail a@b.com", true);

    let json = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(json["source"], "processor");
    assert_eq!(json["masked_text"], "mail [EMAIL]");
    assert_eq!(json["findings"]["email"][0], "a@b.com");
}

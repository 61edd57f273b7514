// shroud-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use shroud_core::config::{self, CacheConfig, CollaboratorConfig, MaskingConfig, PatternRule};
use shroud_core::Category;

fn rule(category: Category, pattern: &str) -> PatternRule {
    PatternRule {
        category,
        description: None,
        pattern: pattern.to_string(),
        enabled: None,
        programmatic_validation: false,
    }
}

#[test]
fn test_load_default_rules() {
    let config = MaskingConfig::load_default_rules().unwrap();

    let categories: Vec<Category> = config.rules.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Email,
            Category::Phone,
            Category::Ssn,
            Category::CreditCard,
            Category::Address,
        ]
    );

    for rule in &config.rules {
        assert!(rule.is_enabled(), "rule '{}' should default on", rule.category);
        assert!(
            !rule.programmatic_validation,
            "rule '{}' should ship without programmatic validation",
            rule.category
        );
    }

    assert_eq!(config.cache.max_entries, Some(1000));
    assert_eq!(config.cache.ttl_seconds, Some(3600));
    assert_eq!(config.collaborators, CollaboratorConfig::default());
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - category: email
    pattern: "custom-email-pattern"
    description: "A test rule"
    programmatic_validation: true
cache:
  max_entries: 5
  ttl_seconds: 60
collaborators:
  llm_url: "http://localhost:11434"
  llm_model: "mistral"
  timeout_seconds: 3
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = MaskingConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].category, Category::Email);
    assert_eq!(config.rules[0].pattern, "custom-email-pattern");
    assert!(config.rules[0].programmatic_validation);
    assert_eq!(config.cache.max_entries, Some(5));
    assert_eq!(config.cache.ttl_seconds, Some(60));
    assert_eq!(
        config.collaborators.llm_url.as_deref(),
        Some("http://localhost:11434")
    );
    assert_eq!(config.collaborators.llm_model.as_deref(), Some("mistral"));
    assert_eq!(config.collaborators.ner_url, None);
    assert_eq!(config.collaborators.timeout_seconds, Some(3));
    Ok(())
}

#[test]
fn test_load_from_file_field_defaults() -> Result<()> {
    let yaml_content = r#"
rules:
  - category: phone
    pattern: "another"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = MaskingConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    let rule = &config.rules[0];
    assert_eq!(rule.category, Category::Phone);
    assert!(rule.is_enabled());
    assert!(!rule.programmatic_validation);
    assert_eq!(rule.description, None);
    assert_eq!(config.cache, CacheConfig::default());
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_regex() -> Result<()> {
    let yaml_content = r#"
rules:
  - category: email
    pattern: "([unclosed"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let err = MaskingConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Rule validation failed"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_duplicate_categories() -> Result<()> {
    let yaml_content = r#"
rules:
  - category: email
    pattern: "one"
  - category: email
    pattern: "two"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let err = MaskingConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate rule for category 'email'"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_category() -> Result<()> {
    let yaml_content = r#"
rules:
  - category: passport
    pattern: "x"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    assert!(MaskingConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = MaskingConfig {
        rules: vec![rule(Category::Email, "default-pattern")],
        cache: CacheConfig::default(),
        collaborators: CollaboratorConfig::default(),
    };

    let merged = config::merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_rules_override_keeps_table_position() {
    let default_config = MaskingConfig::load_default_rules().unwrap();
    let user_config = MaskingConfig {
        rules: vec![PatternRule {
            programmatic_validation: true,
            ..rule(Category::Ssn, r"\d{3}-\d{2}-\d{4}")
        }],
        cache: CacheConfig::default(),
        collaborators: CollaboratorConfig::default(),
    };

    let merged = config::merge_rules(default_config, Some(user_config));
    assert_eq!(merged.rules.len(), 5);
    // The override lands where the default ssn rule sat, not at the end.
    assert_eq!(merged.rules[2].category, Category::Ssn);
    assert_eq!(merged.rules[2].pattern, r"\d{3}-\d{2}-\d{4}");
    assert!(merged.rules[2].programmatic_validation);
}

#[test]
fn test_merge_rules_appends_new_categories_in_user_order() {
    let default_config = MaskingConfig::load_default_rules().unwrap();
    let user_config = MaskingConfig {
        rules: vec![
            rule(Category::Person, "Mr\\. [A-Z][a-z]+"),
            rule(Category::Org, "[A-Z][a-z]+ Inc\\."),
        ],
        cache: CacheConfig::default(),
        collaborators: CollaboratorConfig::default(),
    };

    let merged = config::merge_rules(default_config, Some(user_config));
    assert_eq!(merged.rules.len(), 7);
    assert_eq!(merged.rules[5].category, Category::Person);
    assert_eq!(merged.rules[6].category, Category::Org);
}

#[test]
fn test_merge_rules_overrides_cache_and_collaborators() {
    let default_config = MaskingConfig::load_default_rules().unwrap();
    let user_config = MaskingConfig {
        rules: vec![],
        cache: CacheConfig {
            max_entries: Some(10),
            ttl_seconds: None,
        },
        collaborators: CollaboratorConfig {
            ner_url: Some("http://localhost:8080".to_string()),
            ..CollaboratorConfig::default()
        },
    };

    let merged = config::merge_rules(default_config, Some(user_config));
    assert_eq!(merged.cache.max_entries, Some(10));
    // Unset user fields keep the default values.
    assert_eq!(merged.cache.ttl_seconds, Some(3600));
    assert_eq!(
        merged.collaborators.ner_url.as_deref(),
        Some("http://localhost:8080")
    );
    assert_eq!(merged.collaborators.llm_url, None);
}

#[test]
fn test_validate_rules_rejects_empty_pattern() {
    let rules = vec![rule(Category::Email, "")];
    let err = config::validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("empty `pattern` field"));
}

#[test]
fn test_validate_rules_accepts_default_table() {
    let config = MaskingConfig::load_default_rules().unwrap();
    assert!(config::validate_rules(&config.rules).is_ok());
}

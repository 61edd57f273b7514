// shroud-core/src/findings.rs
//! Core data structures for detection results: finding categories, detection
//! tiers, ordered finding sets, and the utilities that keep sensitive values
//! out of debug logs.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use lazy_static::lazy_static;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("SHROUD_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// The detection layer a finding category belongs to.
///
/// Ordering is ascending by masking priority: when two overlapping fragments
/// compete for the same stretch of text, the higher tier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionTier {
    Generative,
    Entity,
    Pattern,
}

/// Every category of sensitive information the pipeline can report.
///
/// The set is closed on purpose: placeholders, tiers, and report keys are all
/// derived from the category, so an unknown category cannot reach the masker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    Phone,
    Ssn,
    CreditCard,
    Address,
    LlmDetected,
    Person,
    Org,
    Gpe,
    Date,
}

impl Category {
    /// The stable snake_case name used as the report key and config identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::Phone => "phone",
            Category::Ssn => "ssn",
            Category::CreditCard => "credit_card",
            Category::Address => "address",
            Category::LlmDetected => "llm_detected",
            Category::Person => "person",
            Category::Org => "org",
            Category::Gpe => "gpe",
            Category::Date => "date",
        }
    }

    /// The replacement token written into masked text for this category.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Category::Email => "[EMAIL]",
            Category::Phone => "[PHONE]",
            Category::Ssn => "[SSN]",
            Category::CreditCard => "[CREDIT_CARD]",
            Category::Address => "[ADDRESS]",
            Category::LlmDetected => "[LLM_DETECTED]",
            Category::Person => "[PERSON]",
            Category::Org => "[ORG]",
            Category::Gpe => "[GPE]",
            Category::Date => "[DATE]",
        }
    }

    pub fn tier(&self) -> DetectionTier {
        match self {
            Category::Email
            | Category::Phone
            | Category::Ssn
            | Category::CreditCard
            | Category::Address => DetectionTier::Pattern,
            Category::LlmDetected => DetectionTier::Generative,
            Category::Person | Category::Org | Category::Gpe | Category::Date => {
                DetectionTier::Entity
            }
        }
    }

    /// Parses a snake_case category name (config files, reports).
    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "email" => Some(Category::Email),
            "phone" => Some(Category::Phone),
            "ssn" => Some(Category::Ssn),
            "credit_card" => Some(Category::CreditCard),
            "address" => Some(Category::Address),
            "llm_detected" => Some(Category::LlmDetected),
            "person" => Some(Category::Person),
            "org" => Some(Category::Org),
            "gpe" => Some(Category::Gpe),
            "date" => Some(Category::Date),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered collection of findings: category to matched fragments.
///
/// Insertion order is preserved all the way through serialization, and a
/// category that detected nothing is distinct from a category that was never
/// consulted. Pattern categories are therefore always present (possibly
/// empty), while `llm_detected` and entity categories appear only when they
/// produced values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindingSet {
    entries: Vec<(Category, Vec<String>)>,
}

impl FindingSet {
    pub fn new() -> Self {
        FindingSet { entries: Vec::new() }
    }

    /// Inserts `values` under `category`, replacing any previous entry while
    /// keeping the category's original position.
    pub fn insert(&mut self, category: Category, values: Vec<String>) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((category, values)),
        }
    }

    /// Appends `values` under `category`, extending an existing entry rather
    /// than replacing it.
    pub fn append(&mut self, category: Category, values: Vec<String>) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => existing.extend(values),
            None => self.entries.push((category, values)),
        }
    }

    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, category: Category) -> bool {
        self.entries.iter().any(|(c, _)| *c == category)
    }

    /// Number of categories present (including empty ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of matched fragments across all categories.
    pub fn fragment_count(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.entries
            .iter()
            .map(|(category, values)| (*category, values.as_slice()))
    }
}

impl Serialize for FindingSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, values) in &self.entries {
            map.serialize_entry(category.name(), values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FindingSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FindingSetVisitor;

        impl<'de> Visitor<'de> for FindingSetVisitor {
            type Value = FindingSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to matched fragments")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = FindingSet::new();
                while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
                    let category = Category::from_name(&key).ok_or_else(|| {
                        de::Error::custom(format!("unknown finding category '{key}'"))
                    })?;
                    set.insert(category, values);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(FindingSetVisitor)
    }
}

/// A half-open byte range `[start, end)` in the source text, tagged with the
/// category whose placeholder should replace it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub category: Category,
}

impl Span {
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Converts raw entity maps from an `EntityRecognizer` into typed findings,
/// keeping only the relevant labels and iterating them in a fixed order so
/// results never depend on `HashMap` iteration.
pub fn relevant_entities(raw: &HashMap<String, Vec<String>>) -> Vec<(Category, Vec<String>)> {
    const RELEVANT: [(&str, Category); 4] = [
        ("PERSON", Category::Person),
        ("ORG", Category::Org),
        ("GPE", Category::Gpe),
        ("DATE", Category::Date),
    ];

    let mut relevant = Vec::new();
    for (label, category) in RELEVANT {
        if let Some(values) = raw.get(label) {
            if !values.is_empty() {
                relevant.push((category, values.clone()));
            }
        }
    }
    relevant
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_finding_debug(module_path: &str, category: Category, original_sensitive_content: &str) {
    debug!(
        "{} Captured finding for category '{}': '{}'",
        module_path,
        category,
        get_loggable_content(original_sensitive_content)
    );
}

pub fn log_mask_action_debug(
    module_path: &str,
    original_sensitive_content: &str,
    placeholder: &str,
    category: Category,
) {
    debug!(
        "{} Mask action: Original='{}', Masked='{}' for category '{}'",
        module_path,
        get_loggable_content(original_sensitive_content),
        placeholder,
        category
    );
}

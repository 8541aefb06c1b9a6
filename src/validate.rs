//! Structural validation of content records.
//!
//! Validation reports data-integrity defects; it never fails a lookup.
//! Errors must be fixed before publish, warnings are editorial advice.
//! Dangling cross-references are warnings so a consumer can render a
//! broken link instead of rejecting the record.

use crate::domain::{ContentLevel, ContentStatus, EducationalContent, MAX_LEVEL};
use crate::store::Store;

/// How serious a validation finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must be fixed before publish
    Error,

    /// Should be reviewed
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One validation finding for a record
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Id of the record the finding is about
    pub content_id: String,

    /// Error or warning
    pub severity: Severity,

    /// Check family (mirrors the editorial checklist)
    pub category: &'static str,

    /// Human-readable description
    pub message: String,
}

impl ValidationIssue {
    fn error(content_id: &str, category: &'static str, message: impl Into<String>) -> Self {
        Self {
            content_id: content_id.to_string(),
            severity: Severity::Error,
            category,
            message: message.into(),
        }
    }

    fn warning(content_id: &str, category: &'static str, message: impl Into<String>) -> Self {
        Self {
            content_id: content_id.to_string(),
            severity: Severity::Warning,
            category,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.content_id, self.category, self.message
        )
    }
}

const CATEGORY_INTERFACE: &str = "Interface Compliance";
const CATEGORY_LEVEL: &str = "Level Content";
const CATEGORY_QUALITY: &str = "Content Quality";
const CATEGORY_CITATIONS: &str = "Citations";
const CATEGORY_CROSS_REFS: &str = "Cross References";

/// Prose that marks a record as unfinished
const PLACEHOLDER_MARKERS: &[&str] = &["TODO", "FIXME", "PLACEHOLDER", "LOREM IPSUM"];

fn contains_placeholder(text: &str) -> bool {
    let upper = text.to_uppercase();
    PLACEHOLDER_MARKERS.iter().any(|m| upper.contains(m))
}

fn is_kebab_case(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && !id.contains("--")
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate the structural invariants of one record
pub fn validate_record(record: &EducationalContent) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let id = record.id.as_str();

    // Identifier
    if record.id.is_empty() {
        issues.push(ValidationIssue::error(id, CATEGORY_INTERFACE, "Empty id"));
    } else if !is_kebab_case(&record.id) {
        issues.push(ValidationIssue::error(
            id,
            CATEGORY_INTERFACE,
            format!("Id is not kebab-case: {}", record.id),
        ));
    } else {
        let expected_prefix = format!("{}-", record.content_type);
        if !record.id.starts_with(&expected_prefix) {
            issues.push(ValidationIssue::warning(
                id,
                CATEGORY_INTERFACE,
                format!("Id does not carry the '{}' prefix", expected_prefix),
            ));
        }
    }

    // Names
    if record.name.trim().is_empty() {
        issues.push(ValidationIssue::error(id, CATEGORY_INTERFACE, "Empty name"));
    } else if contains_placeholder(&record.name) {
        issues.push(ValidationIssue::error(
            id,
            CATEGORY_QUALITY,
            format!("Name contains placeholder text: {}", record.name),
        ));
    }

    match &record.name_es {
        None => issues.push(ValidationIssue::warning(
            id,
            CATEGORY_QUALITY,
            "Missing Spanish translation (nameEs)",
        )),
        Some(name_es) if contains_placeholder(name_es) => {
            issues.push(ValidationIssue::error(
                id,
                CATEGORY_QUALITY,
                format!("Spanish name contains placeholder text: {}", name_es),
            ));
        }
        Some(_) => {}
    }

    // Levels
    if record.levels.is_empty() {
        issues.push(ValidationIssue::error(
            id,
            CATEGORY_INTERFACE,
            "Record has no levels",
        ));
    } else {
        for (position, (&key, level)) in record.levels.iter().enumerate() {
            let expected = position as u8 + 1;
            if key != expected {
                issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_INTERFACE,
                    format!(
                        "Level keys are not contiguous from 1: expected {}, found {}",
                        expected, key
                    ),
                ));
            }
            if key > MAX_LEVEL {
                issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_INTERFACE,
                    format!("Level key {} exceeds maximum of {}", key, MAX_LEVEL),
                ));
            }
            if level.level != key {
                issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_INTERFACE,
                    format!(
                        "Level {} declares mismatched level number {}",
                        key, level.level
                    ),
                ));
            }
            issues.extend(validate_level(id, key, level));
        }

        if record.status == ContentStatus::Published && record.levels.len() < MAX_LEVEL as usize {
            issues.push(ValidationIssue::warning(
                id,
                CATEGORY_LEVEL,
                format!(
                    "Published record has {} of {} levels",
                    record.levels.len(),
                    MAX_LEVEL
                ),
            ));
        }
    }

    // Citations
    if record.citations.is_empty() {
        issues.push(ValidationIssue::warning(
            id,
            CATEGORY_CITATIONS,
            "Record has no citations",
        ));
    }
    for citation in &record.citations {
        if let Some(url) = &citation.url {
            match reqwest::Url::parse(url) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                Ok(parsed) => issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_CITATIONS,
                    format!(
                        "Citation '{}' has non-http(s) url scheme: {}",
                        citation.id,
                        parsed.scheme()
                    ),
                )),
                Err(e) => issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_CITATIONS,
                    format!("Citation '{}' has malformed url: {}", citation.id, e),
                )),
            }
        }
    }

    // Revision metadata
    if record.version == 0 {
        issues.push(ValidationIssue::error(
            id,
            CATEGORY_INTERFACE,
            "Version must start at 1",
        ));
    }
    if record.updated_at < record.created_at {
        issues.push(ValidationIssue::warning(
            id,
            CATEGORY_INTERFACE,
            "updatedAt is earlier than createdAt",
        ));
    }

    issues
}

/// Validate one explanation level
fn validate_level(id: &str, key: u8, level: &ContentLevel) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if level.summary.trim().is_empty() {
        issues.push(ValidationIssue::error(
            id,
            CATEGORY_LEVEL,
            format!("Level {}: missing or empty summary", key),
        ));
    }
    if level.explanation.trim().is_empty() {
        issues.push(ValidationIssue::error(
            id,
            CATEGORY_LEVEL,
            format!("Level {}: missing or empty explanation", key),
        ));
    }

    for text in [&level.summary, &level.explanation] {
        if contains_placeholder(text) {
            issues.push(ValidationIssue::error(
                id,
                CATEGORY_QUALITY,
                format!("Level {}: contains placeholder text", key),
            ));
            break;
        }
    }
    if let Some(notes) = &level.clinical_notes {
        if contains_placeholder(notes) {
            issues.push(ValidationIssue::error(
                id,
                CATEGORY_QUALITY,
                format!("Level {}: clinical notes contain placeholder text", key),
            ));
        }
    }

    if level.key_terms.is_empty() {
        issues.push(ValidationIssue::warning(
            id,
            CATEGORY_LEVEL,
            format!("Level {}: no key terms", key),
        ));
    } else {
        let mut seen = std::collections::HashSet::new();
        for (i, term) in level.key_terms.iter().enumerate() {
            if term.term.trim().is_empty() {
                issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_LEVEL,
                    format!("Level {}: key term {} has empty term", key, i + 1),
                ));
            }
            if term.definition.trim().is_empty() {
                issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_LEVEL,
                    format!("Level {}: key term \"{}\" has empty definition", key, term.term),
                ));
            }
            if contains_placeholder(&term.term) || contains_placeholder(&term.definition) {
                issues.push(ValidationIssue::error(
                    id,
                    CATEGORY_QUALITY,
                    format!(
                        "Level {}: key term \"{}\" contains placeholder text",
                        key, term.term
                    ),
                ));
            }
            if !seen.insert(term.term.to_lowercase()) {
                issues.push(ValidationIssue::warning(
                    id,
                    CATEGORY_LEVEL,
                    format!("Level {}: duplicate key term \"{}\"", key, term.term),
                ));
            }
        }
    }

    issues
}

/// Validate every record in a store, plus cross-record invariants.
///
/// Id uniqueness is enforced at store construction, so the corpus pass
/// covers per-record checks and cross-reference resolution.
pub fn validate_corpus(store: &Store) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for record in store.iter() {
        issues.extend(validate_record(record));

        for reference in &record.cross_references {
            if reference.target_id == record.id {
                issues.push(ValidationIssue::warning(
                    &record.id,
                    CATEGORY_CROSS_REFS,
                    "Record cross-references itself",
                ));
            } else if store.get_by_id(&reference.target_id).is_none() {
                issues.push(ValidationIssue::warning(
                    &record.id,
                    CATEGORY_CROSS_REFS,
                    format!("Dangling cross-reference to '{}'", reference.target_id),
                ));
            }
        }
    }

    issues
}

/// Whether a set of findings contains any error
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Citation, CitationType, ClinicalRelevance, ContentTags, ContentType, KeyTerm,
    };
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn level(key: u8) -> ContentLevel {
        ContentLevel {
            level: key,
            summary: "A summary.".to_string(),
            explanation: "An explanation.".to_string(),
            key_terms: vec![KeyTerm {
                term: "term".to_string(),
                definition: "definition".to_string(),
                pronunciation: None,
            }],
            analogies: None,
            examples: None,
            patient_counseling_points: None,
            clinical_notes: None,
        }
    }

    fn record() -> EducationalContent {
        let mut levels = BTreeMap::new();
        for k in 1..=5 {
            levels.insert(k, level(k));
        }

        EducationalContent {
            id: "topic-test-record".to_string(),
            content_type: ContentType::Topic,
            name: "Test Record".to_string(),
            name_es: Some("Registro de Prueba".to_string()),
            alternate_names: Vec::new(),
            levels,
            media: Vec::new(),
            citations: vec![Citation {
                id: "src-1".to_string(),
                citation_type: CitationType::Website,
                title: "A Source".to_string(),
                authors: None,
                source: "An Org".to_string(),
                url: Some("https://example.org/source".to_string()),
                accessed_date: None,
            }],
            cross_references: Vec::new(),
            tags: ContentTags {
                systems: vec!["healthcare-navigation".to_string()],
                topics: Vec::new(),
                keywords: Vec::new(),
                clinical_relevance: ClinicalRelevance::Medium,
                exam_relevance: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
            version: 1,
            status: ContentStatus::Published,
        }
    }

    #[test]
    fn test_clean_record_passes() {
        let issues = validate_record(&record());
        assert!(!has_errors(&issues), "unexpected errors: {:?}", issues);
    }

    #[test]
    fn test_blank_summary_is_error() {
        let mut r = record();
        r.levels.get_mut(&2).unwrap().summary = "   ".to_string();

        let issues = validate_record(&r);
        assert!(has_errors(&issues));
        assert!(issues
            .iter()
            .any(|i| i.message.contains("Level 2") && i.message.contains("summary")));
    }

    #[test]
    fn test_mismatched_level_number_is_error() {
        let mut r = record();
        r.levels.get_mut(&3).unwrap().level = 4;

        let issues = validate_record(&r);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("mismatched")));
    }

    #[test]
    fn test_gap_in_levels_is_error() {
        let mut r = record();
        r.levels.remove(&2);

        let issues = validate_record(&r);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("contiguous")));
    }

    #[test]
    fn test_placeholder_text_is_error() {
        let mut r = record();
        r.levels.get_mut(&1).unwrap().explanation = "TODO: write this".to_string();

        let issues = validate_record(&r);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.category == "Content Quality"));
    }

    #[test]
    fn test_malformed_citation_url_is_error() {
        let mut r = record();
        r.citations[0].url = Some("not a url".to_string());

        let issues = validate_record(&r);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("malformed url")));
    }

    #[test]
    fn test_non_kebab_id_is_error() {
        let mut r = record();
        r.id = "Topic_Test".to_string();

        let issues = validate_record(&r);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("kebab-case")));
    }

    #[test]
    fn test_missing_name_es_is_warning() {
        let mut r = record();
        r.name_es = None;

        let issues = validate_record(&r);
        assert!(!has_errors(&issues));
        assert!(issues.iter().any(|i| i.message.contains("nameEs")));
    }

    #[test]
    fn test_dangling_cross_reference_is_warning() {
        use crate::domain::{CrossReference, Relationship};
        use crate::store::Store;

        let mut r = record();
        r.cross_references.push(CrossReference {
            target_id: "topic-missing".to_string(),
            target_type: ContentType::Topic,
            relationship: Relationship::Related,
            label: "Missing".to_string(),
        });

        let store = Store::from_records(vec![r]).unwrap();
        let issues = validate_corpus(&store);

        assert!(!has_errors(&issues));
        assert!(issues
            .iter()
            .any(|i| i.category == "Cross References" && i.message.contains("topic-missing")));
    }
}

//! The top-level educational content record.
//!
//! One record describes one topic across up to five explanation levels.
//! Records are serialized as camelCase JSON documents, matching the
//! established content schema.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::level::ContentLevel;
use super::reference::{Citation, CrossReference, MediaReference};
use super::tags::ContentTags;

/// Kind of content a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Anatomical structure
    Structure,

    /// Body system
    System,

    /// Physiological pathway
    Pathway,

    /// Physiological process
    Process,

    /// Medical condition
    Condition,

    /// Abstract concept
    Concept,

    /// Navigation or educational topic
    Topic,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentType::Structure => "structure",
            ContentType::System => "system",
            ContentType::Pathway => "pathway",
            ContentType::Process => "process",
            ContentType::Condition => "condition",
            ContentType::Concept => "concept",
            ContentType::Topic => "topic",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "structure" => Ok(ContentType::Structure),
            "system" => Ok(ContentType::System),
            "pathway" => Ok(ContentType::Pathway),
            "process" => Ok(ContentType::Process),
            "condition" => Ok(ContentType::Condition),
            "concept" => Ok(ContentType::Concept),
            "topic" => Ok(ContentType::Topic),
            _ => anyhow::bail!("Unknown content type: {}", s),
        }
    }
}

/// Publication status of a record
///
/// Records are never physically deleted; retiring content is a status
/// transition so existing cross-references keep resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    /// Being authored, not yet reviewed
    Draft,

    /// Under editorial review
    Review,

    /// Visible to consumers
    Published,

    /// Retired but kept for referential integrity
    Archived,
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Review => "review",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

/// One educational topic with multi-level explanations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalContent {
    /// Stable kebab-case identifier, prefixed by content kind
    /// (e.g. "topic-insurance-basics")
    pub id: String,

    /// Kind of content
    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Display name
    pub name: String,

    /// Spanish display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_es: Option<String>,

    /// Synonyms and search aliases
    #[serde(default)]
    pub alternate_names: Vec<String>,

    /// Explanation tiers keyed by level number (1..=5).
    /// Keys are contiguous from 1; `levels[k].level == k`.
    #[serde(deserialize_with = "deserialize_levels")]
    pub levels: BTreeMap<u8, ContentLevel>,

    /// Associated media, may be empty
    #[serde(default)]
    pub media: Vec<MediaReference>,

    /// Source citations
    #[serde(default)]
    pub citations: Vec<Citation>,

    /// Directed by-id links to other records in the same store
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,

    /// Classification tags
    pub tags: ContentTags,

    /// When the record was first authored
    pub created_at: DateTime<Utc>,

    /// Refreshed whenever `version` changes
    pub updated_at: DateTime<Utc>,

    /// Monotonically increasing revision counter
    pub version: u32,

    /// Publication status
    pub status: ContentStatus,
}

/// Level map key that accepts both integer and numeric-string forms.
///
/// JSON objects always carry string keys; YAML documents may carry either
/// (a mechanical JSON-to-YAML conversion quotes them). Both parse to the
/// same `u8` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct LevelKey(u8);

impl<'de> Deserialize<'de> for LevelKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct KeyVisitor;

        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = LevelKey;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a level number (integer or numeric string)")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<LevelKey, E> {
                u8::try_from(v).map(LevelKey).map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<LevelKey, E> {
                u8::try_from(v).map(LevelKey).map_err(E::custom)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<LevelKey, E> {
                v.parse::<u8>().map(LevelKey).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

fn deserialize_levels<'de, D>(deserializer: D) -> Result<BTreeMap<u8, ContentLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<LevelKey, ContentLevel>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(LevelKey(k), v)| (k, v)).collect())
}

impl EducationalContent {
    /// Highest level number present, if any level exists
    pub fn max_level(&self) -> Option<u8> {
        self.levels.keys().next_back().copied()
    }

    /// Check whether any tag list or alias matches the query
    /// (case-insensitive substring)
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();

        self.name.to_lowercase().contains(&q)
            || self
                .name_es
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&q))
            || self
                .alternate_names
                .iter()
                .any(|n| n.to_lowercase().contains(&q))
            || self.tags.matches_query(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("topic".parse::<ContentType>().unwrap(), ContentType::Topic);
        assert_eq!(
            "CONDITION".parse::<ContentType>().unwrap(),
            ContentType::Condition
        );
        assert!("chapter".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_content_type_serde_roundtrip() {
        let json = serde_json::to_string(&ContentType::Condition).unwrap();
        assert_eq!(json, "\"condition\"");

        let parsed: ContentType = serde_json::from_str("\"topic\"").unwrap();
        assert_eq!(parsed, ContentType::Topic);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ContentStatus::Published.to_string(), "published");
        assert_eq!(ContentStatus::Archived.to_string(), "archived");
    }

    const MINIMAL_RECORD: &str = r#"{
        "id": "topic-minimal",
        "type": "topic",
        "name": "Minimal",
        "levels": {
            "1": { "level": 1, "summary": "s", "explanation": "e" },
            "2": { "level": 2, "summary": "s", "explanation": "e" }
        },
        "tags": {
            "systems": [],
            "topics": [],
            "keywords": [],
            "clinicalRelevance": "low"
        },
        "createdAt": "2025-07-01T00:00:00Z",
        "updatedAt": "2025-07-01T00:00:00Z",
        "version": 1,
        "status": "draft"
    }"#;

    #[test]
    fn test_level_keys_parse_from_json_strings() {
        let record: EducationalContent = serde_json::from_str(MINIMAL_RECORD).unwrap();
        assert_eq!(record.levels.len(), 2);
        assert_eq!(record.max_level(), Some(2));
    }

    #[test]
    fn test_level_keys_parse_from_yaml_quoted_or_bare() {
        // A mechanical JSON-to-YAML conversion quotes the level keys
        let value: serde_json::Value = serde_json::from_str(MINIMAL_RECORD).unwrap();
        let quoted = serde_yaml::to_string(&value).unwrap();
        let record: EducationalContent = serde_yaml::from_str(&quoted).unwrap();
        assert!(record.levels.contains_key(&1));
        assert!(record.levels.contains_key(&2));

        // Hand-authored YAML carries bare integer keys
        let bare = quoted.replace("'1':", "1:").replace("'2':", "2:");
        let record: EducationalContent = serde_yaml::from_str(&bare).unwrap();
        assert_eq!(record.levels.len(), 2);
    }
}

//! Media, citations, and cross-reference links.

use serde::{Deserialize, Serialize};

/// Kind of media asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Schematic diagram
    Diagram,

    /// Drawn illustration
    Illustration,

    /// Animated sequence
    Animation,

    /// Video clip
    Video,
}

/// Reference to a media asset stored outside the record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaReference {
    /// Asset identifier
    pub id: String,

    /// Kind of asset
    #[serde(rename = "type")]
    pub media_type: MediaType,

    /// Asset filename (resolved by the consumer)
    pub filename: String,

    /// Display title
    pub title: String,

    /// What the asset shows
    pub description: String,
}

/// Kind of cited source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationType {
    /// Web page or online resource
    Website,

    /// Journal or news article
    Article,

    /// Clinical guideline
    Guideline,

    /// Book or book chapter
    Book,
}

/// A cited source backing the record's content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Citation identifier, unique within the record
    pub id: String,

    /// Kind of source
    #[serde(rename = "type")]
    pub citation_type: CitationType,

    /// Title of the cited work
    pub title: String,

    /// Authors, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,

    /// Publishing organization or venue
    pub source: String,

    /// Link to the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// When the source was last accessed (ISO date)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed_date: Option<String>,
}

/// How a cross-referenced record relates to this one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    /// Broader topic containing this one
    Parent,

    /// Narrower topic contained by this one
    Child,

    /// Peer topic under the same parent
    Sibling,

    /// Topically related
    Related,

    /// Further reading
    SeeAlso,
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Relationship::Parent => "parent",
            Relationship::Child => "child",
            Relationship::Sibling => "sibling",
            Relationship::Related => "related",
            Relationship::SeeAlso => "see-also",
        };
        write!(f, "{}", s)
    }
}

/// Directed, non-owning link to another record in the same store.
///
/// Links are logical foreign keys resolved by id lookup at read time;
/// a dangling target is a data defect, not a runtime error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReference {
    /// Id of the linked record
    pub target_id: String,

    /// Content kind of the linked record
    pub target_type: super::content::ContentType,

    /// How the linked record relates to this one
    pub relationship: Relationship,

    /// Display label for the link
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ContentType;

    #[test]
    fn test_relationship_kebab_case() {
        let json = serde_json::to_string(&Relationship::SeeAlso).unwrap();
        assert_eq!(json, "\"see-also\"");

        let parsed: Relationship = serde_json::from_str("\"see-also\"").unwrap();
        assert_eq!(parsed, Relationship::SeeAlso);
    }

    #[test]
    fn test_cross_reference_wire_format() {
        let cr = CrossReference {
            target_id: "topic-insurance-basics".to_string(),
            target_type: ContentType::Topic,
            relationship: Relationship::Related,
            label: "Health Insurance Basics".to_string(),
        };

        let json = serde_json::to_string(&cr).unwrap();
        assert!(json.contains("\"targetId\""));
        assert!(json.contains("\"targetType\":\"topic\""));
    }

    #[test]
    fn test_citation_optional_fields() {
        let json = r#"{
            "id": "hrsa-bphc",
            "type": "website",
            "title": "About Health Centers",
            "source": "HRSA",
            "url": "https://bphc.hrsa.gov/about-health-centers"
        }"#;

        let citation: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(citation.citation_type, CitationType::Website);
        assert!(citation.authors.is_none());
        assert!(citation.accessed_date.is_none());
    }
}

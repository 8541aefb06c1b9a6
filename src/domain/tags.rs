//! Classification tags and relevance metadata.

use serde::{Deserialize, Serialize};

/// How clinically important the topic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalRelevance {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for ClinicalRelevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClinicalRelevance::Low => "low",
            ClinicalRelevance::Medium => "medium",
            ClinicalRelevance::High => "high",
            ClinicalRelevance::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Which medical exams the topic is relevant to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamRelevance {
    /// Appears on USMLE
    #[serde(default)]
    pub usmle: bool,

    /// Appears on NBME exams
    #[serde(default)]
    pub nbme: bool,

    /// Shelf exams the topic appears on
    #[serde(default)]
    pub shelf: Vec<String>,
}

/// Classification tags for a record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTags {
    /// Body systems or domain areas (e.g. "healthcare-navigation")
    #[serde(default)]
    pub systems: Vec<String>,

    /// Topic labels used for browsing
    #[serde(default)]
    pub topics: Vec<String>,

    /// Free-form search keywords
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Clinical importance
    pub clinical_relevance: ClinicalRelevance,

    /// Exam relevance, for clinical-education records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_relevance: Option<ExamRelevance>,
}

impl ContentTags {
    /// Case-insensitive substring match against all tag lists.
    /// `query` must already be lowercased.
    pub(crate) fn matches_query(&self, query: &str) -> bool {
        self.systems
            .iter()
            .chain(self.topics.iter())
            .chain(self.keywords.iter())
            .any(|t| t.to_lowercase().contains(query))
    }
}

//! Per-audience explanation tiers.
//!
//! Every record explains the same topic up to five times, at increasing
//! depth: level 1 targets a lay patient, level 5 a clinician expert.
//! Levels are depth tiers of one topic, not revisions.

use serde::{Deserialize, Serialize};

/// Highest allowed level number
pub const MAX_LEVEL: u8 = 5;

/// A term introduced at a given level, with its plain-language definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    /// The term itself
    pub term: String,

    /// Definition pitched at the level's audience
    pub definition: String,

    /// Phonetic pronunciation hint (e.g. "dee-DUCK-tih-bull")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}

/// One explanation tier of a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLevel {
    /// Level number; must equal the key this level is stored under
    pub level: u8,

    /// One-paragraph summary
    pub summary: String,

    /// Long-form markdown explanation body
    pub explanation: String,

    /// Terms introduced at this level
    #[serde(default)]
    pub key_terms: Vec<KeyTerm>,

    /// Everyday comparisons; typically present at shallow levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analogies: Option<Vec<String>>,

    /// Worked examples or concrete scenarios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,

    /// Points a clinician would raise when counseling a patient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_counseling_points: Option<Vec<String>>,

    /// Notes for clinical readers; typically present at deeper levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

//! Domain types for educational content.
//!
//! This module contains the content schema:
//! - Content: the top-level `EducationalContent` record and its metadata
//! - Level: per-audience explanation tiers (lay patient through expert)
//! - Reference: media, citations, and cross-reference links
//! - Tags: classification and relevance metadata

pub mod content;
pub mod level;
pub mod reference;
pub mod tags;

// Re-export commonly used types
pub use content::{ContentStatus, ContentType, EducationalContent};
pub use level::{ContentLevel, KeyTerm, MAX_LEVEL};
pub use reference::{Citation, CitationType, CrossReference, MediaReference, MediaType, Relationship};
pub use tags::{ClinicalRelevance, ContentTags, ExamRelevance};

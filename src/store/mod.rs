//! Immutable content record store.
//!
//! The store is a read-only snapshot of the full corpus, built once from a
//! [`ContentSource`]. Lookups return typed absence (`Option`), never panic,
//! and iteration follows the insertion order of the backing source.
//!
//! For live-updatable deployments, [`watch::CorpusWatcher`] rebuilds the
//! snapshot on content changes and swaps it atomically; records are never
//! mutated in place.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{ContentLevel, CrossReference, EducationalContent};

pub mod source;
pub mod watch;

pub use source::{BuiltinSource, ContentSource, DirSource};
pub use watch::{CorpusWatcher, WatchHandle, WatcherConfig};

/// Errors building a store snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate content id: {0}")]
    DuplicateId(String),
}

/// Which tag list to filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Systems,
    Topics,
    Keywords,
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TagKind::Systems => "systems",
            TagKind::Topics => "topics",
            TagKind::Keywords => "keywords",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for TagKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "systems" | "system" => Ok(TagKind::Systems),
            "topics" | "topic" => Ok(TagKind::Topics),
            "keywords" | "keyword" => Ok(TagKind::Keywords),
            _ => anyhow::bail!("Unknown tag kind: {} (expected systems, topics, or keywords)", s),
        }
    }
}

/// One cross-reference paired with its resolution result.
///
/// Unresolved targets are reported rather than raised so a consumer can
/// render a broken link instead of failing the whole record.
#[derive(Debug, Clone)]
pub struct ResolvedReference<'a> {
    /// The cross-reference as authored
    pub reference: &'a CrossReference,

    /// The target record, if it exists in the store
    pub target: Option<&'a EducationalContent>,
}

impl ResolvedReference<'_> {
    /// Whether the target id resolved to a record
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

/// Immutable snapshot of the content corpus
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Records in insertion order
    records: Vec<EducationalContent>,

    /// Id to position in `records`
    index: HashMap<String, usize>,
}

impl Store {
    /// Build a snapshot from records, indexing by id.
    ///
    /// A duplicate id is a construction error: the id is the join key for
    /// cross-references and must be globally unique.
    pub fn from_records(records: Vec<EducationalContent>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(records.len());

        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self { records, index })
    }

    /// Exact-key lookup by id
    pub fn get_by_id(&self, id: &str) -> Option<&EducationalContent> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Fetch one explanation level of a record.
    ///
    /// Absent if the id is unknown or the record has no such level.
    pub fn get_level(&self, id: &str, level: u8) -> Option<&ContentLevel> {
        self.get_by_id(id)?.levels.get(&level)
    }

    /// All records whose tag list of `kind` contains `value`
    /// (case-insensitive), in insertion order
    pub fn list_by_tag(&self, kind: TagKind, value: &str) -> Vec<&EducationalContent> {
        self.records
            .iter()
            .filter(|record| {
                let list = match kind {
                    TagKind::Systems => &record.tags.systems,
                    TagKind::Topics => &record.tags.topics,
                    TagKind::Keywords => &record.tags.keywords,
                };
                list.iter().any(|t| t.eq_ignore_ascii_case(value))
            })
            .collect()
    }

    /// Resolve every cross-reference of a record against the store.
    ///
    /// Returns `None` if the record itself is unknown. Each entry reports
    /// its own resolution; dangling targets yield `target: None`.
    pub fn resolve_cross_references(&self, id: &str) -> Option<Vec<ResolvedReference<'_>>> {
        let record = self.get_by_id(id)?;

        Some(
            record
                .cross_references
                .iter()
                .map(|reference| ResolvedReference {
                    reference,
                    target: self.get_by_id(&reference.target_id),
                })
                .collect(),
        )
    }

    /// Records matching a case-insensitive substring query over names,
    /// aliases, and tags, in insertion order
    pub fn search(&self, query: &str) -> Vec<&EducationalContent> {
        self.records
            .iter()
            .filter(|record| record.matches_query(query))
            .collect()
    }

    /// Iterate all records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &EducationalContent> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

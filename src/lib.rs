//! healthnav - typed multi-level patient education content store
//!
//! A corpus of strongly-typed educational records about healthcare
//! navigation topics, each explained at up to five depth levels (lay
//! patient through clinician expert), plus the store and validation
//! layer that makes the corpus usable.
//!
//! # Architecture
//!
//! The store is an immutable snapshot:
//! - Records load once from a content source (embedded corpus or a
//!   directory of JSON/YAML documents)
//! - Lookups return typed absence (`Option`), never panic
//! - Live updates rebuild the snapshot and swap it atomically; records
//!   are never mutated in place
//!
//! # Modules
//!
//! - `domain`: Content schema (EducationalContent, ContentLevel, ...)
//! - `store`: Snapshot store, content sources, directory watcher
//! - `validate`: Structural validation of records and the corpus
//! - `audit`: Best-effort citation link checking
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse the embedded corpus
//! healthnav list
//!
//! # Show one topic at one level
//! healthnav show topic-insurance-basics --level 2 --full
//!
//! # Validate a local content directory
//! healthnav validate --content-dir ./content
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod domain;
pub mod store;
pub mod validate;

// Re-export main types at crate root for convenience
pub use domain::{
    Citation, ContentLevel, ContentStatus, ContentTags, ContentType, CrossReference,
    EducationalContent, KeyTerm,
};
pub use store::{ContentSource, DirSource, ResolvedReference, Store, StoreError, TagKind};
pub use validate::{validate_corpus, validate_record, Severity, ValidationIssue};

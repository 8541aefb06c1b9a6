//! Content sources the store snapshot is built from.
//!
//! The corpus ships embedded in the binary ([`BuiltinSource`]); a directory
//! of JSON/YAML documents can replace it for local authoring
//! ([`DirSource`]).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::domain::EducationalContent;
use crate::store::Store;

/// Embedded corpus, one JSON document per record.
///
/// Order here is the insertion order of the built-in store.
const BUILTIN_CORPUS: &[(&str, &str)] = &[
    (
        "topic-healthcare-system-basics.json",
        include_str!("../../content/topic-healthcare-system-basics.json"),
    ),
    (
        "topic-insurance-basics.json",
        include_str!("../../content/topic-insurance-basics.json"),
    ),
    (
        "topic-community-health-centers.json",
        include_str!("../../content/topic-community-health-centers.json"),
    ),
    (
        "topic-emergency-vs-urgent-care.json",
        include_str!("../../content/topic-emergency-vs-urgent-care.json"),
    ),
    (
        "topic-finding-providers.json",
        include_str!("../../content/topic-finding-providers.json"),
    ),
    (
        "topic-hospital-navigation.json",
        include_str!("../../content/topic-hospital-navigation.json"),
    ),
    (
        "topic-language-services.json",
        include_str!("../../content/topic-language-services.json"),
    ),
    (
        "topic-prescription-assistance.json",
        include_str!("../../content/topic-prescription-assistance.json"),
    ),
    (
        "topic-medical-billing.json",
        include_str!("../../content/topic-medical-billing.json"),
    ),
    (
        "condition-obstructive-lung-disease.json",
        include_str!("../../content/condition-obstructive-lung-disease.json"),
    ),
];

/// A provider of content records
#[async_trait]
pub trait ContentSource {
    /// Load all records, in the source's canonical order
    async fn load(&self) -> Result<Vec<EducationalContent>>;
}

/// The corpus compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

#[async_trait]
impl ContentSource for BuiltinSource {
    async fn load(&self) -> Result<Vec<EducationalContent>> {
        BUILTIN_CORPUS
            .iter()
            .map(|(name, body)| {
                serde_json::from_str(body)
                    .with_context(|| format!("Failed to parse builtin record: {}", name))
            })
            .collect()
    }
}

/// A directory of content documents (`*.json`, `*.yaml`, `*.yml`),
/// scanned recursively
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory being scanned
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerate content documents, sorted for deterministic order
    fn document_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            anyhow::bail!("Content directory does not exist: {}", self.dir.display());
        }

        let mut paths = Vec::new();
        for ext in ["json", "yaml", "yml"] {
            let pattern = format!("{}/**/*.{}", self.dir.display(), ext);
            for entry in glob::glob(&pattern)
                .with_context(|| format!("Invalid glob pattern: {}", pattern))?
            {
                paths.push(entry?);
            }
        }

        paths.sort();
        Ok(paths)
    }

    /// Parse one document by extension
    fn parse_document(path: &Path, body: &str) -> Result<EducationalContent> {
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let record = if is_yaml {
            serde_yaml::from_str(body)
                .with_context(|| format!("Failed to parse YAML record: {}", path.display()))?
        } else {
            serde_json::from_str(body)
                .with_context(|| format!("Failed to parse JSON record: {}", path.display()))?
        };

        Ok(record)
    }
}

#[async_trait]
impl ContentSource for DirSource {
    async fn load(&self) -> Result<Vec<EducationalContent>> {
        let paths = self.document_paths()?;
        let mut records = Vec::with_capacity(paths.len());

        for path in paths {
            let body = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read content file: {}", path.display()))?;
            records.push(Self::parse_document(&path, &body)?);
        }

        tracing::debug!("Loaded {} records from {}", records.len(), self.dir.display());
        Ok(records)
    }
}

impl Store {
    /// Build the store from the embedded corpus
    pub async fn builtin() -> Result<Self> {
        Self::from_source(&BuiltinSource).await
    }

    /// Build the store from any content source
    pub async fn from_source(source: &impl ContentSource) -> Result<Self> {
        let records = source.load().await?;
        Ok(Self::from_records(records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_corpus_parses() {
        let store = Store::builtin().await.unwrap();

        assert_eq!(store.len(), BUILTIN_CORPUS.len());
        assert!(store.get_by_id("topic-healthcare-system-basics").is_some());
    }

    #[tokio::test]
    async fn test_dir_source_reads_json_and_yaml() {
        let temp = tempfile::TempDir::new().unwrap();

        // Reuse two builtin documents, one of them converted to YAML
        let json_body = BUILTIN_CORPUS[0].1;
        tokio::fs::write(temp.path().join("a.json"), json_body)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(BUILTIN_CORPUS[1].1).unwrap();
        let yaml_body = serde_yaml::to_string(&value).unwrap();
        tokio::fs::write(temp.path().join("b.yaml"), yaml_body)
            .await
            .unwrap();

        let store = Store::from_source(&DirSource::new(temp.path())).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_dir_source_missing_dir() {
        let source = DirSource::new("/nonexistent/content");
        assert!(source.load().await.is_err());
    }

    #[tokio::test]
    async fn test_dir_source_parse_error_names_file() {
        let temp = tempfile::TempDir::new().unwrap();
        tokio::fs::write(temp.path().join("broken.json"), "{ not json")
            .await
            .unwrap();

        let err = DirSource::new(temp.path()).load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}

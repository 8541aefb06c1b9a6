//! Command-line interface for healthnav.
//!
//! Provides commands for browsing the corpus, resolving cross-references,
//! validating content, auditing citation links, and watching a content
//! directory for changes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::audit::LinkAuditor;
use crate::config;
use crate::store::{CorpusWatcher, DirSource, Store, TagKind};
use crate::validate::{has_errors, validate_corpus, Severity};

/// healthnav - typed multi-level patient education content store
#[derive(Parser, Debug)]
#[command(name = "healthnav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Content directory (overrides config; defaults to the embedded corpus)
    #[arg(long, global = true, env = "HEALTHNAV_CONTENT")]
    pub content_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records in the corpus
    List {
        /// Filter on one tag list
        #[arg(long, value_enum, requires = "tag")]
        tag_kind: Option<TagField>,

        /// Tag value to filter by
        #[arg(long, requires = "tag_kind")]
        tag: Option<String>,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show one record
    Show {
        /// Content id (e.g. topic-insurance-basics)
        id: String,

        /// Show only this explanation level
        #[arg(short, long)]
        level: Option<u8>,

        /// Print full explanation prose
        #[arg(short, long)]
        full: bool,
    },

    /// Search records by name, alias, or tag
    Search {
        /// Search query (case-insensitive substring)
        query: String,
    },

    /// Resolve the cross-references of a record
    Refs {
        /// Content id
        id: String,
    },

    /// Validate the corpus
    Validate {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Check citation links over HTTP
    Audit {
        /// Per-request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout_secs: u64,
    },

    /// Watch a content directory and re-validate on change
    Watch {
        /// Directory to watch (defaults to the configured content directory)
        dir: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Tag list selector for the CLI (maps to TagKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TagField {
    Systems,
    Topics,
    Keywords,
}

impl From<TagField> for TagKind {
    fn from(f: TagField) -> Self {
        match f {
            TagField::Systems => TagKind::Systems,
            TagField::Topics => TagKind::Topics,
            TagField::Keywords => TagKind::Keywords,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::List { tag_kind, tag, limit } => {
                let store = load_store(&self.content_dir).await?;
                list_records(&store, tag_kind, tag.as_deref(), limit)
            }
            Commands::Show { id, level, full } => {
                let store = load_store(&self.content_dir).await?;
                show_record(&store, &id, level, full)
            }
            Commands::Search { query } => {
                let store = load_store(&self.content_dir).await?;
                search_records(&store, &query)
            }
            Commands::Refs { id } => {
                let store = load_store(&self.content_dir).await?;
                show_references(&store, &id)
            }
            Commands::Validate { strict } => {
                let store = load_store(&self.content_dir).await?;
                validate_store(&store, strict)
            }
            Commands::Audit { timeout_secs } => {
                let store = load_store(&self.content_dir).await?;
                audit_links(&store, timeout_secs).await
            }
            Commands::Watch { dir } => watch_content(dir, self.content_dir).await,
            Commands::Config => show_config(&self.content_dir),
        }
    }
}

/// Resolve the effective content directory, if any
fn effective_content_dir(cli_dir: &Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(dir) = cli_dir {
        return Ok(Some(dir.clone()));
    }
    Ok(config::config()?.content_dir.clone())
}

/// Load the store from the configured source
async fn load_store(cli_dir: &Option<PathBuf>) -> Result<Store> {
    match effective_content_dir(cli_dir)? {
        Some(dir) => Store::from_source(&DirSource::new(dir)).await,
        None => Store::builtin().await,
    }
}

/// List records, optionally filtered by tag
fn list_records(
    store: &Store,
    tag_kind: Option<TagField>,
    tag: Option<&str>,
    limit: usize,
) -> Result<()> {
    let records: Vec<_> = match (tag_kind, tag) {
        (Some(kind), Some(value)) => store.list_by_tag(kind.into(), value),
        _ => store.iter().collect(),
    };

    if records.is_empty() {
        println!("No records found");
        return Ok(());
    }

    println!(
        "{:<42} {:<10} {:<7} {:<10} NAME",
        "ID", "TYPE", "LEVELS", "STATUS"
    );
    println!("{}", "-".repeat(100));

    for record in records.iter().take(limit) {
        println!(
            "{:<42} {:<10} {:<7} {:<10} {}",
            record.id,
            record.content_type.to_string(),
            record.levels.len(),
            record.status.to_string(),
            record.name
        );
    }

    Ok(())
}

/// Show one record, or one level of it
fn show_record(store: &Store, id: &str, level: Option<u8>, full: bool) -> Result<()> {
    let record = store
        .get_by_id(id)
        .with_context(|| format!("No record with id: {}", id))?;

    println!("Id:       {}", record.id);
    println!("Name:     {}", record.name);
    if let Some(name_es) = &record.name_es {
        println!("Spanish:  {}", name_es);
    }
    if !record.alternate_names.is_empty() {
        println!("Aliases:  {}", record.alternate_names.join(", "));
    }
    println!("Type:     {}", record.content_type);
    println!("Status:   {}", record.status);
    println!("Version:  {} (updated {})", record.version, record.updated_at);

    let levels: Vec<u8> = match level {
        Some(n) => {
            if store.get_level(id, n).is_none() {
                anyhow::bail!("Record {} has no level {}", id, n);
            }
            vec![n]
        }
        None => record.levels.keys().copied().collect(),
    };

    for n in levels {
        // Key presence checked above; levels map is immutable here
        if let Some(content) = record.levels.get(&n) {
            println!("\n--- Level {} ---", n);
            println!("{}", content.summary);
            if full {
                println!("\n{}", content.explanation);
                if let Some(notes) = &content.clinical_notes {
                    println!("\nClinical notes: {}", notes);
                }
            }
            if !content.key_terms.is_empty() {
                println!("\nKey terms:");
                for term in &content.key_terms {
                    println!("  {} - {}", term.term, term.definition);
                }
            }
        }
    }

    if !record.citations.is_empty() {
        println!("\nCitations:");
        for citation in &record.citations {
            match &citation.url {
                Some(url) => println!("  [{}] {} ({})", citation.id, citation.title, url),
                None => println!("  [{}] {}", citation.id, citation.title),
            }
        }
    }

    Ok(())
}

/// Search by name, alias, or tag
fn search_records(store: &Store, query: &str) -> Result<()> {
    let hits = store.search(query);

    if hits.is_empty() {
        println!("No records match '{}'", query);
        return Ok(());
    }

    for record in hits {
        println!("{:<42} {}", record.id, record.name);
    }

    Ok(())
}

/// Resolve and print cross-references, marking broken links
fn show_references(store: &Store, id: &str) -> Result<()> {
    let resolved = store
        .resolve_cross_references(id)
        .with_context(|| format!("No record with id: {}", id))?;

    if resolved.is_empty() {
        println!("Record {} has no cross-references", id);
        return Ok(());
    }

    for entry in resolved {
        let marker = if entry.is_resolved() { "ok" } else { "BROKEN" };
        println!(
            "{:<8} {:<12} {:<42} {}",
            marker,
            entry.reference.relationship.to_string(),
            entry.reference.target_id,
            entry.reference.label
        );
    }

    Ok(())
}

/// Validate the corpus and exit non-zero on failure
fn validate_store(store: &Store, strict: bool) -> Result<()> {
    let issues = validate_corpus(store);

    if issues.is_empty() {
        println!("{} records, no issues", store.len());
        return Ok(());
    }

    for issue in &issues {
        println!("{}", issue);
    }

    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues.len() - errors;
    println!("\n{} error(s), {} warning(s)", errors, warnings);

    if has_errors(&issues) || (strict && !issues.is_empty()) {
        std::process::exit(1);
    }

    Ok(())
}

/// Audit citation links over HTTP
async fn audit_links(store: &Store, timeout_secs: u64) -> Result<()> {
    let auditor = LinkAuditor::new(Duration::from_secs(timeout_secs))?;
    let reports = auditor.audit_store(store).await;

    let mut failed = 0;
    for report in &reports {
        if !report.status.is_ok() {
            failed += 1;
            println!(
                "FAILED  {} / {}: {} ({:?})",
                report.content_id, report.citation_id, report.url, report.status
            );
        }
    }

    println!("\nChecked {} link(s), {} failed", reports.len(), failed);
    Ok(())
}

/// Watch a content directory, re-validating each rebuilt snapshot
async fn watch_content(dir: Option<PathBuf>, cli_dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir.or(effective_content_dir(&cli_dir)?) {
        Some(dir) => dir,
        None => anyhow::bail!(
            "No content directory to watch. Pass one or set HEALTHNAV_CONTENT"
        ),
    };

    let mut watcher_config = crate::store::WatcherConfig::new(&dir);
    watcher_config.debounce_secs = config::config()?.debounce_secs;

    let watcher = CorpusWatcher::with_config(watcher_config);
    let (mut snapshots, handle) = watcher.watch().await?;

    println!("Watching {} (ctrl-c to stop)", dir.display());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snapshot = snapshots.recv() => {
                let Some(snapshot) = snapshot else { break };
                report_snapshot(&snapshot);
            }
        }
    }

    handle.stop().await
}

/// Print a one-line validation summary for a snapshot
fn report_snapshot(snapshot: &Arc<Store>) {
    let issues = validate_corpus(snapshot);
    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();

    println!(
        "[{}] {} records, {} error(s), {} warning(s)",
        chrono::Utc::now().format("%H:%M:%S"),
        snapshot.len(),
        errors,
        issues.len() - errors
    );

    for issue in issues.iter().filter(|i| i.severity == Severity::Error) {
        println!("  {}", issue);
    }
}

/// Show resolved configuration
fn show_config(cli_dir: &Option<PathBuf>) -> Result<()> {
    let config = config::config()?;

    println!("Config file:  {}", match &config.config_file {
        Some(path) => path.display().to_string(),
        None => "<none>".to_string(),
    });
    println!("Content dir:  {}", match cli_dir {
        Some(dir) => dir.display().to_string(),
        None => config.content_label(),
    });
    println!("Debounce:     {}s", config.debounce_secs);

    Ok(())
}

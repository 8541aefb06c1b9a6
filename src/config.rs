//! Configuration for content locations.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (HEALTHNAV_CONTENT)
//! 2. Config file (.healthnav/config.yaml)
//! 3. Default (~/.healthnav/content if it exists, else the embedded corpus)
//!
//! Config file discovery:
//! - Searches current directory and parents for .healthnav/config.yaml
//! - Paths in the config file are relative to the config file's parent
//!   directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub watch: Option<WatchConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Content directory (relative to the config file's project root)
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    pub debounce_secs: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// External content directory; `None` means the embedded corpus
    pub content_dir: Option<PathBuf>,

    /// Path to the config file, if one was found
    pub config_file: Option<PathBuf>,

    /// Debounce window for the corpus watcher (seconds)
    pub debounce_secs: u64,
}

impl ResolvedConfig {
    /// Label shown for the content source
    pub fn content_label(&self) -> String {
        match &self.content_dir {
            Some(dir) => dir.display().to_string(),
            None => "<builtin corpus>".to_string(),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".healthnav").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse a config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let mut debounce_secs = 2;
    let mut file_content_dir = None;

    if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .healthnav/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        if let Some(ref content) = config.paths.content {
            file_content_dir = Some(resolve_path(base_dir, content));
        }
        if let Some(watch) = config.watch {
            if let Some(secs) = watch.debounce_secs {
                debounce_secs = secs;
            }
        }
    }

    let content_dir = if let Ok(env_dir) = std::env::var("HEALTHNAV_CONTENT") {
        Some(PathBuf::from(env_dir))
    } else if file_content_dir.is_some() {
        file_content_dir
    } else {
        // A local content checkout under the home directory wins over
        // the embedded corpus, if present
        dirs::home_dir()
            .map(|home| home.join(".healthnav").join("content"))
            .filter(|dir| dir.is_dir())
    };

    Ok(ResolvedConfig {
        content_dir,
        config_file,
        debounce_secs,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let nav_dir = temp.path().join(".healthnav");
        std::fs::create_dir_all(&nav_dir).unwrap();

        let config_path = nav_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  content: ./content
watch:
  debounce_secs: 5
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.content, Some("./content".to_string()));
        assert_eq!(config.watch.unwrap().debounce_secs, Some(5));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "/absolute/content"),
            PathBuf::from("/absolute/content")
        );
        assert_eq!(
            resolve_path(&base, "./content"),
            PathBuf::from("/home/user/project/content")
        );
    }
}

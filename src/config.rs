//! Configuration for record sources.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (REMIX_HOME, REMIX_RECORDS, REMIX_CATALOG, REMIX_SOURCE_URL)
//! 2. Config file (.remix/config.yaml)
//! 3. Defaults (~/.remix)
//!
//! Config file discovery:
//! - Searches current directory and parents for .remix/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub source: Option<SourceConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .remix/)
    pub home: Option<String>,
    /// Records JSONL file (relative to project root)
    pub records: Option<String>,
    /// Static catalog JSON file (relative to project root)
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Remote record endpoint; when set it replaces the records file
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Where dynamic records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// Local JSONL file
    File(PathBuf),
    /// Remote JSON endpoint
    Http { url: String, timeout: Duration },
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the state directory
    pub home: PathBuf,
    /// Dynamic record source
    pub source: RecordSource,
    /// Static catalog path
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Records file path, when records come from a file
    pub fn records_path(&self) -> Option<&Path> {
        match &self.source {
            RecordSource::File(path) => Some(path),
            RecordSource::Http { .. } => None,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".remix").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
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

/// Environment overrides, read once per load
#[derive(Debug, Default)]
struct EnvOverrides {
    home: Option<String>,
    records: Option<String>,
    catalog: Option<String>,
    url: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var("REMIX_HOME").ok(),
            records: std::env::var("REMIX_RECORDS").ok(),
            catalog: std::env::var("REMIX_CATALOG").ok(),
            url: std::env::var("REMIX_SOURCE_URL").ok(),
        }
    }
}

/// Merge env overrides, an optional config file and defaults
fn resolve(
    default_home: PathBuf,
    config_file: Option<(&Path, ConfigFile)>,
    env: EnvOverrides,
) -> ResolvedConfig {
    let (file_paths, file_source, remix_dir, base_dir) = match &config_file {
        Some((path, config)) => {
            // .remix/ and the project root above it
            let remix_dir = path.parent().unwrap_or(Path::new("."));
            let base_dir = remix_dir.parent().unwrap_or(Path::new("."));
            (
                config.paths.clone(),
                config.source.clone(),
                Some(remix_dir.to_path_buf()),
                Some(base_dir.to_path_buf()),
            )
        }
        None => (PathsConfig::default(), None, None, None),
    };

    let home = match (env.home, &file_paths.home, &remix_dir) {
        (Some(env_home), _, _) => PathBuf::from(env_home),
        (None, Some(home), Some(dir)) => resolve_path(dir, home),
        _ => default_home,
    };

    let from_file = |value: &Option<String>| match (value, &base_dir) {
        (Some(v), Some(base)) => Some(resolve_path(base, v)),
        _ => None,
    };

    let records = env
        .records
        .map(PathBuf::from)
        .or_else(|| from_file(&file_paths.records))
        .unwrap_or_else(|| home.join("records.jsonl"));

    let catalog = env
        .catalog
        .map(PathBuf::from)
        .or_else(|| from_file(&file_paths.catalog))
        .unwrap_or_else(|| home.join("catalog.json"));

    let timeout = Duration::from_secs(
        file_source
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
    );

    let url = env
        .url
        .or_else(|| file_source.and_then(|s| s.url))
        .filter(|u| !u.trim().is_empty());

    let source = match url {
        Some(url) => RecordSource::Http { url, timeout },
        None => RecordSource::File(records),
    };

    ResolvedConfig {
        home,
        source,
        catalog,
        config_file: config_file.map(|(path, _)| path.to_path_buf()),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".remix");

    let config_path = find_config_file();
    let config_file = match &config_path {
        Some(path) => Some((path.as_path(), load_config_file(path)?)),
        None => None,
    };

    Ok(resolve(default_home, config_file, EnvOverrides::from_env()))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, yaml: &str) -> PathBuf {
        let remix_dir = temp.path().join(".remix");
        std::fs::create_dir_all(&remix_dir).unwrap();

        let config_path = remix_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", yaml).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve(
            PathBuf::from("/home/user/.remix"),
            None,
            EnvOverrides::default(),
        );

        assert_eq!(config.home, PathBuf::from("/home/user/.remix"));
        assert_eq!(
            config.source,
            RecordSource::File(PathBuf::from("/home/user/.remix/records.jsonl"))
        );
        assert_eq!(config.catalog, PathBuf::from("/home/user/.remix/catalog.json"));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  records: data/records.jsonl
  catalog: data/catalog.json
source:
  timeout_seconds: 5
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.records, Some("data/records.jsonl".to_string()));
        assert_eq!(config.source.unwrap().timeout_seconds, Some(5));
    }

    #[test]
    fn test_file_paths_resolve_against_project_root() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  records: data/records.jsonl
  catalog: /abs/catalog.json
"#,
        );
        let file = load_config_file(&config_path).unwrap();

        let config = resolve(
            PathBuf::from("/home/user/.remix"),
            Some((config_path.as_path(), file)),
            EnvOverrides::default(),
        );

        assert_eq!(
            config.records_path(),
            Some(temp.path().join("data/records.jsonl").as_path())
        );
        assert_eq!(config.catalog, PathBuf::from("/abs/catalog.json"));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_win() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  records: data/records.jsonl
source:
  url: http://file.example/records
  timeout_seconds: 7
"#,
        );
        let file = load_config_file(&config_path).unwrap();

        let config = resolve(
            PathBuf::from("/home/user/.remix"),
            Some((config_path.as_path(), file)),
            EnvOverrides {
                home: Some("/env/home".into()),
                catalog: Some("/env/catalog.json".into()),
                url: Some("http://env.example/records".into()),
                ..Default::default()
            },
        );

        assert_eq!(config.home, PathBuf::from("/env/home"));
        assert_eq!(config.catalog, PathBuf::from("/env/catalog.json"));
        assert_eq!(
            config.source,
            RecordSource::Http {
                url: "http://env.example/records".into(),
                timeout: Duration::from_secs(7),
            }
        );
        assert!(config.records_path().is_none());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}

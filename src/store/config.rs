use std::path::{Path, PathBuf};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use super::StoreError;

/// Name of the configuration file looked up in the standard locations
pub const CONFIG_FILE_NAME: &str = "orm.toml";

/// Store configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database file path, or `:memory:`
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

fn default_database() -> String { ":memory:".to_string() }
fn default_busy_timeout_ms() -> u64 { 5000 }
fn default_foreign_keys() -> bool { true }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_ms: default_busy_timeout_ms(),
            foreign_keys: default_foreign_keys(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database == ":memory:"
    }

    /// Candidate config files, in lookup order
    #[must_use]
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/postgrust-orm").join(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("postgrust-orm").join(CONFIG_FILE_NAME));
        }
        paths.push(PathBuf::from(".").join(CONFIG_FILE_NAME));
        paths
    }

    /// Load configuration with priority: ENV > config file > defaults.
    ///
    /// An explicit `path` must exist; otherwise the first existing file from
    /// [`search_paths`](Self::search_paths) is used, if any.
    pub fn load(path: Option<&Path>) -> Result<Self, StoreError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        } else if let Some(found) = Self::search_paths().into_iter().find(|p| p.exists()) {
            tracing::debug!(path = %found.display(), "loaded store config");
            builder = builder.add_source(File::from(found));
        }

        // POSTGRUST_ORM_DATABASE, POSTGRUST_ORM_BUSY_TIMEOUT_MS, ...
        builder = builder.add_source(
            Environment::with_prefix("POSTGRUST_ORM")
                .prefix_separator("_")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.is_in_memory());
        assert_eq!(config.busy_timeout_ms, 5000);
        assert!(config.foreign_keys);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orm.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "database = \"/tmp/blog.db\"").unwrap();
        writeln!(file, "busy_timeout_ms = 250").unwrap();

        let config = StoreConfig::load(Some(&path)).unwrap();
        assert_eq!(config.database, "/tmp/blog.db");
        assert_eq!(config.busy_timeout_ms, 250);
        assert!(config.foreign_keys);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(matches!(StoreConfig::load(Some(&path)), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_search_paths_end_with_local_file() {
        let paths = StoreConfig::search_paths();
        assert_eq!(paths.first().unwrap(), &PathBuf::from("/etc/postgrust-orm/orm.toml"));
        assert_eq!(paths.last().unwrap(), &PathBuf::from("./orm.toml"));
    }
}

/// Runtime configuration for the catalog CLI.
///
/// Settings come from an optional `solmon.toml` in the working directory,
/// with `SOLMON_*` environment variables taking precedence. A missing
/// config file is not an error — the embedded catalog and default logging
/// are used.
///
/// # Environment injection
/// Override application goes through `apply_env_from`, which takes the
/// variable lookup as a parameter rather than reading `std::env` directly.
/// This keeps override behavior deterministic in tests without mutating
/// process-global state.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;
use crate::model::CatalogError;

/// Config file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "solmon.toml";

/// Path to an alternate catalog payload.
pub const ENV_CATALOG: &str = "SOLMON_CATALOG";
/// Minimum log level (`debug`, `info`, `warn`, `error`).
pub const ENV_LOG: &str = "SOLMON_LOG";
/// Path of a log file to append to.
pub const ENV_LOG_FILE: &str = "SOLMON_LOG_FILE";
/// Treat a degraded verification as failure (`1`/`true` to enable).
pub const ENV_STRICT: &str = "SOLMON_STRICT";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog payload to load instead of the embedded asset.
    pub catalog_path: Option<PathBuf>,
    /// Minimum log level; `info` when unset.
    pub log_level: Option<String>,
    /// Log file to append to, in addition to the console.
    pub log_file: Option<String>,
    /// When set, a verification that is only degraded still exits nonzero.
    pub strict: bool,
}

impl CatalogConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        toml::from_str(text).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Loads a config file. The file must exist; callers decide whether a
    /// missing file falls back to defaults.
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads `solmon.toml` if present (defaults otherwise) and applies
    /// environment overrides.
    pub fn load() -> Result<Self, CatalogError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_from(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Applies `SOLMON_*` overrides from the given variable lookup.
    pub fn apply_env_from<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = get(ENV_CATALOG) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(level) = get(ENV_LOG) {
            self.log_level = Some(level);
        }
        if let Some(file) = get(ENV_LOG_FILE) {
            self.log_file = Some(file);
        }
        if let Some(strict) = get(ENV_STRICT) {
            self.strict = matches!(strict.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// The configured minimum log level, or an error naming the bad value.
    pub fn min_log_level(&self) -> Result<LogLevel, CatalogError> {
        match &self.log_level {
            None => Ok(LogLevel::Info),
            Some(value) => value.parse().map_err(CatalogError::Config),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_when_nothing_is_configured() {
        let mut config = CatalogConfig::default();
        config.apply_env_from(no_env);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.min_log_level().unwrap(), LogLevel::Info);
        assert!(!config.strict);
    }

    #[test]
    fn test_full_toml_config_parses() {
        let config = CatalogConfig::from_toml_str(
            r#"
            catalog_path = "/srv/solar/catalog.json"
            log_level = "debug"
            log_file = "solmon.log"
            strict = true
            "#,
        )
        .expect("valid config should parse");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/srv/solar/catalog.json"))
        );
        assert_eq!(config.min_log_level().unwrap(), LogLevel::Debug);
        assert_eq!(config.log_file.as_deref(), Some("solmon.log"));
        assert!(config.strict);
    }

    #[test]
    fn test_empty_toml_config_is_all_defaults() {
        let config = CatalogConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        // Catching typos like `catalogue_path` beats silently ignoring them.
        let result = CatalogConfig::from_toml_str("catalogue_path = \"x\"\n");
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_invalid_log_level_is_reported_on_use() {
        let config = CatalogConfig::from_toml_str("log_level = \"loud\"\n").unwrap();
        let err = config.min_log_level().expect_err("'loud' is not a level");
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let mut config = CatalogConfig::from_toml_str(
            "catalog_path = \"from_file.json\"\nlog_level = \"warn\"\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CATALOG, "from_env.json"),
            (ENV_LOG, "error"),
            (ENV_STRICT, "true"),
        ]);
        config.apply_env_from(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.catalog_path, Some(PathBuf::from("from_env.json")));
        assert_eq!(config.min_log_level().unwrap(), LogLevel::Error);
        assert!(config.strict);
    }

    #[test]
    fn test_strict_env_accepts_common_truthy_spellings() {
        for value in ["1", "true", "YES"] {
            let mut config = CatalogConfig::default();
            config.apply_env_from(|name| {
                (name == ENV_STRICT).then(|| value.to_string())
            });
            assert!(config.strict, "'{}' should enable strict mode", value);
        }
        let mut config = CatalogConfig::default();
        config.apply_env_from(|name| (name == ENV_STRICT).then(|| "0".to_string()));
        assert!(!config.strict);
    }

    #[test]
    fn test_load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "log_level = \"warn\"").unwrap();
        let config = CatalogConfig::load_file(file.path()).expect("file should load");
        assert_eq!(config.min_log_level().unwrap(), LogLevel::Warning);
    }

    #[test]
    fn test_load_file_missing_is_an_io_error() {
        let err = CatalogConfig::load_file(Path::new("/nonexistent/solmon.toml"))
            .expect_err("missing file must error");
        assert!(matches!(err, CatalogError::Io(_)));
    }
}

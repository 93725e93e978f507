//! Checker configuration: the formatter executable and the debounce delay.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_EXECUTABLE: &str = "clang-format";

/// Quiet time after the last edit before an automatic re-check fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Path or name of the formatter executable.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Milliseconds of quiet time before a scheduled check fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl CheckerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_apply_to_empty_config() {
        let config: CheckerConfig = toml::from_str("").unwrap();
        assert_eq!(config.executable, "clang-format");
        assert_eq!(config.debounce_ms, 1500);
        assert_eq!(config.debounce_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: CheckerConfig = toml::from_str("executable = \"clang-format-19\"").unwrap();
        assert_eq!(config.executable, "clang-format-19");
        assert_eq!(config.debounce_ms, 1500);
    }

    #[test]
    fn load_reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "executable = \"my-format\"\ndebounce_ms = 250").unwrap();

        let config = CheckerConfig::load(file.path()).unwrap();
        assert_eq!(config.executable, "my-format");
        assert_eq!(config.debounce_ms, 250);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = CheckerConfig::load(Path::new("/nonexistent/fmtcheck.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "executable = [not a string").unwrap();

        let err = CheckerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

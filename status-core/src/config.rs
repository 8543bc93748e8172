//! Service configuration, read from TOML.

use crate::archive::{DEFAULT_ARCHIVE_PREFIXES, DEFAULT_LOG_DIR};
use crate::errors::{StatusError, StatusResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/sanji/status.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Directory scanned for diagnostics logs.
    pub log_dir: PathBuf,
    /// File name prefixes packed into the diagnostics archive.
    pub archive_prefixes: Vec<String>,
    /// JSON file holding the hostname record.
    pub record_path: PathBuf,
    /// Hostname file rewritten on rename.
    pub hostname_file: PathBuf,
    /// Tool that prints the product version.
    pub version_tool: String,
    /// Service log file; stderr is used when it cannot be opened.
    pub log_file: PathBuf,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            archive_prefixes: DEFAULT_ARCHIVE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            record_path: PathBuf::from("/etc/sanji/status.json"),
            hostname_file: PathBuf::from("/etc/hostname"),
            version_tool: "pversion".to_string(),
            log_file: PathBuf::from("/var/log/sanji/status.log"),
        }
    }
}

impl StatusConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> StatusResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| StatusError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
            .map_err(|e| StatusError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let cfg = StatusConfig::load(&dir.path().join("status.toml")).unwrap();
        assert_eq!(cfg, StatusConfig::default());
        assert_eq!(cfg.archive_prefixes, vec!["syslog", "uc8100-webapp", "sanji"]);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let cfg = StatusConfig::from_toml("version_tool = \"/usr/bin/pversion\"\nlog_dir = \"/tmp/logs\"\n")
            .unwrap();
        assert_eq!(cfg.version_tool, "/usr/bin/pversion");
        assert_eq!(cfg.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(cfg.hostname_file, PathBuf::from("/etc/hostname"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.toml");
        fs::write(&path, "log_dir = [").unwrap();
        assert!(matches!(StatusConfig::load(&path), Err(StatusError::Config(_))));
    }
}

//! ETL configuration file

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Knobs that change how the merge treats questionable data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Abort on ambiguous name joins and on relic names that already carry a
    /// parenthesised suffix, instead of taking the first match and warning
    pub strict_joins: bool,
    /// Skip the LimitBreak and SynchroCommand candidates when resolving
    /// `Other` sources; matching rules for the other candidates are unchanged
    pub legacy_other_source_lookup: bool,
}

/// Pipeline configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// Directory holding the worksheet CSV exports
    pub import_dir: PathBuf,
    /// Root of the snapshot store
    pub storage_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    pub merge: MergeOptions,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            import_dir: PathBuf::from("import"),
            storage_dir: PathBuf::from("store"),
            log_filter: "info".to_string(),
            merge: MergeOptions::default(),
        }
    }
}

impl EtlConfig {
    /// Load a config file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Load a config file if one exists, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: EtlConfig =
            serde_json::from_str(r#"{ "import_dir": "sheets", "merge": { "strict_joins": true } }"#).unwrap();

        assert_eq!(config.import_dir, PathBuf::from("sheets"));
        assert_eq!(config.storage_dir, PathBuf::from("store"));
        assert_eq!(config.log_filter, "info");
        assert!(config.merge.strict_joins);
        assert!(!config.merge.legacy_other_source_lookup);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("enlir-config-{}.json", std::process::id()));
        let mut config = EtlConfig::default();
        config.merge.legacy_other_source_lookup = true;

        config.save(&path).unwrap();
        let loaded = EtlConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = EtlConfig::load_or_default("/nonexistent/enlir.json").unwrap();
        assert_eq!(config, EtlConfig::default());
    }
}

//! Reader configuration.

use serde::{Deserialize, Serialize};

use crate::def::{CURRENT_DEF_VERSION, SUPPORTED_DEF_VERSIONS};
use crate::error::{ReadError, ReadResult};

/// Controls how raw documents are turned into definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Accepted values of the document `version` field. The first entry is
    /// substituted when the document's version is missing or rejected.
    #[serde(default = "default_supported_versions")]
    pub supported_versions: Vec<String>,
    /// Record a fault when the document has no `version` field.
    #[serde(default)]
    pub require_version: bool,
    /// Emit one `warn` event per fault after each read.
    #[serde(default = "default_log_faults")]
    pub log_faults: bool,
}

fn default_supported_versions() -> Vec<String> {
    let mut versions: Vec<String> = SUPPORTED_DEF_VERSIONS.iter().map(|v| v.to_string()).collect();
    // current version first
    versions.sort_by_key(|v| v != CURRENT_DEF_VERSION);
    versions
}

fn default_log_faults() -> bool {
    true
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            supported_versions: default_supported_versions(),
            require_version: false,
            log_faults: default_log_faults(),
        }
    }
}

impl ReaderConfig {
    /// Load a config from TOML text; absent keys take their defaults.
    pub fn from_toml_str(content: &str) -> ReadResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ReadError::Config(e.to_string()))?;
        if config.supported_versions.is_empty() {
            return Err(ReadError::Config(
                "supported_versions must not be empty".into(),
            ));
        }
        Ok(config)
    }

    /// The version substituted for a missing or rejected one.
    pub fn current_version(&self) -> &str {
        self.supported_versions
            .first()
            .map(String::as_str)
            .unwrap_or(CURRENT_DEF_VERSION)
    }

    pub fn supports(&self, version: &str) -> bool {
        self.supported_versions.iter().any(|v| v == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.current_version(), CURRENT_DEF_VERSION);
        assert!(config.supports("0.9.0"));
        assert!(!config.supports("2.0.0"));
        assert!(!config.require_version);
        assert!(config.log_faults);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ReaderConfig::from_toml_str("require_version = true").unwrap();
        assert!(config.require_version);
        assert_eq!(config.supported_versions, ReaderConfig::default().supported_versions);
    }

    #[test]
    fn test_from_toml_custom_versions() {
        let config = ReaderConfig::from_toml_str(
            r#"
supported_versions = ["2.0.0", "1.0.0"]
log_faults = false
"#,
        )
        .unwrap();
        assert_eq!(config.current_version(), "2.0.0");
        assert!(!config.log_faults);
    }

    #[test]
    fn test_from_toml_rejects_empty_versions() {
        let err = ReaderConfig::from_toml_str("supported_versions = []").unwrap_err();
        assert!(matches!(err, ReadError::Config(_)));
    }

    #[test]
    fn test_from_toml_rejects_bad_type() {
        assert!(ReaderConfig::from_toml_str("require_version = 3").is_err());
    }
}

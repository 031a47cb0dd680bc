//! Test double configuration

use std::path::Path;

use mimic_mock::TieBreakMode;
use serde::{Deserialize, Serialize};

use crate::error::{DoubleError, DoubleResult};

/// Behavior of a [`Double`](crate::Double) outside of its allowed calls.
///
/// Typically kept in a `mimic.toml` next to a test suite:
///
/// ```toml
/// stub = true
/// record_calls = true
/// tie_break = "first"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleConfig {
    /// Answer unmatched invocations with no values instead of an error
    #[serde(default)]
    pub stub: bool,

    /// Record every invocation in the double's spy
    #[serde(default = "default_record_calls")]
    pub record_calls: bool,

    /// Which of several equally scored calls wins
    #[serde(default)]
    pub tie_break: TieBreakMode,
}

fn default_record_calls() -> bool {
    true
}

impl Default for DoubleConfig {
    fn default() -> Self {
        Self {
            stub: false,
            record_calls: default_record_calls(),
            tie_break: TieBreakMode::default(),
        }
    }
}

impl DoubleConfig {
    /// Set whether unmatched invocations yield no values.
    pub fn with_stub(mut self, stub: bool) -> Self {
        self.stub = stub;
        self
    }

    /// Set whether invocations are recorded in the spy.
    pub fn with_record_calls(mut self, record_calls: bool) -> Self {
        self.record_calls = record_calls;
        self
    }

    /// Set the tie-break strategy for the mock.
    pub fn with_tie_break(mut self, tie_break: TieBreakMode) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> DoubleResult<Self> {
        toml::from_str(contents).map_err(|e| DoubleError::Config(e.to_string()))
    }

    /// Load configuration from file, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> DoubleResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DoubleError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Serialize configuration to TOML text
    pub fn to_toml_string(&self) -> DoubleResult<String> {
        toml::to_string(self).map_err(|e| DoubleError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DoubleConfig::default();
        assert!(!config.stub);
        assert!(config.record_calls);
        assert_eq!(config.tie_break, TieBreakMode::Last);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DoubleConfig::from_toml_str("stub = true").unwrap();
        assert!(config.stub);
        assert!(config.record_calls);
        assert_eq!(config.tie_break, TieBreakMode::Last);

        let config = DoubleConfig::from_toml_str("").unwrap();
        assert_eq!(config, DoubleConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = DoubleConfig::from_toml_str(
            r#"
            stub = false
            record_calls = false
            tie_break = "first"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            DoubleConfig::default()
                .with_record_calls(false)
                .with_tie_break(TieBreakMode::First)
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = DoubleConfig::from_toml_str("tie_break = \"random\"").unwrap_err();
        assert!(matches!(err, DoubleError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DoubleConfig::default().with_stub(true);
        let text = config.to_toml_string().unwrap();
        assert_eq!(DoubleConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_config() {
        // Should return default config when file doesn't exist
        let config = DoubleConfig::load("/nonexistent/path/mimic.toml").unwrap();
        assert_eq!(config, DoubleConfig::default());
    }
}

//! Verifier configuration
//!
//! Settings come from a JSON file (when present) and are then overridden by
//! command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use riepow_core::DiagnosticOptions;

/// Default wall-clock budget for factoring a prime base in diagnostics
pub const DEFAULT_FACTOR_BUDGET_MS: u64 = 3_000;

/// Default largest trial divisor in diagnostics
pub const DEFAULT_FACTOR_LIMIT: u64 = 1 << 32;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

/// Verifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Factorization budget for diagnostics in milliseconds (0 disables factoring)
    pub factor_budget_ms: u64,
    /// Largest trial divisor for diagnostics
    pub factor_limit: u64,
    /// Worker threads for batch verification (default: number of CPU cores)
    pub threads: Option<usize>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            factor_budget_ms: DEFAULT_FACTOR_BUDGET_MS,
            factor_limit: DEFAULT_FACTOR_LIMIT,
            threads: None,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Diagnostic options derived from this configuration
    pub fn diagnostic_options(&self) -> DiagnosticOptions {
        DiagnosticOptions {
            factor_budget: (self.factor_budget_ms > 0)
                .then(|| Duration::from_millis(self.factor_budget_ms)),
            factor_limit: self.factor_limit,
        }
    }
}

/// Get the default config file path
#[cfg(feature = "cli")]
pub fn default_config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".riepow").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        let options = config.diagnostic_options();
        assert_eq!(options.factor_budget, Some(Duration::from_secs(3)));
        assert_eq!(options.factor_limit, DEFAULT_FACTOR_LIMIT);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_zero_budget_disables_factoring() {
        let config = VerifierConfig {
            factor_budget_ms: 0,
            ..VerifierConfig::default()
        };
        assert_eq!(config.diagnostic_options().factor_budget, None);
    }

    #[test]
    fn test_partial_config_file() {
        let config: VerifierConfig = serde_json::from_str(r#"{"threads": 4}"#).unwrap();
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.factor_budget_ms, DEFAULT_FACTOR_BUDGET_MS);
    }

    #[test]
    fn test_config_file_roundtrip() {
        let path: PathBuf = std::env::temp_dir().join(format!(
            "riepow-config-test-{}.json",
            std::process::id()
        ));
        let config = VerifierConfig {
            factor_budget_ms: 250,
            factor_limit: 1_000,
            threads: Some(2),
        };
        config.save_to_file(&path).unwrap();
        let loaded = VerifierConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config_file() {
        let err = serde_json::from_str::<VerifierConfig>(r#"{"threads": "many"}"#).unwrap_err();
        assert!(matches!(
            ConfigError::from(err),
            ConfigError::InvalidFormat(_)
        ));
    }
}

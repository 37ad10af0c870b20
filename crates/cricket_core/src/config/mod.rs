//! # Scoring Configuration
//!
//! The format policy table consulted by `apply_format_with`. The default is
//! the built-in table; a host may override it with a JSON file named by
//! `CRICKET_POLICY_PATH`.
//!
//! ```rust
//! use cricket_core::config::ScoringConfig;
//! use cricket_core::models::MatchFormat;
//!
//! let config = ScoringConfig::default();
//! assert_eq!(config.policy(MatchFormat::T20).overs_limit, Some(20));
//! ```

use crate::models::{FormatPolicy, MatchFormat};
use serde::{Deserialize, Serialize};
use std::{env, fs};
use thiserror::Error;

pub const POLICY_PATH_ENV: &str = "CRICKET_POLICY_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read policy file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse policy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {format} policy: {reason}")]
    Invalid { format: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(default = "indoor_policy")]
    pub indoor: FormatPolicy,
    #[serde(default = "t20_policy")]
    pub t20: FormatPolicy,
    #[serde(default = "odi_policy")]
    pub odi: FormatPolicy,
}

fn indoor_policy() -> FormatPolicy {
    FormatPolicy::builtin(MatchFormat::Indoor)
}

fn t20_policy() -> FormatPolicy {
    FormatPolicy::builtin(MatchFormat::T20)
}

fn odi_policy() -> FormatPolicy {
    FormatPolicy::builtin(MatchFormat::Odi)
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { indoor: indoor_policy(), t20: t20_policy(), odi: odi_policy() }
    }
}

impl ScoringConfig {
    pub fn policy(&self, format: MatchFormat) -> FormatPolicy {
        match format {
            MatchFormat::Indoor => self.indoor,
            MatchFormat::T20 => self.t20,
            MatchFormat::Odi => self.odi,
        }
    }

    /// Parse a (possibly partial) policy table; missing formats keep their
    /// built-in policy.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for format in MatchFormat::ALL {
            self.policy(format)
                .validate()
                .map_err(|reason| ConfigError::Invalid { format: format.code(), reason })?;
        }
        Ok(())
    }
}

/// Load the policy table named by `CRICKET_POLICY_PATH`, falling back to the
/// built-in table when the variable is unset or blank.
pub fn load_from_env() -> Result<ScoringConfig, ConfigError> {
    let Ok(path) = env::var(POLICY_PATH_ENV) else {
        return Ok(ScoringConfig::default());
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(ScoringConfig::default());
    }

    load_from_path(path)
}

pub fn load_from_path(path: &str) -> Result<ScoringConfig, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
    let config = ScoringConfig::from_json(&content)?;
    config.validate()?;
    tracing::info!(path, "loaded scoring policy overrides");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_builtin() {
        let config = ScoringConfig::from_json(
            r#"{"t20":{"oversLimit":10,"inningsCount":2,"minOvers":1,"maxOvers":20,
                "minSquad":2,"maxSquad":11,"defaultSquad":11}}"#,
        )
        .unwrap();
        assert_eq!(config.t20.overs_limit, Some(10));
        assert_eq!(config.odi, FormatPolicy::builtin(MatchFormat::Odi));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = ScoringConfig::default();
        config.indoor.max_squad = 3;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("INDOOR"));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        let config = load_from_path(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config, ScoringConfig::default());

        assert!(matches!(
            load_from_path("/definitely/not/here.json"),
            Err(ConfigError::Read { .. })
        ));
    }
}

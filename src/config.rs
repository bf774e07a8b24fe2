//! Analysis options.
//!
//! Resolution order used by the CLI (highest priority first):
//! 1. command-line flags
//! 2. TOML file passed with `--config`
//! 3. compiled defaults

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TOP_K: usize = 10;

/// Denominator used for the percentage of new routes in a pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewRouteBase {
    /// Route count of the earlier snapshot, the same base as the other three
    /// categories.
    #[default]
    Earlier,
    /// Route count of the later snapshot.
    Later,
}

/// What to do with a record that does not decode into a destination and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Skip the record and keep loading.
    #[default]
    Skip,
    /// Abort the load with `Error::MalformedRecord`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most frequent AS identifiers kept per snapshot summary.
    pub top_k: usize,
    pub new_route_base: NewRouteBase,
    pub malformed_records: RecordPolicy,
}

/// Values set on the command line; `None` keeps what the file or the
/// defaults provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub top_k: Option<usize>,
    pub new_route_base: Option<NewRouteBase>,
    pub malformed_records: Option<RecordPolicy>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            top_k: DEFAULT_TOP_K,
            new_route_base: NewRouteBase::default(),
            malformed_records: RecordPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `overrides` on top of `self` and validates the merged result.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(top_k) = overrides.top_k {
            self.top_k = top_k;
        }
        if let Some(base) = overrides.new_route_base {
            self.new_route_base = base;
        }
        if let Some(policy) = overrides.malformed_records {
            self.malformed_records = policy;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "top_k".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

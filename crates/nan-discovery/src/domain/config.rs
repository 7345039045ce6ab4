//! Discovery engine configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use nan_discovery::domain::{DiscoveryConfigBuilder, MatchRule};
//!
//! let config = DiscoveryConfigBuilder::new()
//!     .max_instances(16)
//!     .match_rule(MatchRule::Positional)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::bloom_filter::MAX_BLOOM_LEN;
use super::match_filter::MatchRule;
use crate::error::{ConfigError, DiscoveryError};

/// Size of the NAN instance-id space
pub const MAX_INSTANCE_IDS: usize = 255;

/// Upper bound of one-byte length fields on the air
const MAX_FIELD_LEN: usize = 255;

/// Per-device discovery configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Publish and Subscribe instances share this budget (1..=255)
    pub max_instances: usize,
    /// How matching filters are compared
    pub match_rule: MatchRule,
    /// Longest service-specific info accepted in params and followups
    pub max_ssi_len: usize,
    /// Longest encoded matching filter accepted in params
    pub max_match_filter_len: usize,
    /// Longest encoded SRF accepted in params
    pub max_srf_len: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_instances: MAX_INSTANCE_IDS,
            match_rule: MatchRule::Intersection,
            max_ssi_len: MAX_FIELD_LEN,
            max_match_filter_len: MAX_FIELD_LEN,
            max_srf_len: MAX_BLOOM_LEN + 1,
        }
    }
}

impl DiscoveryConfig {
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.max_instances == 0 || self.max_instances > MAX_INSTANCE_IDS {
            return Err(DiscoveryError::InvalidConfig(format!(
                "max_instances must be in 1..={}, got {}",
                MAX_INSTANCE_IDS, self.max_instances
            )));
        }

        if self.max_match_filter_len > MAX_FIELD_LEN {
            return Err(DiscoveryError::InvalidConfig(format!(
                "max_match_filter_len cannot exceed {}",
                MAX_FIELD_LEN
            )));
        }

        // control byte plus the largest bitmap
        if self.max_srf_len == 0 || self.max_srf_len > MAX_BLOOM_LEN + 1 {
            return Err(DiscoveryError::InvalidConfig(format!(
                "max_srf_len must be in 1..={}",
                MAX_BLOOM_LEN + 1
            )));
        }

        Ok(())
    }

    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_match_rule(mut self, rule: MatchRule) -> Self {
        self.match_rule = rule;
        self
    }

    pub fn with_max_instances(mut self, max: usize) -> Self {
        self.max_instances = max;
        self
    }
}

/// Builder for [`DiscoveryConfig`] with validation
#[derive(Default)]
pub struct DiscoveryConfigBuilder {
    max_instances: Option<usize>,
    match_rule: Option<MatchRule>,
    max_ssi_len: Option<usize>,
    max_match_filter_len: Option<usize>,
    max_srf_len: Option<usize>,
}

impl DiscoveryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_instances(mut self, max: usize) -> Self {
        self.max_instances = Some(max);
        self
    }

    pub fn match_rule(mut self, rule: MatchRule) -> Self {
        self.match_rule = Some(rule);
        self
    }

    pub fn max_ssi_len(mut self, len: usize) -> Self {
        self.max_ssi_len = Some(len);
        self
    }

    pub fn max_match_filter_len(mut self, len: usize) -> Self {
        self.max_match_filter_len = Some(len);
        self
    }

    pub fn max_srf_len(mut self, len: usize) -> Self {
        self.max_srf_len = Some(len);
        self
    }

    /// Build the config, rejecting out-of-range limits
    pub fn build(self) -> Result<DiscoveryConfig, DiscoveryError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for tests exercising limits)
    pub fn build_unchecked(self) -> DiscoveryConfig {
        let defaults = DiscoveryConfig::default();

        DiscoveryConfig {
            max_instances: self.max_instances.unwrap_or(defaults.max_instances),
            match_rule: self.match_rule.unwrap_or(defaults.match_rule),
            max_ssi_len: self.max_ssi_len.unwrap_or(defaults.max_ssi_len),
            max_match_filter_len: self
                .max_match_filter_len
                .unwrap_or(defaults.max_match_filter_len),
            max_srf_len: self.max_srf_len.unwrap_or(defaults.max_srf_len),
        }
    }
}

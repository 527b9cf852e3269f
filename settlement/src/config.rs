//! Configuration for the settlement engine

use crate::decay::DecayPolicy;
use crate::netting::MAX_OPTIMAL_PARTICIPANTS;
use serde::{Deserialize, Serialize};

/// Settlement engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Netting configuration
    pub netting: NettingConfig,

    /// Inactivity decay policy
    pub decay: DecayPolicy,
}

/// Netting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NettingConfig {
    /// Participant cutoff for the exact partition DP (default: 16)
    ///
    /// The DP is exponential in participant count; this limit may only move
    /// downward from the hard cap of 16.
    pub optimal_partition_limit: usize,
}

impl Default for NettingConfig {
    fn default() -> Self {
        Self {
            optimal_partition_limit: MAX_OPTIMAL_PARTICIPANTS,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(limit) = std::env::var("SETTLEMENT_PARTITION_LIMIT") {
            config.netting.optimal_partition_limit = limit
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid partition limit: {limit}")))?;
        }

        if let Ok(days) = std::env::var("SETTLEMENT_DECAY_AFTER_DAYS") {
            config.decay.decay_after_days = days
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid decay days: {days}")))?;
        }

        if let Ok(days) = std::env::var("SETTLEMENT_DECAY_WARN_DAYS") {
            config.decay.warn_after_days = days
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid warn days: {days}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> crate::Result<()> {
        let limit = self.netting.optimal_partition_limit;
        if limit == 0 || limit > MAX_OPTIMAL_PARTICIPANTS {
            return Err(crate::Error::Config(format!(
                "optimal_partition_limit must be within 1..={MAX_OPTIMAL_PARTICIPANTS}, got {limit}"
            )));
        }

        if self.decay.decay_after_days <= 0 || self.decay.warn_after_days <= 0 {
            return Err(crate::Error::Config(
                "decay thresholds must be positive".to_string(),
            ));
        }

        if self.decay.warn_after_days >= self.decay.decay_after_days {
            return Err(crate::Error::Config(format!(
                "warn_after_days {} must come before decay_after_days {}",
                self.decay.warn_after_days, self.decay.decay_after_days
            )));
        }

        if self.decay.decay_points <= 0 {
            return Err(crate::Error::Config(
                "decay_points must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

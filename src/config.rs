//! Configuration types for the detection engine.

use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for the detection engine.
///
/// Defaults reproduce the stock behavior: all stages enabled, a 70
/// confidence floor for monetization, and a 0.001 USD fallback rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Detection stage settings
    pub detection: DetectionConfig,

    /// Monetization thresholds
    pub thresholds: ThresholdConfig,

    /// Rate applied when neither the site policy nor the signature table
    /// names one
    pub fallback_rate: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            thresholds: ThresholdConfig::default(),
            fallback_rate: "0.001".parse().expect("valid rate literal"),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.monetize_confidence > 100 {
            return Err(ConfigError::InvalidThreshold {
                value: self.thresholds.monetize_confidence,
            });
        }
        if self.fallback_rate.is_sign_negative() {
            return Err(ConfigError::NegativeRate {
                value: self.fallback_rate.to_string(),
            });
        }
        Ok(())
    }
}

/// Detection stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Enable the signature table lookup
    pub signature_lookup: bool,

    /// Enable suspicious-pattern matching
    pub pattern_matching: bool,

    /// Enable heuristic scoring
    pub heuristic_scoring: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            signature_lookup: true,
            pattern_matching: true,
            heuristic_scoring: true,
        }
    }
}

/// Monetization thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum classification confidence for a billable action (0-100)
    pub monetize_confidence: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            monetize_confidence: 70,
        }
    }
}

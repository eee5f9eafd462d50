//! Tunable thresholds for quality assessment and scoring.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "quality": { "max_roll_degrees": 10.0 } }
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub quality: QualityThresholds,
    pub scoring: ScoringConfig,
}

/// Limits beyond which a capture is flagged as unreliable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Maximum absolute head roll in degrees.
    pub max_roll_degrees: f64,
    /// Maximum absolute yaw proxy (nose offset in units of IPD).
    pub max_yaw_proxy: f64,
    /// Minimum inter-pupillary distance in pixels.
    pub min_interpupillary_pixels: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_roll_degrees: 15.0,
            max_yaw_proxy: 0.15,
            min_interpupillary_pixels: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score given to a metric exactly one tolerance away from its ideal.
    pub tolerance_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tolerance_score: 90.0,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading analyzer config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let q = &self.quality;
        if !(q.max_roll_degrees.is_finite() && q.max_roll_degrees > 0.0) {
            return Err(invalid("quality.max_roll_degrees must be positive"));
        }
        if !(q.max_yaw_proxy.is_finite() && q.max_yaw_proxy > 0.0) {
            return Err(invalid("quality.max_yaw_proxy must be positive"));
        }
        if !(q.min_interpupillary_pixels.is_finite() && q.min_interpupillary_pixels >= 0.0) {
            return Err(invalid("quality.min_interpupillary_pixels must not be negative"));
        }
        let s = self.scoring.tolerance_score;
        // Strictly inside (0, 100) so the falloff both decays and never hits zero.
        if !(s.is_finite() && s > 0.0 && s < 100.0) {
            return Err(invalid("scoring.tolerance_score must be between 0 and 100"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_string())
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::radar::geometry::{MAX_RANGE_FRACTION, MIN_RANGE_KM};
use crate::radar::RadarConfig;

const DEFAULT_TICK_MS: u64 = 16; // ~60 FPS
const DEFAULT_LOG_FILE: &str = "radarcon.log";

/// Everything the binary can be configured with. Loaded from JSON, then
/// overridden by command-line flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub radar: RadarConfig,
    pub tick_rate_ms: u64,
    /// Fixed seed for every random source; random when absent.
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub skip_welcome: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            radar: RadarConfig::default(),
            tick_rate_ms: DEFAULT_TICK_MS,
            seed: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            skip_welcome: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let r = &self.radar;
        // targets live in [MIN_RANGE_KM, 0.98 * range]; that band must not be empty
        let min_range = MIN_RANGE_KM / MAX_RANGE_FRACTION;
        if !r.range_km.is_finite() || r.range_km < min_range {
            return Err(ConfigError::Invalid {
                field: "radar.rangeKm",
                reason: format!("must be at least {:.3} km, got {}", min_range, r.range_km),
            });
        }
        if !r.sweep_deg_per_sec.is_finite() {
            return Err(ConfigError::Invalid {
                field: "radar.sweepDegPerSec",
                reason: format!("must be finite, got {}", r.sweep_deg_per_sec),
            });
        }
        if !(0.0..=1.0).contains(&r.noise) {
            return Err(ConfigError::Invalid {
                field: "radar.noise",
                reason: format!("must be within 0..=1, got {}", r.noise),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tickRateMs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

//! Engine configuration.
//!
//! Read from a TOML file by the host application and threaded explicitly
//! into each call; nothing in the crate reads global state. Every key is
//! optional:
//!
//! ```toml
//! [clustering]
//! zone-radius-km = 0.5
//!
//! [directions]
//! max-stops = 25
//! base-url = "http://localhost:5000"
//! profile = "car"
//! timeout-secs = 10
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::directions::DEFAULT_MAX_STOPS;
use crate::optimizer::OptimizeOptions;
use crate::osrm::OsrmConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    pub clustering: ClusteringConfig,
    pub directions: DirectionsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClusteringConfig {
    /// Pickups within this many km of a stop centroid share the stop.
    pub zone_radius_km: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            zone_radius_km: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DirectionsConfig {
    /// Provider stop cap, origin and destination included.
    pub max_stops: usize,
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        let osrm = OsrmConfig::default();
        Self {
            max_stops: DEFAULT_MAX_STOPS,
            base_url: osrm.base_url,
            profile: osrm.profile,
            timeout_secs: osrm.timeout_secs,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the config file at `path`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.clustering.zone_radius_km;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "zone-radius-km must be a non-negative number, got {}",
                radius
            )));
        }
        if self.directions.max_stops < 2 {
            return Err(ConfigError::Invalid(format!(
                "max-stops must be at least 2, got {}",
                self.directions.max_stops
            )));
        }
        if self.directions.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout-secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn optimize_options(&self) -> OptimizeOptions {
        OptimizeOptions {
            zone_radius_km: self.clustering.zone_radius_km,
            max_directions_stops: self.directions.max_stops,
        }
    }

    pub fn osrm_config(&self) -> OsrmConfig {
        OsrmConfig {
            base_url: self.directions.base_url.clone(),
            profile: self.directions.profile.clone(),
            timeout_secs: self.directions.timeout_secs,
        }
    }
}

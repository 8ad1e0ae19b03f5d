//! Configuration loading for Pathik.
//!
//! All tuning lives in one TOML file; every field has a default so a partial
//! file is valid.
//!
//! ## Example TOML
//!
//! ```toml
//! [perception]
//! pixels_per_meter = 10.0
//! navigable_threshold = [160, 160, 160]
//!
//! [map]
//! world_size = 200
//! visit_decay = 100.0
//!
//! [decision]
//! throttle_set = 0.2
//! brake_set = 10.0
//! stop_forward = 50
//! go_forward = 500
//! ```

mod decision;
mod map;
mod perception;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PathikError, Result};

pub use decision::DecisionConfig;
pub use map::MapConfig;
pub use perception::PerceptionConfig;

/// Default configuration file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/pathik.toml";

/// Full Pathik configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PathikConfig {
    /// Camera calibration and classifier thresholds
    #[serde(default)]
    pub perception: PerceptionConfig,

    /// World map and weighting
    #[serde(default)]
    pub map: MapConfig,

    /// Decision state machine tuning
    #[serde(default)]
    pub decision: DecisionConfig,
}

impl PathikConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PathikError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Load from [`DEFAULT_CONFIG_PATH`] if it exists, otherwise use defaults
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PathikConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let p = &self.perception;
        if p.frame_width == 0 || p.frame_height == 0 {
            return Err(PathikError::Config("frame size must be non-zero".into()));
        }
        if p.pixels_per_meter <= 0.0 {
            return Err(PathikError::Config(
                "pixels_per_meter must be positive".into(),
            ));
        }
        if p.dst_half_size <= 0.0 {
            return Err(PathikError::Config("dst_half_size must be positive".into()));
        }

        let m = &self.map;
        if m.world_size == 0 {
            return Err(PathikError::Config("world_size must be non-zero".into()));
        }
        if m.visit_decay <= 0.0 || m.return_decay <= 0.0 {
            return Err(PathikError::Config(
                "visit_decay and return_decay must be positive".into(),
            ));
        }

        let d = &self.decision;
        if d.stop_forward > d.go_forward {
            return Err(PathikError::Config(format!(
                "stop_forward ({}) must not exceed go_forward ({})",
                d.stop_forward, d.go_forward
            )));
        }
        if d.stuck_cycle_ticks == 0 {
            return Err(PathikError::Config(
                "stuck_cycle_ticks must be non-zero".into(),
            ));
        }
        if d.survey_start_tick >= d.survey_period_ticks {
            return Err(PathikError::Config(format!(
                "survey_start_tick ({}) must be below survey_period_ticks ({})",
                d.survey_start_tick, d.survey_period_ticks
            )));
        }
        if d.max_steer <= 0.0 {
            return Err(PathikError::Config("max_steer must be positive".into()));
        }
        Ok(())
    }
}

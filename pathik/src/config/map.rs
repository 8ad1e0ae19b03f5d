//! World map and weighting configuration.

use serde::{Deserialize, Serialize};

/// World map configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Side of the square world grid in cells (default: 200)
    #[serde(default = "default_world_size")]
    pub world_size: usize,

    /// Visit count giving an exploration weight of 1/e (default: 100)
    #[serde(default = "default_visit_decay")]
    pub visit_decay: f32,

    /// Distance to start (cells) giving a return weight of 1/e (default: 2)
    #[serde(default = "default_return_decay")]
    pub return_decay: f32,

    /// Maximum roll/pitch in degrees for the map to accept writes (default: 0.3)
    #[serde(default = "default_attitude_tolerance")]
    pub attitude_tolerance_deg: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            world_size: default_world_size(),
            visit_decay: default_visit_decay(),
            return_decay: default_return_decay(),
            attitude_tolerance_deg: default_attitude_tolerance(),
        }
    }
}

fn default_world_size() -> usize {
    200
}
fn default_visit_decay() -> f32 {
    100.0
}
fn default_return_decay() -> f32 {
    2.0
}
fn default_attitude_tolerance() -> f32 {
    0.3
}

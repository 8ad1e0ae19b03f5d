//! Decision state machine tuning.

use serde::{Deserialize, Serialize};

/// Decision configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Nominal throttle set-point (default: 0.2)
    #[serde(default = "default_throttle_set")]
    pub throttle_set: f32,

    /// Full brake set-point (default: 10)
    #[serde(default = "default_brake_set")]
    pub brake_set: f32,

    /// Speed above which throttle is released to coast (default: 2.0)
    #[serde(default = "default_max_vel")]
    pub max_vel: f32,

    /// Steering limit in degrees, symmetric (default: 15)
    #[serde(default = "default_max_steer")]
    pub max_steer: f32,

    /// Navigable pixel count below which forward driving stops (default: 50)
    #[serde(default = "default_stop_forward")]
    pub stop_forward: usize,

    /// Navigable pixel count needed to drive off from a stop (default: 500)
    #[serde(default = "default_go_forward")]
    pub go_forward: usize,

    /// Speed at or below which a stopped vehicle may turn in place (default: 0.2)
    #[serde(default = "default_stop_speed")]
    pub stop_speed: f32,

    /// Rock pixel count that makes a rock worth chasing (default: 3)
    #[serde(default = "default_toward_rock")]
    pub toward_rock: usize,

    /// Mean rock distance (rectified pixels) below which the approach
    /// slows down (default: 15)
    #[serde(default = "default_stop_dist_rock")]
    pub stop_dist_rock: f32,

    /// Heading error in degrees treated as aimed at the rock (default: 1)
    #[serde(default = "default_rock_aim_tolerance")]
    pub rock_aim_tolerance: f32,

    /// Speed above which the final rock approach brakes (default: 1)
    #[serde(default = "default_rock_approach_speed")]
    pub rock_approach_speed: f32,

    /// Mean absolute speed at or below which the vehicle is stuck (default: 0.2)
    #[serde(default = "default_stuck_speed")]
    pub stuck_speed: f32,

    /// Length of the open-loop escape cycle in ticks (default: 160)
    #[serde(default = "default_stuck_cycle_ticks")]
    pub stuck_cycle_ticks: u64,

    /// Throttle multiplier used while reversing or lunging out (default: 4)
    #[serde(default = "default_stuck_throttle_gain")]
    pub stuck_throttle_gain: f32,

    /// Period of the turn-and-scan survey in ticks (default: 3000)
    #[serde(default = "default_survey_period_ticks")]
    pub survey_period_ticks: u64,

    /// Tick within the period at which the survey starts (default: 2900)
    #[serde(default = "default_survey_start_tick")]
    pub survey_start_tick: u64,

    /// Turn direction during the survey, +1 left or -1 right (default: 1)
    #[serde(default = "default_survey_turn_sign")]
    pub survey_turn_sign: f32,

    /// Fraction of `brake_set` used to slow down for a survey (default: 0.1)
    #[serde(default = "default_survey_brake_factor")]
    pub survey_brake_factor: f32,

    /// Jitter scale relative to the weighted heading magnitude (default: 0.3)
    #[serde(default = "default_jitter_gain")]
    pub jitter_gain: f32,

    /// Seed for the steering jitter, 0 = entropy (default: 0)
    #[serde(default)]
    pub jitter_seed: u64,

    /// Samples to collect before returning home (default: 6)
    #[serde(default = "default_total_samples")]
    pub total_samples: u32,

    /// Distance to start that counts as home, in cells (default: 3)
    #[serde(default = "default_home_radius")]
    pub home_radius: f32,

    /// Length of the velocity history window in ticks (default: 60)
    #[serde(default = "default_velocity_history_len")]
    pub velocity_history_len: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            throttle_set: default_throttle_set(),
            brake_set: default_brake_set(),
            max_vel: default_max_vel(),
            max_steer: default_max_steer(),
            stop_forward: default_stop_forward(),
            go_forward: default_go_forward(),
            stop_speed: default_stop_speed(),
            toward_rock: default_toward_rock(),
            stop_dist_rock: default_stop_dist_rock(),
            rock_aim_tolerance: default_rock_aim_tolerance(),
            rock_approach_speed: default_rock_approach_speed(),
            stuck_speed: default_stuck_speed(),
            stuck_cycle_ticks: default_stuck_cycle_ticks(),
            stuck_throttle_gain: default_stuck_throttle_gain(),
            survey_period_ticks: default_survey_period_ticks(),
            survey_start_tick: default_survey_start_tick(),
            survey_turn_sign: default_survey_turn_sign(),
            survey_brake_factor: default_survey_brake_factor(),
            jitter_gain: default_jitter_gain(),
            jitter_seed: 0,
            total_samples: default_total_samples(),
            home_radius: default_home_radius(),
            velocity_history_len: default_velocity_history_len(),
        }
    }
}

fn default_throttle_set() -> f32 {
    0.2
}
fn default_brake_set() -> f32 {
    10.0
}
fn default_max_vel() -> f32 {
    2.0
}
fn default_max_steer() -> f32 {
    15.0
}
fn default_stop_forward() -> usize {
    50
}
fn default_go_forward() -> usize {
    500
}
fn default_stop_speed() -> f32 {
    0.2
}
fn default_toward_rock() -> usize {
    3
}
fn default_stop_dist_rock() -> f32 {
    15.0
}
fn default_rock_aim_tolerance() -> f32 {
    1.0
}
fn default_rock_approach_speed() -> f32 {
    1.0
}
fn default_stuck_speed() -> f32 {
    0.2
}
fn default_stuck_cycle_ticks() -> u64 {
    160
}
fn default_stuck_throttle_gain() -> f32 {
    4.0
}
fn default_survey_period_ticks() -> u64 {
    3000
}
fn default_survey_start_tick() -> u64 {
    2900
}
fn default_survey_turn_sign() -> f32 {
    1.0
}
fn default_survey_brake_factor() -> f32 {
    0.1
}
fn default_jitter_gain() -> f32 {
    0.3
}
fn default_total_samples() -> u32 {
    6
}
fn default_home_radius() -> f32 {
    3.0
}
fn default_velocity_history_len() -> usize {
    60
}

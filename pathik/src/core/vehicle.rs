//! Vehicle state read and written in place each tick.
//!
//! The surrounding control loop owns [`VehicleState`]. Telemetry fields are
//! written by the telemetry collaborator before a tick; perception outputs and
//! commands are written by the core during the tick; commands are read by the
//! actuation collaborator afterwards.

use std::collections::VecDeque;
use std::fmt;

use super::types::Pose;

/// Drive mode of the decision state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriveMode {
    /// Driving along the weighted heading.
    #[default]
    Forward,
    /// Braking to a halt or turning in place to find open terrain.
    Stop,
    /// Approaching or picking up a sample.
    Sample,
}

impl DriveMode {
    /// Mode name for logging
    pub fn name(&self) -> &'static str {
        match self {
            DriveMode::Forward => "forward",
            DriveMode::Stop => "stop",
            DriveMode::Sample => "sample",
        }
    }
}

impl fmt::Display for DriveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actuation commands produced by a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Commands {
    /// Signed throttle; negative reverses.
    pub throttle: f32,
    /// Brake effort, zero when released.
    pub brake: f32,
    /// Steering angle in degrees, positive = left.
    pub steer: f32,
}

impl Commands {
    /// Clamp steering to `[-max_steer, max_steer]`.
    #[inline]
    pub fn clamp_steer(&mut self, max_steer: f32) {
        self.steer = self.steer.clamp(-max_steer, max_steer);
    }
}

/// Fixed-length ring buffer of recent forward speeds.
#[derive(Clone, Debug)]
pub struct VelocityHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl VelocityHistory {
    /// Create an empty history holding up to `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a full history where every sample equals `speed`.
    pub fn filled(capacity: usize, speed: f32) -> Self {
        let mut history = Self::new(capacity);
        for _ in 0..history.capacity {
            history.push(speed);
        }
        history
    }

    /// Record a speed sample, evicting the oldest once full.
    pub fn push(&mut self, speed: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(speed);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Mean absolute speed over the window.
    ///
    /// Returns `None` until the window has filled, so a vehicle that has just
    /// started is never judged stuck on a partial history.
    pub fn window_mean_abs(&self) -> Option<f32> {
        if !self.is_full() {
            return None;
        }
        let sum: f32 = self.samples.iter().map(|v| v.abs()).sum();
        Some(sum / self.samples.len() as f32)
    }
}

/// Monotonic tick counters for the periodic behaviours.
///
/// The two counters are independent: `stuck` advances only on ticks spent in
/// the stuck recovery cycle, `survey` advances on every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickCounters {
    pub stuck: u64,
    pub survey: u64,
}

/// Perception results published to the decision machine.
#[derive(Clone, Debug, Default)]
pub struct PerceptionOutputs {
    /// Distance of each navigable pixel from the vehicle origin (pixels).
    pub nav_dists: Vec<f32>,
    /// Heading of each navigable pixel (radians).
    pub nav_angles: Vec<f32>,
    /// Exploration weights aligned with `nav_angles`; `None` when they
    /// could not be normalised.
    pub nav_weights: Option<Vec<f32>>,
    /// Return-to-start weights aligned with `nav_angles`.
    pub return_weights: Option<Vec<f32>>,
    /// Distances of the most recently seen rock pixels.
    pub rock_dists: Vec<f32>,
    /// Headings of the most recently seen rock pixels, cleared once acted on.
    pub rock_angles: Option<Vec<f32>>,
}

impl PerceptionOutputs {
    /// Number of navigable pixels seen this tick.
    #[inline]
    pub fn nav_count(&self) -> usize {
        self.nav_angles.len()
    }

    /// Number of rock headings still pending.
    #[inline]
    pub fn rock_count(&self) -> usize {
        self.rock_angles.as_ref().map_or(0, Vec::len)
    }

    /// Forget the rock headings once a steering decision has used them.
    pub fn clear_rock_angles(&mut self) {
        self.rock_angles = None;
    }

    /// Forget all rock state.
    pub fn clear_rock(&mut self) {
        self.rock_angles = None;
        self.rock_dists.clear();
    }
}

/// Per-vehicle state passed by mutable reference into every tick.
#[derive(Clone, Debug)]
pub struct VehicleState {
    /// Current pose (telemetry).
    pub pose: Pose,
    /// Current forward speed (telemetry).
    pub vel: f32,
    /// Rolling speed history used for stall detection.
    pub vel_history: VelocityHistory,
    /// Output commands for this tick.
    pub commands: Commands,
    /// Decision machine mode.
    pub mode: DriveMode,
    /// Periodic behaviour counters.
    pub counters: TickCounters,
    /// Perception results for the decision machine.
    pub perception: PerceptionOutputs,
    /// Vehicle is close enough to a sample to pick it up (telemetry).
    pub near_sample: bool,
    /// A pickup is in progress (telemetry).
    pub picking_up: bool,
    /// Pickup request; raised by the core, cleared by the actuation collaborator.
    pub send_pickup: bool,
    /// Samples collected so far (telemetry).
    pub samples_collected: u32,
    start_pos: (f32, f32),
    mission_complete: bool,
}

impl VehicleState {
    /// Create the state at mission start; `start` fixes the home position.
    pub fn new(start: Pose, history_len: usize) -> Self {
        Self {
            pose: start,
            vel: 0.0,
            vel_history: VelocityHistory::new(history_len),
            commands: Commands::default(),
            mode: DriveMode::Forward,
            counters: TickCounters::default(),
            perception: PerceptionOutputs::default(),
            near_sample: false,
            picking_up: false,
            send_pickup: false,
            samples_collected: 0,
            start_pos: start.position(),
            mission_complete: false,
        }
    }

    /// Mission start position; fixed for the lifetime of the state.
    #[inline]
    pub fn start_pos(&self) -> (f32, f32) {
        self.start_pos
    }

    /// Distance from the current position to the start position.
    #[inline]
    pub fn distance_to_start(&self) -> f32 {
        self.pose.distance_to(self.start_pos)
    }

    /// Write a telemetry sample.
    pub fn set_telemetry(&mut self, pose: Pose, vel: f32) {
        self.pose = pose;
        self.vel = vel;
    }

    /// Record the current speed in the rolling history.
    pub fn record_velocity(&mut self) {
        self.vel_history.push(self.vel);
    }

    /// Called by the actuation collaborator once a pickup request is acted on.
    pub fn acknowledge_pickup(&mut self) {
        self.send_pickup = false;
    }

    /// True once the vehicle has returned home with every sample.
    #[inline]
    pub fn mission_complete(&self) -> bool {
        self.mission_complete
    }

    /// Latch mission completion; returns true only on the first call.
    pub(crate) fn mark_mission_complete(&mut self) -> bool {
        !std::mem::replace(&mut self.mission_complete, true)
    }
}

//! # Pathik
//!
//! Per-tick perception and control core for a sample-collecting rover.
//!
//! ## Overview
//!
//! Every tick takes one forward-facing camera frame plus telemetry and
//! produces throttle, brake and steering commands:
//!
//! - **Rectify** - warp the frame to a top-down view with a fixed calibration
//! - **Classify** - threshold pixels into navigable, border and rock masks
//! - **Transform** - move pixels into vehicle polar and world grid coordinates
//! - **Map** - accumulate evidence and visit counts in a persistent grid
//! - **Decide** - run the drive-mode state machine on the results
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pathik::{PathikConfig, Pose, RoverCore, VehicleState};
//!
//! let config = PathikConfig::load_default()?;
//! let mut core = RoverCore::new(config.clone())?;
//! let mut vehicle = VehicleState::new(Pose::new(99.7, 85.6, 0.0), 60);
//!
//! vehicle.set_telemetry(pose, speed);
//! let report = core.step(&mut vehicle, &frame)?;
//! println!("{:?} -> {:?}", report.branch, vehicle.commands);
//! ```
//!
//! ## Coordinate System
//!
//! - Vehicle frame: x forward, y left, in rectified pixels
//! - World frame: grid cells of one meter, yaw in degrees CCW
//! - Steering: degrees, positive to the left, clamped to ±15

// Core types
pub mod core;

// Configuration
pub mod config;

// Error type
pub mod error;

// Frame classification and coordinate transforms
pub mod perception;

// World map accumulator and weights
pub mod map;

// Drive-mode state machine
pub mod decision;

// Per-tick driver
pub mod rover;

pub use config::{DecisionConfig, MapConfig, PathikConfig, PerceptionConfig};
pub use crate::core::{
    Commands, DriveMode, GridCoord, PerceptionOutputs, Pose, TickCounters, VehicleState,
    VelocityHistory,
};
pub use decision::{
    Branch, DecisionMaker, DecisionOutcome, FixedJitter, GaussianJitter, SteerJitter, StuckPhase,
};
pub use error::{PathikError, Result};
pub use map::{MapCoverage, WorldMap};
pub use perception::{Rectifier, TerrainMasks, TerrainThresholds};
pub use rover::{RoverCore, TickReport};

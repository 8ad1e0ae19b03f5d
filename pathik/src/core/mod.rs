//! Core types shared by perception, mapping and decision making.
//!
//! ## Coordinate Frames
//!
//! - **Image**: row/column pixel indices, origin at the top-left.
//! - **Vehicle**: origin at the rear-centre of the rectified view, X forward,
//!   Y to the left, units of rectified pixels.
//! - **World grid**: integer cells of the persistent map; one cell covers one
//!   meter, so vehicle positions in meters index the grid directly.
//!
//! Angles in telemetry (yaw, roll, pitch) are degrees in `[0, 360)`.
//! Angles produced by perception are signed radians, 0 = straight ahead,
//! positive = left.

mod types;
mod vehicle;

pub use types::{GridCoord, Pose};
pub use vehicle::{
    Commands, DriveMode, PerceptionOutputs, TickCounters, VehicleState, VelocityHistory,
};

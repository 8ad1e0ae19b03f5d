//! Pose and grid coordinate types.

use serde::{Deserialize, Serialize};

/// Vehicle pose in the world frame.
///
/// Position is in meters (equivalently world-grid cells), angles in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub yaw: f32,
    pub roll: f32,
    pub pitch: f32,
}

impl Pose {
    /// Create a level pose at the given position and heading.
    pub fn new(x: f32, y: f32, yaw: f32) -> Self {
        Self {
            x,
            y,
            yaw,
            roll: 0.0,
            pitch: 0.0,
        }
    }

    /// Set roll and pitch (degrees).
    pub fn with_attitude(mut self, roll: f32, pitch: f32) -> Self {
        self.roll = roll;
        self.pitch = pitch;
        self
    }

    /// Position as an `(x, y)` tuple.
    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Euclidean distance between this pose's position and a point.
    #[inline]
    pub fn distance_to(&self, point: (f32, f32)) -> f32 {
        let dx = self.x - point.0;
        let dy = self.y - point.1;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both roll and pitch are within `tolerance` degrees of level.
    ///
    /// Telemetry reports angles in `[0, 360)`, so "near zero" also covers
    /// values just below 360.
    pub fn is_level(&self, tolerance: f32) -> bool {
        near_zero_degrees(self.roll, tolerance) && near_zero_degrees(self.pitch, tolerance)
    }
}

#[inline]
fn near_zero_degrees(angle: f32, tolerance: f32) -> bool {
    angle < tolerance || angle > 360.0 - tolerance
}

/// Integer world-grid cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in cells to a world point.
    #[inline]
    pub fn distance_to(&self, point: (f32, f32)) -> f32 {
        let dx = self.x as f32 - point.0;
        let dy = self.y as f32 - point.1;
        (dx * dx + dy * dy).sqrt()
    }
}

//! Coordinate transforms: image → vehicle → polar / world grid.

use super::mask::Mask;
use crate::core::{GridCoord, Pose};

/// Vehicle-centric pixel coordinates in SoA layout.
///
/// Origin at the rear-centre of the rectified view, X forward, Y left.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelCloud {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

impl PixelCloud {
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Polar coordinates in the vehicle frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolarCloud {
    /// Distance from the vehicle origin (rectified pixels)
    pub dists: Vec<f32>,
    /// Heading in radians, 0 ahead, positive left
    pub angles: Vec<f32>,
}

impl PolarCloud {
    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub(crate) fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

/// Vehicle-centric coordinates of every set pixel, in row-major order.
pub fn vehicle_coords(mask: &Mask) -> PixelCloud {
    let height = mask.height() as f32;
    let half_width = mask.width() as f32 / 2.0;

    let mut cloud = PixelCloud::default();
    for (col, row) in mask.iter_set() {
        cloud.xs.push(height - row as f32);
        cloud.ys.push(half_width - col as f32);
    }
    cloud
}

/// Convert vehicle-centric coordinates to (distance, angle).
pub fn to_polar(cloud: &PixelCloud) -> PolarCloud {
    let (dists, angles) = cloud
        .xs
        .iter()
        .zip(cloud.ys.iter())
        .map(|(&x, &y)| ((x * x + y * y).sqrt(), y.atan2(x)))
        .unzip();
    PolarCloud { dists, angles }
}

/// Rotate a vehicle-frame point by `yaw_deg`.
#[inline]
pub fn rotate(x: f32, y: f32, yaw_deg: f32) -> (f32, f32) {
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Scale a rotated point from pixels to meters and offset by the vehicle position.
#[inline]
pub fn translate(x: f32, y: f32, pos_x: f32, pos_y: f32, pixels_per_meter: f32) -> (f32, f32) {
    (x / pixels_per_meter + pos_x, y / pixels_per_meter + pos_y)
}

/// Map vehicle-centric pixels to world-grid cells.
///
/// Coordinates are truncated toward zero after translation, then clipped to
/// `[0, world_size - 1]`; out-of-range points land on the grid edge.
pub fn to_world(
    cloud: &PixelCloud,
    pose: &Pose,
    world_size: usize,
    pixels_per_meter: f32,
) -> Vec<GridCoord> {
    let max = world_size.saturating_sub(1) as i32;
    cloud
        .xs
        .iter()
        .zip(cloud.ys.iter())
        .map(|(&x, &y)| {
            let (xr, yr) = rotate(x, y, pose.yaw);
            let (xt, yt) = translate(xr, yr, pose.x, pose.y, pixels_per_meter);
            GridCoord::new((xt as i32).clamp(0, max), (yt as i32).clamp(0, max))
        })
        .collect()
}

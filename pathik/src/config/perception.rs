//! Camera calibration and classifier thresholds.

use serde::{Deserialize, Serialize};

/// Perception configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Camera frame width in pixels (default: 320)
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,

    /// Camera frame height in pixels (default: 160)
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,

    /// Trapezoid in the camera frame covering a known patch of flat ground,
    /// ordered bottom-left, bottom-right, top-right, top-left
    #[serde(default = "default_source_points")]
    pub source_points: [[f32; 2]; 4],

    /// Half the side of the destination square in rectified pixels (default: 5)
    #[serde(default = "default_dst_half_size")]
    pub dst_half_size: f32,

    /// Gap between the destination square and the image bottom (default: 6)
    #[serde(default = "default_bottom_offset")]
    pub bottom_offset: f32,

    /// Rectified pixels per world meter (default: 10)
    #[serde(default = "default_pixels_per_meter")]
    pub pixels_per_meter: f32,

    /// Navigable iff every channel is strictly above this (default: 160,160,160)
    #[serde(default = "default_navigable_threshold")]
    pub navigable_threshold: [u8; 3],

    /// Fill colour for pixels outside the camera footprint (default: 0,255,255)
    #[serde(default = "default_border_color")]
    pub border_color: [u8; 3],

    /// Rock iff red and green above, blue below these (default: 100,100,50)
    #[serde(default = "default_rock_threshold")]
    pub rock_threshold: [u8; 3],
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
            source_points: default_source_points(),
            dst_half_size: default_dst_half_size(),
            bottom_offset: default_bottom_offset(),
            pixels_per_meter: default_pixels_per_meter(),
            navigable_threshold: default_navigable_threshold(),
            border_color: default_border_color(),
            rock_threshold: default_rock_threshold(),
        }
    }
}

impl PerceptionConfig {
    /// Destination square matching `source_points`, centred horizontally and
    /// resting `bottom_offset` pixels above the bottom of the frame.
    pub fn destination_points(&self) -> [[f32; 2]; 4] {
        let cx = self.frame_width as f32 / 2.0;
        let bottom = self.frame_height as f32 - self.bottom_offset;
        let top = bottom - 2.0 * self.dst_half_size;
        let s = self.dst_half_size;
        [
            [cx - s, bottom],
            [cx + s, bottom],
            [cx + s, top],
            [cx - s, top],
        ]
    }
}

fn default_frame_width() -> u32 {
    320
}
fn default_frame_height() -> u32 {
    160
}
fn default_source_points() -> [[f32; 2]; 4] {
    [[14.0, 140.0], [301.0, 140.0], [200.0, 96.0], [118.0, 96.0]]
}
fn default_dst_half_size() -> f32 {
    5.0
}
fn default_bottom_offset() -> f32 {
    6.0
}
fn default_pixels_per_meter() -> f32 {
    10.0
}
fn default_navigable_threshold() -> [u8; 3] {
    [160, 160, 160]
}
fn default_border_color() -> [u8; 3] {
    [0, 255, 255]
}
fn default_rock_threshold() -> [u8; 3] {
    [100, 100, 50]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_points() {
        let config = PerceptionConfig::default();
        let dst = config.destination_points();
        assert_eq!(dst[0], [155.0, 154.0]);
        assert_eq!(dst[1], [165.0, 154.0]);
        assert_eq!(dst[2], [165.0, 144.0]);
        assert_eq!(dst[3], [155.0, 144.0]);
    }
}

//! Per-pixel terrain classification of the rectified view.
//!
//! A single global colour threshold separates light ground from everything
//! else, so a light-coloured obstacle reads as navigable.

use image::RgbImage;

use super::mask::Mask;
use crate::config::PerceptionConfig;

/// Colour thresholds for the three pixel classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainThresholds {
    /// Navigable iff every channel is strictly above.
    pub navigable: [u8; 3],
    /// Border iff the pixel equals this colour exactly.
    pub border: [u8; 3],
    /// Rock iff red > [0], green > [1] and blue < [2].
    pub rock: [u8; 3],
}

impl Default for TerrainThresholds {
    fn default() -> Self {
        Self::from(&PerceptionConfig::default())
    }
}

impl From<&PerceptionConfig> for TerrainThresholds {
    fn from(config: &PerceptionConfig) -> Self {
        Self {
            navigable: config.navigable_threshold,
            border: config.border_color,
            rock: config.rock_threshold,
        }
    }
}

/// Masks produced by [`classify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainMasks {
    pub navigable: Mask,
    pub border: Mask,
    pub rock: Mask,
}

impl TerrainMasks {
    /// Obstacle pixels: everything that is not navigable.
    ///
    /// Border pixels are included, since nothing is known to be free there.
    pub fn obstacle(&self) -> Mask {
        self.navigable.not()
    }
}

/// Pixels whose three channels all exceed `threshold`.
pub fn navigable_mask(img: &RgbImage, threshold: [u8; 3]) -> Mask {
    Mask::from_fn(img.width(), img.height(), |col, row| {
        let [r, g, b] = img.get_pixel(col, row).0;
        r > threshold[0] && g > threshold[1] && b > threshold[2]
    })
}

/// Pixels exactly equal to the out-of-footprint fill colour.
pub fn border_mask(img: &RgbImage, color: [u8; 3]) -> Mask {
    Mask::from_fn(img.width(), img.height(), |col, row| {
        img.get_pixel(col, row).0 == color
    })
}

/// Yellow-orange sample-rock pixels: bright red and green, little blue.
pub fn rock_mask(img: &RgbImage, threshold: [u8; 3]) -> Mask {
    Mask::from_fn(img.width(), img.height(), |col, row| {
        let [r, g, b] = img.get_pixel(col, row).0;
        r > threshold[0] && g > threshold[1] && b < threshold[2]
    })
}

/// Classify every pixel of a rectified image.
pub fn classify(img: &RgbImage, thresholds: &TerrainThresholds) -> TerrainMasks {
    TerrainMasks {
        navigable: navigable_mask(img, thresholds.navigable),
        border: border_mask(img, thresholds.border),
        rock: rock_mask(img, thresholds.rock),
    }
}

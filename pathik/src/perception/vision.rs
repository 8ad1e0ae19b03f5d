//! Diagnostic vision image composed from the terrain masks.

use image::{Rgb, RgbImage};

use super::classify::TerrainMasks;

/// Compose the vision image shown next to the camera feed.
///
/// Red marks obstacles, green rocks, blue navigable ground; pixels outside the
/// camera footprint are black.
pub fn vision_image(masks: &TerrainMasks) -> RgbImage {
    let (width, height) = (masks.navigable.width(), masks.navigable.height());
    RgbImage::from_fn(width, height, |col, row| {
        if masks.border.get(col, row) {
            return Rgb([0, 0, 0]);
        }
        let navigable = masks.navigable.get(col, row);
        Rgb([
            if navigable { 0 } else { 255 },
            if masks.rock.get(col, row) { 255 } else { 0 },
            if navigable { 255 } else { 0 },
        ])
    })
}

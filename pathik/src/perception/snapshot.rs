//! Single-tick perception snapshot.

use image::RgbImage;

use super::classify::{TerrainMasks, TerrainThresholds, classify};
use super::transform::{PixelCloud, PolarCloud, to_polar, to_world, vehicle_coords};
use crate::core::{GridCoord, Pose};

/// One pixel class seen from the vehicle and placed in the world.
///
/// All three vectors are aligned: index `i` refers to the same pixel.
#[derive(Clone, Debug, Default)]
pub struct ClassView {
    pub vehicle: PixelCloud,
    pub polar: PolarCloud,
    pub world: Vec<GridCoord>,
}

impl ClassView {
    fn build(mask: &super::mask::Mask, pose: &Pose, world_size: usize, scale: f32) -> Self {
        let vehicle = vehicle_coords(mask);
        let polar = to_polar(&vehicle);
        let world = to_world(&vehicle, pose, world_size, scale);
        Self {
            vehicle,
            polar,
            world,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.world.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}

/// Everything perception derived from one rectified frame.
///
/// Rebuilt from scratch every tick and never persisted.
#[derive(Clone, Debug)]
pub struct PerceptionSnapshot {
    pub masks: TerrainMasks,
    pub navigable: ClassView,
    /// World cells of obstacle pixels
    pub obstacle_world: Vec<GridCoord>,
    /// Rock pixels, `None` when no rock was seen
    pub rock: Option<ClassView>,
}

/// Classify a rectified view and place every pixel class in the world.
pub fn perceive(
    rectified: &RgbImage,
    pose: &Pose,
    thresholds: &TerrainThresholds,
    world_size: usize,
    pixels_per_meter: f32,
) -> PerceptionSnapshot {
    let masks = classify(rectified, thresholds);

    let navigable = ClassView::build(&masks.navigable, pose, world_size, pixels_per_meter);

    let rock = masks
        .rock
        .any()
        .then(|| ClassView::build(&masks.rock, pose, world_size, pixels_per_meter));

    let obstacle_world = to_world(
        &vehicle_coords(&masks.obstacle()),
        pose,
        world_size,
        pixels_per_meter,
    );

    PerceptionSnapshot {
        masks,
        navigable,
        obstacle_world,
        rock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_perceive_partitions_pixels() {
        // Left half ground, right half rock, one border pixel
        let mut img = RgbImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                Rgb([200, 200, 200])
            } else {
                Rgb([150, 140, 10])
            }
        });
        img.put_pixel(19, 9, Rgb([0, 255, 255]));

        let pose = Pose::new(50.0, 50.0, 0.0);
        let snapshot = perceive(&img, &pose, &TerrainThresholds::default(), 200, 10.0);

        assert_eq!(snapshot.navigable.len(), 100);
        assert_eq!(snapshot.obstacle_world.len(), 100);
        assert_eq!(snapshot.masks.border.count(), 1);

        let rock = snapshot.rock.expect("rock pixels present");
        assert_eq!(rock.len(), 99);
        // Rock is on the right, so every rock heading is non-positive
        assert!(rock.polar.angles.iter().all(|&a| a <= 0.0));
        // Ground is on the left
        assert!(snapshot.navigable.polar.angles.iter().all(|&a| a > 0.0));
    }

    #[test]
    fn test_perceive_without_rock() {
        let img = RgbImage::from_pixel(8, 8, Rgb([200, 200, 200]));
        let snapshot = perceive(
            &img,
            &Pose::default(),
            &TerrainThresholds::default(),
            200,
            10.0,
        );
        assert!(snapshot.rock.is_none());
        assert!(snapshot.obstacle_world.is_empty());
        assert_eq!(snapshot.navigable.polar.len(), 64);
    }
}

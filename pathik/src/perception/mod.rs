//! Camera perception pipeline.
//!
//! Each tick the raw frame flows through:
//!
//! ```text
//!   RgbImage ──warp──▶ rectified top-down view
//!            ──classify──▶ TerrainMasks (navigable / border / rock)
//!            ──vehicle_coords──▶ PixelCloud (x forward, y left)
//!            ──to_polar / to_world──▶ PolarCloud, GridCoord lists
//! ```
//!
//! Everything here is a pure function of its inputs; the only state is the
//! calibrated [`Rectifier`], built once.

mod classify;
mod mask;
mod rectify;
mod snapshot;
pub(crate) mod transform;
mod vision;

pub use classify::{
    TerrainMasks, TerrainThresholds, border_mask, classify, navigable_mask, rock_mask,
};
pub use mask::Mask;
pub use rectify::{Rectifier, perspective_transform};
pub use snapshot::{ClassView, PerceptionSnapshot, perceive};
pub use transform::{
    PixelCloud, PolarCloud, rotate, to_polar, to_world, translate, vehicle_coords,
};
pub use vision::vision_image;

//! Persistent world map and confidence weighting.
//!
//! The map keeps three evidence channels (obstacle, rock, navigable) plus a
//! visitation counter per cell, all in separate arrays:
//!
//! ```text
//! obstacle:  [O O O O O O O O ...]
//! rock:      [R R R R R R R R ...]
//! navigable: [N N N N N N N N ...]
//! visits:    [V V V V V V V V ...]   (u32, never decreases)
//! ```
//!
//! Writes only happen when the attitude gate in [`integrate`] passes; the
//! weights in [`weights`] are derived every tick regardless.

mod storage;
mod update;
pub mod weights;

pub use storage::{CHANNEL_MAX, MapCoverage, WorldMap};
pub use update::{MapUpdate, integrate, update_allowed};
pub use weights::{exploration_weights, return_weights, weighted_heading_deg};

//! Gated integration of a perception snapshot into the world map.

use tracing::debug;

use super::storage::WorldMap;
use crate::core::{GridCoord, VehicleState};
use crate::perception::PerceptionSnapshot;

/// Result of integrating one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapUpdate {
    /// False when the attitude/pickup gate suppressed the write.
    pub applied: bool,
    /// Distinct cells marked obstacle
    pub cells_obstacle: usize,
    /// Distinct cells marked rock
    pub cells_rock: usize,
    /// Distinct cells marked navigable (and visited)
    pub cells_navigable: usize,
}

/// Whether the map may be written this tick.
///
/// The rectified geometry is only valid while the vehicle is level, and the
/// frame is irrelevant while it sits still for a pickup.
pub fn update_allowed(vehicle: &VehicleState, attitude_tolerance_deg: f32) -> bool {
    vehicle.pose.is_level(attitude_tolerance_deg) && !vehicle.picking_up
}

/// Write obstacle, rock and navigable evidence for one tick.
///
/// Channels are written in that order so navigable evidence wins over
/// obstacle evidence in the same cell. Each navigable cell gains exactly one
/// visit per tick no matter how many pixels land in it.
pub fn integrate(
    map: &mut WorldMap,
    snapshot: &PerceptionSnapshot,
    vehicle: &VehicleState,
    attitude_tolerance_deg: f32,
) -> MapUpdate {
    if !update_allowed(vehicle, attitude_tolerance_deg) {
        debug!(
            "Map update suppressed: roll={:.2}° pitch={:.2}° picking_up={}",
            vehicle.pose.roll, vehicle.pose.pitch, vehicle.picking_up
        );
        return MapUpdate::default();
    }

    let mut result = MapUpdate {
        applied: true,
        ..Default::default()
    };

    for idx in distinct_cells(map, &snapshot.obstacle_world) {
        let coord = cell_at(map, idx);
        if map.mark_obstacle(coord) {
            result.cells_obstacle += 1;
        }
    }

    if let Some(rock) = &snapshot.rock {
        for idx in distinct_cells(map, &rock.world) {
            let coord = cell_at(map, idx);
            if map.mark_rock(coord) {
                result.cells_rock += 1;
            }
        }
    }

    for idx in distinct_cells(map, &snapshot.navigable.world) {
        let coord = cell_at(map, idx);
        if map.mark_navigable(coord) {
            result.cells_navigable += 1;
        }
    }

    result
}

/// Sorted, de-duplicated linear indices of in-bounds cells.
fn distinct_cells(map: &WorldMap, cells: &[GridCoord]) -> Vec<usize> {
    let mut indices: Vec<usize> = cells.iter().filter_map(|&c| map.index(c)).collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

#[inline]
fn cell_at(map: &WorldMap, idx: usize) -> GridCoord {
    let size = map.size();
    GridCoord::new((idx % size) as i32, (idx / size) as i32)
}

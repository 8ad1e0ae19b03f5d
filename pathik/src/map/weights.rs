//! Per-pixel confidence weights for steering.
//!
//! Both weightings are exponential decays normalised to sum to one over the
//! tick's navigable pixels:
//!
//! - exploration: `exp(-visits / visit_decay)`, favouring ground seen less often
//! - return: `exp(-distance_to_start / return_decay)`, favouring ground nearer home
//!
//! The decision machine turns them into a heading with
//! [`weighted_heading_deg`]: `Σ wᵢ · angleᵢ` in degrees.

use super::storage::WorldMap;
use crate::core::GridCoord;

/// Exploration weights for navigable world cells.
///
/// Reads visit counts after this tick's map update. Returns `None` for an
/// empty pixel set.
pub fn exploration_weights(map: &WorldMap, cells: &[GridCoord], visit_decay: f32) -> Option<Vec<f32>> {
    let decay = visit_decay as f64;
    normalized_exp(cells.iter().map(|&c| -(map.visits(c) as f64) / decay))
}

/// Return-to-start weights for navigable world cells.
pub fn return_weights(cells: &[GridCoord], start: (f32, f32), return_decay: f32) -> Option<Vec<f32>> {
    let decay = return_decay as f64;
    normalized_exp(cells.iter().map(|c| -(c.distance_to(start) as f64) / decay))
}

/// Normalise `exp(x)` over the inputs so the result sums to one.
///
/// The largest exponent is subtracted first; this leaves the normalised
/// result unchanged while keeping far-away pixels from underflowing to an
/// all-zero set. `None` if the set is empty or the sum is not a positive
/// finite number.
fn normalized_exp(exponents: impl Iterator<Item = f64>) -> Option<Vec<f32>> {
    let exponents: Vec<f64> = exponents.collect();
    let max = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return None;
    }

    let raw: Vec<f64> = exponents.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = raw.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }

    Some(raw.iter().map(|&w| (w / sum) as f32).collect())
}

/// Weighted mean heading in degrees.
///
/// Missing weights mean no steering bias, i.e. straight ahead.
pub fn weighted_heading_deg(weights: Option<&[f32]>, angles: &[f32]) -> f32 {
    let Some(weights) = weights else {
        return 0.0;
    };
    debug_assert_eq!(weights.len(), angles.len());
    weights
        .iter()
        .zip(angles.iter())
        .map(|(&w, &a)| w * a.to_degrees())
        .sum()
}

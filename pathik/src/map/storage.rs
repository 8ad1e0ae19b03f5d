//! World map storage.

use image::{Rgb, RgbImage};

use crate::core::GridCoord;

/// Value written to a channel when evidence is recorded.
pub const CHANNEL_MAX: u8 = 255;

/// Cell counts per evidence channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapCoverage {
    pub obstacle: usize,
    pub rock: usize,
    pub navigable: usize,
    pub visited: usize,
}

impl MapCoverage {
    /// Fraction of `total` cells holding obstacle or navigable evidence.
    pub fn known_fraction(&self, total: usize) -> f32 {
        if total == 0 {
            0.0
        } else {
            (self.obstacle + self.navigable) as f32 / total as f32
        }
    }
}

/// Square world grid with obstacle, rock and navigable channels and a
/// visitation count.
///
/// Cell (x, y) is stored at `y * size + x`.
#[derive(Clone, Debug)]
pub struct WorldMap {
    size: usize,
    obstacle: Vec<u8>,
    rock: Vec<u8>,
    navigable: Vec<u8>,
    visits: Vec<u32>,
}

impl WorldMap {
    /// Create an all-zero map of `size` × `size` cells.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            obstacle: vec![0; cells],
            rock: vec![0; cells],
            navigable: vec![0; cells],
            visits: vec![0; cells],
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Linear index of a coordinate, `None` outside the grid.
    #[inline]
    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    #[inline]
    pub fn obstacle(&self, coord: GridCoord) -> u8 {
        self.index(coord).map_or(0, |i| self.obstacle[i])
    }

    #[inline]
    pub fn rock(&self, coord: GridCoord) -> u8 {
        self.index(coord).map_or(0, |i| self.rock[i])
    }

    #[inline]
    pub fn navigable(&self, coord: GridCoord) -> u8 {
        self.index(coord).map_or(0, |i| self.navigable[i])
    }

    /// Number of ticks this cell was seen navigable.
    #[inline]
    pub fn visits(&self, coord: GridCoord) -> u32 {
        self.index(coord).map_or(0, |i| self.visits[i])
    }

    /// Raw visitation counts.
    pub fn visit_counts(&self) -> &[u32] {
        &self.visits
    }

    /// Record obstacle evidence.
    pub fn mark_obstacle(&mut self, coord: GridCoord) -> bool {
        self.index(coord)
            .map(|i| self.obstacle[i] = CHANNEL_MAX)
            .is_some()
    }

    /// Record rock evidence.
    pub fn mark_rock(&mut self, coord: GridCoord) -> bool {
        self.index(coord).map(|i| self.rock[i] = CHANNEL_MAX).is_some()
    }

    /// Record navigable evidence; clears obstacle evidence for the cell and
    /// counts one visit.
    pub fn mark_navigable(&mut self, coord: GridCoord) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.navigable[i] = CHANNEL_MAX;
                self.obstacle[i] = 0;
                self.visits[i] = self.visits[i].saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Count cells per channel.
    pub fn coverage(&self) -> MapCoverage {
        MapCoverage {
            obstacle: self.obstacle.iter().filter(|&&v| v > 0).count(),
            rock: self.rock.iter().filter(|&&v| v > 0).count(),
            navigable: self.navigable.iter().filter(|&&v| v > 0).count(),
            visited: self.visits.iter().filter(|&&v| v > 0).count(),
        }
    }

    /// Render the evidence channels as red (obstacle), green (rock) and
    /// blue (navigable), with +y pointing up the image.
    pub fn to_image(&self) -> RgbImage {
        let side = self.size as u32;
        RgbImage::from_fn(side, side, |col, row| {
            let i = (self.size - 1 - row as usize) * self.size + col as usize;
            Rgb([self.obstacle[i], self.rock[i], self.navigable[i]])
        })
    }
}

//! Boolean per-pixel masks.

/// Row-major boolean mask with the same dimensions as the image it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Create an all-false mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; (width * height) as usize],
        }
    }

    /// Build a mask by evaluating `f(column, row)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut data = Vec::with_capacity((width * height) as usize);
        for row in 0..height {
            for col in 0..width {
                data.push(f(col, row));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        (row * self.width + col) as usize
    }

    /// Value at (column, row); false outside the mask.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> bool {
        col < self.width && row < self.height && self.data[self.index(col, row)]
    }

    /// Set the value at (column, row); ignored outside the mask.
    #[inline]
    pub fn set(&mut self, col: u32, row: u32, value: bool) {
        if col < self.width && row < self.height {
            let idx = self.index(col, row);
            self.data[idx] = value;
        }
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if any pixel is set.
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// Logical complement.
    pub fn not(&self) -> Mask {
        Mask {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| !v).collect(),
        }
    }

    /// Set pixels as (column, row) in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| (i as u32 % width, i as u32 / width))
    }
}

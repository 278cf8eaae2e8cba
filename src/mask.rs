//! Coverage mask: which pixels a shape touches
//!
//! The polyline rasterizer stamps into a mask instead of the pixel buffer so that
//! every covered pixel is blended exactly once, no matter how many segments or
//! brush stamps overlap it.

/// Dense boolean grid sized to a bitmap.
/// Writes outside `[0, width) x [0, height)` are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMask {
    cells: Vec<bool>,
    width: u32,
    height: u32,
}

impl CoverageMask {
    /// Create an empty mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![false; width as usize * height as usize],
            width,
            height,
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
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    #[inline]
    fn cell_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Mark a cell (bounds checked)
    #[inline]
    pub fn mark(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let idx = self.cell_index(x as u32, y as u32);
            self.cells[idx] = true;
        }
    }

    /// Read a cell. Out of range reads are unmarked.
    #[inline]
    pub fn is_marked(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cells[self.cell_index(x as u32, y as u32)]
    }

    /// Stamp a square brush of side `size` around (x, y).
    ///
    /// Covers `[x - size/2, x - size/2 + size)` on both axes, so a size of 1
    /// marks exactly the one cell. Sizes below 1 mark nothing.
    pub fn stamp(&mut self, x: i32, y: i32, size: i32) {
        if size < 1 {
            return;
        }
        let x0 = x.saturating_sub(size / 2);
        let y0 = y.saturating_sub(size / 2);
        let x1 = x0.saturating_add(size);
        let y1 = y0.saturating_add(size);

        // Clip to the grid first so huge brushes stay cheap
        let cx0 = x0.max(0);
        let cy0 = y0.max(0);
        let cx1 = x1.min(self.width.min(i32::MAX as u32) as i32);
        let cy1 = y1.min(self.height.min(i32::MAX as u32) as i32);

        for yy in cy0..cy1 {
            for xx in cx0..cx1 {
                self.mark(xx, yy);
            }
        }
    }

    /// Number of marked cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Marked cells in row-major order
    pub fn marked(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}

//! Growable logical framebuffer
//!
//! The display layer draws into a buffer that is at least as large as the
//! device and expands on demand when a write lands past its edge. It only
//! ever grows toward larger indices; [`LogicalBuffer::reset`] is the one way
//! to shrink it, and that discards every pixel.

use crate::grid::PixelGrid;

/// Logical pixel store that grows to fit any write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicalBuffer {
    grid: PixelGrid,
}

impl LogicalBuffer {
    /// Zero-filled buffer of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: PixelGrid::new(width, height),
        }
    }

    /// Current width
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Current height
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Expand so that `(x, y)` is addressable
    ///
    /// No-op when already inside. Existing pixels keep their position and
    /// value, new cells are zero.
    ///
    /// # Panics
    /// Panics if the new size overflows `usize`.
    pub fn grow(&mut self, x: usize, y: usize) {
        let (width, height) = (self.width(), self.height());
        if x < width && y < height {
            return;
        }

        let new_width = width.max(x.saturating_add(1));
        let new_height = height.max(y.saturating_add(1));
        self.grid.resize(new_width, new_height);
    }

    /// Pixel value, `None` outside the current extents
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.grid.get(x, y)
    }

    /// Grow if needed, then store `value` at `(x, y)`
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.grow(x, y);
        if let Some(cell) = self.grid.get_mut(x, y) {
            *cell = value;
        }
    }

    /// Grow to cover the rectangle, then fill it
    ///
    /// Empty rectangles change nothing, not even the extents.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: u8) {
        if width == 0 || height == 0 {
            return;
        }

        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);
        self.grow(right, bottom);

        for row_y in y..=bottom {
            if let Some(row) = self.grid.row_mut(row_y) {
                row[x..=right].fill(value);
            }
        }
    }

    /// Discard all pixels and growth, re-basing to the given size
    pub fn reset(&mut self, width: usize, height: usize) {
        self.grid = PixelGrid::new(width, height);
    }

    /// Underlying grid
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }
}

//! Row-major pixel grid
//!
//! Cells are stored contiguously, one row after another, so every row has
//! the same length by construction. The outer index is always `y`.

use alloc::vec;
use alloc::vec::Vec;

/// Width x height grid of 8-bit intensities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl PixelGrid {
    /// Zero-filled grid
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("grid of {width}x{height} overflows usize"));
        Self {
            width,
            height,
            cells: vec![0; len],
        }
    }

    /// Build a grid from rows
    ///
    /// Returns `None` if the rows are not all the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has these dimensions
    pub fn has_dimensions(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Pixel value, `None` outside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Mutable pixel, `None` outside the grid
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut u8> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// One row, `None` outside the grid
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Mutable row, `None` outside the grid
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&mut self.cells[start..start + self.width])
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.height).map(move |y| {
            let start = y * self.width;
            &self.cells[start..start + self.width]
        })
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: u8) {
        self.cells.fill(value);
    }

    /// All cells in row-major order
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Change dimensions, keeping the overlapping region
    ///
    /// Cells outside the old extents are zero. Shrinking discards cells.
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize`.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.has_dimensions(width, height) {
            return;
        }

        if width == self.width {
            // Same stride: rows stay in place
            let len = width
                .checked_mul(height)
                .unwrap_or_else(|| panic!("grid of {width}x{height} overflows usize"));
            self.cells.resize(len, 0);
        } else {
            let mut resized = Self::new(width, height);
            let keep = self.width.min(width);
            for (y, row) in self.rows().take(height).enumerate() {
                let start = y * width;
                resized.cells[start..start + keep].copy_from_slice(&row[..keep]);
            }
            self.cells = resized.cells;
        }
        self.width = width;
        self.height = height;
    }
}

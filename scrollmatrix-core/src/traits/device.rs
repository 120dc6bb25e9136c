//! Render target for the display layer

use crate::grid::PixelGrid;

/// A fixed-size matrix the display layer can push frames to
///
/// The hardware driver implements this; tests and simulators can provide
/// their own.
pub trait Device {
    /// Error type for show/clear
    type Error;

    /// Width in pixels, after rotation
    fn width(&self) -> usize;

    /// Height in pixels, after rotation
    fn height(&self) -> usize;

    /// Take ownership of a full frame without copying
    ///
    /// The grid should be `width() x height()`; it is not validated. The
    /// previously held grid is handed back so the caller can reuse its
    /// allocation for the next frame.
    fn set_buffer(&mut self, buffer: PixelGrid) -> PixelGrid;

    /// Brightness applied on the next show (0 off, 255 full)
    fn set_brightness(&mut self, brightness: u8);

    /// Push the held frame to the output
    fn show(&mut self) -> Result<(), Self::Error>;

    /// Blank the held frame and show it
    fn clear(&mut self) -> Result<(), Self::Error>;
}

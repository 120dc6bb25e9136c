//! Logical canvas with scroll, flip and tiling
//!
//! Drawing only touches the [`LogicalBuffer`], which grows to fit any
//! coordinate. [`Display::show`] then samples the buffer once per device
//! cell:
//!
//! 1. add the scroll offset
//! 2. wrap around the logical extent when tiling
//! 3. mirror within the logical extent when flipped
//!
//! Anything that still lands outside the buffer shows as off.

use core::mem;

use scrollmatrix_core::{Device, DisplayConfig, LogicalBuffer, PixelGrid};

/// Framebuffer bound to a device
pub struct Display<D> {
    device: D,
    config: DisplayConfig,
    buffer: LogicalBuffer,
    /// Device-sized output, handed back and forth with the device
    scratch: PixelGrid,
    scroll_x: i32,
    scroll_y: i32,
    flip_x: bool,
    flip_y: bool,
}

impl<D: Device> Display<D> {
    /// Create a display sized to `device`
    pub fn new(device: D, config: DisplayConfig) -> Self {
        let (width, height) = (device.width(), device.height());
        Self {
            device,
            config,
            buffer: LogicalBuffer::new(width, height),
            scratch: PixelGrid::new(width, height),
            scroll_x: 0,
            scroll_y: 0,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Logical width (grows with drawing)
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    /// Logical height (grows with drawing)
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Set a pixel, growing the canvas if needed
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        self.buffer.set(x, y, value);
    }

    /// Read a logical pixel, `None` outside the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.buffer.get(x, y)
    }

    /// Fill a rectangle, growing the canvas to cover it
    pub fn fill(&mut self, x: usize, y: usize, width: usize, height: usize, value: u8) {
        self.buffer.fill_rect(x, y, width, height, value);
    }

    /// Turn off every pixel in a rectangle
    pub fn clear_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        self.fill(x, y, width, height, 0);
    }

    /// Move the view origin to an absolute position
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Move the view origin relative to where it is
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.scroll_x = self.scroll_x.wrapping_add(dx);
        self.scroll_y = self.scroll_y.wrapping_add(dy);
    }

    /// Current view origin
    pub fn scroll_offset(&self) -> (i32, i32) {
        (self.scroll_x, self.scroll_y)
    }

    /// Mirror the canvas horizontally and/or vertically
    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
    }

    /// Current flip flags
    pub fn flip(&self) -> (bool, bool) {
        (self.flip_x, self.flip_y)
    }

    /// Enable or disable wrap-around when scrolling
    pub fn set_tiling(&mut self, tiling: bool) {
        self.config.tiling = tiling;
    }

    /// Whether scrolling wraps around
    pub fn tiling(&self) -> bool {
        self.config.tiling
    }

    /// Forward brightness to the device
    pub fn set_brightness(&mut self, brightness: u8) {
        self.device.set_brightness(brightness);
    }

    /// Render the visible window and push it to the device
    pub fn show(&mut self) -> Result<(), D::Error> {
        let (width, height) = (self.device.width(), self.device.height());
        self.scratch.resize(width, height);

        let tiling = self.config.tiling;
        for y in 0..height {
            let src_y = source_coord(y, self.scroll_y, self.buffer.height(), tiling, self.flip_y);
            let Some(row) = self.scratch.row_mut(y) else {
                continue;
            };
            for (x, cell) in row.iter_mut().enumerate() {
                let src_x =
                    source_coord(x, self.scroll_x, self.buffer.width(), tiling, self.flip_x);
                *cell = match (src_x, src_y) {
                    (Some(sx), Some(sy)) => self.buffer.get(sx, sy).unwrap_or(0),
                    _ => 0,
                };
            }
        }

        // The device hands back its previous frame, which becomes our next scratch
        let frame = mem::take(&mut self.scratch);
        self.scratch = self.device.set_buffer(frame);
        self.device.show()
    }

    /// Discard all drawing and growth, then blank the device
    pub fn clear(&mut self) -> Result<(), D::Error> {
        self.buffer.reset(self.device.width(), self.device.height());

        #[cfg(feature = "defmt")]
        defmt::debug!("Display cleared");
        self.device.clear()
    }

    /// Underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Underlying device, mutably
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Give the device back
    pub fn into_device(self) -> D {
        self.device
    }
}

/// Map a device coordinate to a logical one along a single axis
///
/// `None` when the result falls outside `0..extent`.
fn source_coord(dev: usize, scroll: i32, extent: usize, tiling: bool, flip: bool) -> Option<usize> {
    let extent = i64::try_from(extent).ok()?;
    let mut coord = i64::try_from(dev).ok()? + i64::from(scroll);

    if tiling {
        if extent == 0 {
            return None;
        }
        coord = coord.rem_euclid(extent);
    }
    if flip {
        coord = extent - coord - 1;
    }

    if (0..extent).contains(&coord) {
        usize::try_from(coord).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Unplugged;

    /// 3x3 device that records what it was asked to show
    struct FakeDevice {
        held: PixelGrid,
        shown: Option<PixelGrid>,
        brightness: u8,
        fail: bool,
    }

    impl FakeDevice {
        fn new() -> Self {
            Self {
                held: PixelGrid::new(3, 3),
                shown: None,
                brightness: 255,
                fail: false,
            }
        }
    }

    impl Device for FakeDevice {
        type Error = Unplugged;

        fn width(&self) -> usize {
            3
        }

        fn height(&self) -> usize {
            3
        }

        fn set_buffer(&mut self, buffer: PixelGrid) -> PixelGrid {
            mem::replace(&mut self.held, buffer)
        }

        fn set_brightness(&mut self, brightness: u8) {
            self.brightness = brightness;
        }

        fn show(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(Unplugged);
            }
            self.shown = Some(self.held.clone());
            Ok(())
        }

        fn clear(&mut self) -> Result<(), Self::Error> {
            self.held.fill(0);
            self.show()
        }
    }

    fn display() -> Display<FakeDevice> {
        Display::new(FakeDevice::new(), DisplayConfig::default())
    }

    fn shown(display: &Display<FakeDevice>) -> PixelGrid {
        display.device().shown.clone().unwrap()
    }

    fn grid(rows: [[u8; 3]; 3]) -> PixelGrid {
        PixelGrid::from_rows(&rows).unwrap()
    }

    /// Width-4 canvas with a diagonal and one pixel past the device edge
    fn pattern() -> Display<FakeDevice> {
        let mut display = display();
        display.set_pixel(0, 0, 1);
        display.set_pixel(1, 1, 2);
        display.set_pixel(2, 2, 3);
        display.set_pixel(3, 1, 4);
        display
    }

    #[test]
    fn test_set_pixel_and_show() {
        let mut display = display();
        display.set_pixel(1, 2, 9);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 0, 0], [0, 0, 0], [0, 9, 0]]));

        display.clear().unwrap();
        assert_eq!(shown(&display), grid([[0; 3]; 3]));
    }

    #[test]
    fn test_set_pixel_grows() {
        let mut display = display();
        display.set_pixel(5, 4, 1);
        assert_eq!((display.width(), display.height()), (6, 5));
        assert_eq!(display.pixel(5, 4), Some(1));
        assert_eq!(display.pixel(6, 4), None);
    }

    #[test]
    fn test_fill() {
        let mut display = display();
        display.fill(1, 1, 3, 3, 1);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 0, 0], [0, 1, 1], [0, 1, 1]]));
        assert_eq!((display.width(), display.height()), (4, 4));
    }

    #[test]
    fn test_clear_rect() {
        let mut display = display();
        display.fill(0, 0, 3, 3, 5);
        display.clear_rect(0, 1, 2, 2);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[5, 5, 5], [0, 0, 5], [0, 0, 5]]));
    }

    #[test]
    fn test_scroll() {
        let mut display = display();
        display.set_pixel(3, 3, 1);
        display.scroll_to(2, 1);
        display.show().unwrap();
        // Canvas is 4x4, so (3,3) shows at device (1,2)
        assert_eq!(shown(&display), grid([[0, 0, 0], [0, 0, 0], [0, 1, 0]]));
    }

    #[test]
    fn test_scroll_relative() {
        let mut display = display();
        display.scroll(2, -1);
        display.scroll(1, 3);
        assert_eq!(display.scroll_offset(), (3, 2));
        display.scroll_to(-5, 0);
        assert_eq!(display.scroll_offset(), (-5, 0));
    }

    #[test]
    fn test_tiling() {
        let mut display = pattern();
        display.scroll_to(7, 0);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 1, 0], [4, 0, 2], [0, 0, 0]]));

        display.set_tiling(false);
        assert!(!display.tiling());
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0; 3]; 3]));
    }

    #[test]
    fn test_tiling_negative_scroll_wraps() {
        let mut display = pattern();
        display.scroll_to(-1, 0);
        display.show().unwrap();
        // x = -1 wraps to column 3 of the width-4 canvas
        assert_eq!(shown(&display), grid([[0, 1, 0], [4, 0, 2], [0, 0, 0]]));

        display.set_tiling(false);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 1, 0], [0, 0, 2], [0, 0, 0]]));
    }

    #[test]
    fn test_flip() {
        let mut display = pattern();
        display.set_flip(true, false);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 0, 0], [4, 0, 2], [0, 3, 0]]));

        display.set_flip(true, true);
        assert_eq!(display.flip(), (true, true));
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 3, 0], [4, 0, 2], [0, 0, 0]]));
    }

    #[test]
    fn test_flip_with_tiled_scroll() {
        let mut display = pattern();
        display.set_flip(true, true);
        display.scroll_to(7, 0);
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0, 0, 3], [0, 4, 0], [1, 0, 0]]));
    }

    #[test]
    fn test_clear_resets_growth_and_output() {
        let mut display = pattern();
        display.set_pixel(8, 8, 200);
        display.scroll_to(4, 4);
        display.show().unwrap();

        display.clear().unwrap();
        assert_eq!((display.width(), display.height()), (3, 3));
        assert_eq!(shown(&display), grid([[0; 3]; 3]));

        // Scroll survives clear but there is nothing left to show
        display.show().unwrap();
        assert_eq!(shown(&display), grid([[0; 3]; 3]));
    }

    #[test]
    fn test_scratch_is_recycled() {
        let mut display = display();
        display.set_pixel(0, 0, 7);
        display.show().unwrap();
        display.set_pixel(0, 0, 8);
        display.show().unwrap();
        assert_eq!(shown(&display).get(0, 0), Some(8));
        assert!(display.scratch.has_dimensions(3, 3));
    }

    #[test]
    fn test_show_propagates_device_error() {
        let mut display = display();
        display.device_mut().fail = true;
        assert_eq!(display.show(), Err(Unplugged));
        assert_eq!(display.clear(), Err(Unplugged));
    }

    #[test]
    fn test_brightness_forwarded() {
        let mut display = display();
        display.set_brightness(42);
        assert_eq!(display.into_device().brightness, 42);
    }

    #[test]
    fn test_source_coord() {
        assert_eq!(source_coord(0, 0, 3, true, false), Some(0));
        assert_eq!(source_coord(2, 5, 4, true, false), Some(3));
        assert_eq!(source_coord(0, -1, 4, true, false), Some(3));
        assert_eq!(source_coord(0, -1, 4, false, false), None);
        assert_eq!(source_coord(0, 0, 4, false, true), Some(3));
        assert_eq!(source_coord(5, 0, 4, false, true), None);
        assert_eq!(source_coord(0, 0, 0, true, false), None);
    }
}

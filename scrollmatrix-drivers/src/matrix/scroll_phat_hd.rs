//! Scroll pHAT HD driver (IS31FL3731, 17x7)
//!
//! Owns a fixed-size pixel buffer in rotated coordinates and renders it to
//! the chip with brightness scaling and gamma correction.
//!
//! # Double buffering
//!
//! Frames alternate between chip banks 0 and 1. `show` writes the bank that
//! is *not* displayed, then points the frame register at it, so the matrix
//! never shows a half-written frame.
//!
//! If the frame register write itself fails, the chip may or may not have
//! switched. The driver then marks the frame as out of sync and the next
//! `show` writes the pixels into both banks before switching, which makes
//! the result correct whichever bank the chip ended up on. The bank the
//! driver believes is displayed is rewritten first, so if the failed switch
//! did land, that one recovery frame can tear while it is written.
//!
//! # Usage
//!
//! ```ignore
//! let bus = I2cChannel::new(i2c);
//! let mut matrix = ScrollPhatHd::new(bus, DriverConfig::default());
//! matrix.setup(&mut delay)?;
//!
//! matrix.set_brightness(64);
//! matrix.set_pixel(0, 0, 255)?;
//! matrix.show()?;
//! ```

use core::fmt;
use core::mem;

use embedded_hal::delay::DelayNs;
use scrollmatrix_core::{
    pixel_address, scale_brightness, Device, DriverConfig, PixelGrid, Rotation, FRAME_BYTES,
};
use scrollmatrix_hal::BusChannel;

use super::is31fl3731::{
    reg, BANK_SELECT, CHUNK_SIZE, COLOR_OFFSET, CONFIG_BANK, ENABLE_BYTES, ENABLE_OFFSET,
    MODE_PICTURE, RESET_DELAY_MS,
};

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<BusE> {
    /// Bus transfer failed
    Bus(BusE),
    /// Coordinate outside the matrix
    InvalidCoordinate {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },
    /// Supplied pixels do not match the matrix dimensions
    DimensionMismatch {
        /// Matrix width
        expected_width: usize,
        /// Matrix height
        expected_height: usize,
        /// Width of the first offending row
        width: usize,
        /// Number of rows supplied
        height: usize,
    },
    /// `setup` has not completed successfully
    NotInitialized,
}

impl<BusE: fmt::Debug> fmt::Display for Error<BusE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
            Self::InvalidCoordinate { x, y } => write!(f, "invalid coordinate ({x}, {y})"),
            Self::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => write!(
                f,
                "expected {expected_width}x{expected_height} pixels, got {width}x{height}"
            ),
            Self::NotInitialized => write!(f, "driver not initialized"),
        }
    }
}

/// Scroll pHAT HD matrix driver
///
/// Construction does no bus traffic; call [`setup`](Self::setup) before
/// showing anything.
pub struct ScrollPhatHd<B> {
    bus: B,
    config: DriverConfig,
    width: usize,
    height: usize,
    /// Pixels in rotated coordinates, row-major
    buffer: PixelGrid,
    brightness: u8,
    /// Bank currently displayed
    frame: u8,
    /// False when the last frame switch may not have reached the chip
    frame_in_sync: bool,
    initialized: bool,
}

impl<B: BusChannel> ScrollPhatHd<B> {
    /// Create a new driver
    pub fn new(bus: B, config: DriverConfig) -> Self {
        let (width, height) = config.rotation.dimensions();
        Self {
            bus,
            config,
            width,
            height,
            buffer: PixelGrid::new(width, height),
            brightness: u8::MAX,
            frame: 0,
            frame_in_sync: true,
            initialized: false,
        }
    }

    /// Reset and configure the chip, then blank the matrix
    ///
    /// Any bus failure aborts setup and leaves the driver uninitialized.
    pub fn setup<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<B::Error>> {
        self.initialized = false;

        self.reset(delay)?;
        self.write_register(reg::FRAME, 0)?;
        self.write_register(reg::MODE, MODE_PICTURE)?;
        self.write_register(reg::AUDIO_SYNC, 0)?;

        // Every LED must be enabled in both frames we alternate between
        let enable = [0xFF; ENABLE_BYTES];
        for bank in [1, 0] {
            self.select_bank(bank)?;
            self.write(ENABLE_OFFSET, &enable)?;
        }

        self.frame = 0;
        self.frame_in_sync = true;
        self.buffer = PixelGrid::new(self.width, self.height);
        self.initialized = true;

        if let Err(e) = self.clear() {
            self.initialized = false;
            return Err(e);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Scroll pHAT HD ready ({}x{}, {} deg)",
            self.width,
            self.height,
            self.config.rotation.degrees()
        );
        Ok(())
    }

    /// Check if setup has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Width in pixels, after rotation
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels, after rotation
    pub fn height(&self) -> usize {
        self.height
    }

    /// Configured rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Get the configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Bank currently displayed
    pub fn frame(&self) -> u8 {
        self.frame
    }

    /// Whether the chip is known to display [`frame`](Self::frame)
    pub fn is_frame_in_sync(&self) -> bool {
        self.frame_in_sync
    }

    /// Set one pixel
    ///
    /// Out-of-range coordinates leave the buffer untouched.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> Result<(), Error<B::Error>> {
        if x >= self.width || y >= self.height {
            return Err(Error::InvalidCoordinate { x, y });
        }
        let cell = self
            .buffer
            .get_mut(x, y)
            .ok_or(Error::InvalidCoordinate { x, y })?;
        *cell = value;
        Ok(())
    }

    /// Read back one pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buffer.get(x, y)
    }

    /// Copy a full frame of rows into the buffer
    ///
    /// Rows are indexed `[y][x]`. Dimensions are checked before anything is
    /// copied.
    pub fn set_pixels<R: AsRef<[u8]>>(&mut self, rows: &[R]) -> Result<(), Error<B::Error>> {
        let mismatch = |width| Error::DimensionMismatch {
            expected_width: self.width,
            expected_height: self.height,
            width,
            height: rows.len(),
        };

        if rows.len() != self.height {
            let width = rows.first().map_or(0, |row| row.as_ref().len());
            return Err(mismatch(width));
        }
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != self.width) {
            return Err(mismatch(row.as_ref().len()));
        }

        if !self.buffer.has_dimensions(self.width, self.height) {
            self.buffer = PixelGrid::new(self.width, self.height);
        }
        for (y, row) in rows.iter().enumerate() {
            if let Some(dst) = self.buffer.row_mut(y) {
                dst.copy_from_slice(row.as_ref());
            }
        }
        Ok(())
    }

    /// Swap in a whole frame without copying or validation
    ///
    /// Ownership of `buffer` moves into the driver and the previous buffer
    /// is returned. It should be `width() x height()`: cells outside the
    /// matrix are ignored on show and missing cells render as off.
    pub fn set_buffer(&mut self, buffer: PixelGrid) -> PixelGrid {
        mem::replace(&mut self.buffer, buffer)
    }

    /// Current pixel buffer
    pub fn buffer(&self) -> &PixelGrid {
        &self.buffer
    }

    /// Set brightness for subsequent shows (0 off, 255 full)
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Turn every pixel off and show the result
    pub fn clear(&mut self) -> Result<(), Error<B::Error>> {
        self.buffer.fill(0);
        self.show()
    }

    /// Render the buffer into the back bank and switch to it
    ///
    /// On error the displayed frame is left as it was, except when the
    /// final frame switch fails; see [`is_frame_in_sync`](Self::is_frame_in_sync).
    pub fn show(&mut self) -> Result<(), Error<B::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        let output = self.render();
        let next = self.frame ^ 1;

        if !self.frame_in_sync {
            #[cfg(feature = "defmt")]
            defmt::debug!("Frame switch unconfirmed, rewriting both banks");
            self.write_frame(self.frame, &output)?;
        }
        self.write_frame(next, &output)?;

        self.select_bank(CONFIG_BANK)?;
        if let Err(e) = self.write(reg::FRAME, &[next]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Frame switch to bank {} failed", next);
            self.frame_in_sync = false;
            return Err(e);
        }

        self.frame = next;
        self.frame_in_sync = true;
        Ok(())
    }

    /// Put the chip into software shutdown
    ///
    /// Safe to call repeatedly. Run [`setup`](Self::setup) again before the
    /// next show.
    pub fn halt(&mut self) -> Result<(), Error<B::Error>> {
        self.write_register(reg::SHUTDOWN, 0)?;
        self.initialized = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("Scroll pHAT HD halted");
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Brightness, gamma and physical addressing for every pixel
    fn render(&self) -> [u8; FRAME_BYTES] {
        let mut output = [0u8; FRAME_BYTES];
        for (y, row) in self.buffer.rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if let Some(addr) = pixel_address(self.config.rotation, x, y) {
                    let scaled = scale_brightness(value, self.brightness);
                    output[addr] = self.config.gamma.correct(scaled);
                }
            }
        }
        output
    }

    /// Write PWM data into a frame bank in bus-sized chunks
    fn write_frame(&mut self, bank: u8, data: &[u8; FRAME_BYTES]) -> Result<(), Error<B::Error>> {
        self.select_bank(bank)?;
        let mut offset = COLOR_OFFSET;
        for chunk in data.chunks(CHUNK_SIZE) {
            self.write(offset, chunk)?;
            offset = offset.wrapping_add(CHUNK_SIZE as u8);
        }
        Ok(())
    }

    /// Reboot the chip via the shutdown register
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<B::Error>> {
        self.write_register(reg::SHUTDOWN, 0)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.write_register(reg::SHUTDOWN, 1)
    }

    /// Write a configuration bank register
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.select_bank(CONFIG_BANK)?;
        self.write(register, &[value])
    }

    fn select_bank(&mut self, bank: u8) -> Result<(), Error<B::Error>> {
        self.write(BANK_SELECT, &[bank])
    }

    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), Error<B::Error>> {
        self.bus.send(command, payload).map_err(Error::Bus)
    }
}

impl<B: BusChannel> Device for ScrollPhatHd<B> {
    type Error = Error<B::Error>;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_buffer(&mut self, buffer: PixelGrid) -> PixelGrid {
        Self::set_buffer(self, buffer)
    }

    fn set_brightness(&mut self, brightness: u8) {
        Self::set_brightness(self, brightness);
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        Self::show(self)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        Self::clear(self)
    }
}

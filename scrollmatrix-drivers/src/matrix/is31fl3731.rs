//! IS31FL3731 register map
//!
//! The chip has eight frame banks plus a configuration ("function") bank.
//! Writing a bank number to [`BANK_SELECT`] routes subsequent register
//! writes to that bank. Each frame bank holds:
//!
//! - 18 LED enable bytes at [`ENABLE_OFFSET`] (17 used on the Scroll pHAT HD)
//! - 18 blink control bytes
//! - 144 PWM bytes at [`COLOR_OFFSET`]

/// Bank select command register (always reachable)
pub const BANK_SELECT: u8 = 0xFD;

/// Configuration (function register) bank
pub const CONFIG_BANK: u8 = 0x0B;

/// Configuration bank registers
pub mod reg {
    /// Display mode
    pub const MODE: u8 = 0x00;
    /// Frame shown in picture mode
    pub const FRAME: u8 = 0x01;
    /// Audio synchronisation enable
    pub const AUDIO_SYNC: u8 = 0x06;
    /// Software shutdown (0 = shutdown, 1 = normal)
    pub const SHUTDOWN: u8 = 0x0A;
}

/// Picture mode: show a single selected frame
pub const MODE_PICTURE: u8 = 0x00;

/// Offset of the LED enable bytes within a frame bank
pub const ENABLE_OFFSET: u8 = 0x00;

/// LED enable bytes needed to cover the 17x7 wiring
pub const ENABLE_BYTES: usize = 17;

/// Offset of the PWM bytes within a frame bank
pub const COLOR_OFFSET: u8 = 0x24;

/// Largest PWM write per bus transfer
pub const CHUNK_SIZE: usize = 32;

/// Minimum time to hold the chip in shutdown during reset
pub const RESET_DELAY_MS: u32 = 10;

//! Scrollmatrix Hardware Abstraction Layer
//!
//! This crate defines the bus seam between the LED matrix driver and the
//! platform. The driver only ever issues "command byte + payload" writes,
//! so that is all a transport has to provide.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  scrollmatrix-drivers (ScrollPhatHd)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  scrollmatrix-hal (this crate)          │
//! │  BusChannel ◄── I2cChannel              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  any embedded_hal::i2c::I2c             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusChannel`] - Command-oriented register writes
//!
//! # Implementations
//!
//! - [`i2c::I2cChannel`] - `BusChannel` over an embedded-hal I2C bus

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use bus::BusChannel;
pub use i2c::{I2cChannel, I2cChannelError, DEFAULT_ADDRESS, MAX_PAYLOAD};

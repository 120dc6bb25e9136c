//! Board-agnostic core logic for the scrollmatrix LED driver
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Matrix geometry, rotation and the physical LED address map
//! - Gamma correction and brightness scaling
//! - Row-major pixel grids and the growable logical buffer
//! - Driver and display configuration
//! - The [`traits::Device`] seam between the display layer and a driver

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod buffer;
pub mod config;
pub mod gamma;
pub mod geometry;
pub mod grid;
pub mod traits;

pub use buffer::LogicalBuffer;
pub use config::{ConfigError, DisplayConfig, DriverConfig};
pub use gamma::{scale_brightness, GammaTable, DEFAULT_GAMMA};
pub use geometry::{pixel_address, Rotation, FRAME_BYTES, NATIVE_HEIGHT, NATIVE_WIDTH};
pub use grid::PixelGrid;
pub use traits::Device;

//! Scrolling framebuffer for scrollmatrix devices
//!
//! This crate provides:
//! - [`Display`], a logical canvas that grows to fit whatever is drawn on it
//! - Scroll, flip and tiling transforms applied when the canvas is shown
//!
//! # Architecture
//!
//! ```text
//! set_pixel / fill          show()
//!        |                    |
//!        v                    v
//!  LogicalBuffer ---> scroll, tile, flip ---> device-sized grid
//!   (grows)                                        |
//!                                   Device::set_buffer + Device::show
//! ```
//!
//! The display works with any [`Device`](scrollmatrix_core::Device): the
//! Scroll pHAT HD driver from `scrollmatrix-drivers`, or a fake in tests.

#![no_std]
#![deny(unsafe_code)]

pub mod display;

pub use display::Display;

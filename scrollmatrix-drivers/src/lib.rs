//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in scrollmatrix-core for LED matrix hardware:
//!
//! - IS31FL3731 charlieplexed LED driver (register map)
//! - Scroll pHAT HD 17x7 matrix built on it

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod matrix;

pub use matrix::{Error, ScrollPhatHd};

//! LED matrix drivers
//!
//! - IS31FL3731: register map and bank layout
//! - Scroll pHAT HD: 17x7 matrix with gamma, brightness and rotation

pub mod is31fl3731;
pub mod scroll_phat_hd;

pub use scroll_phat_hd::{Error, ScrollPhatHd};

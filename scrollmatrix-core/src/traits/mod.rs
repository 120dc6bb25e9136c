//! Abstraction traits
//!
//! These traits define the interface between the display layer and the
//! hardware (or fake) that finally shows the pixels.

pub mod device;

pub use device::Device;

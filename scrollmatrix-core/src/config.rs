//! Driver and display configuration
//!
//! Defaults live in immutable constants; callers override them by building
//! a config value. With the `serde` feature both structs deserialize from
//! any serde format, with rotation in degrees and gamma as a list of 256
//! levels.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gamma::GammaTable;
use crate::geometry::Rotation;

/// Configuration errors
///
/// Only raised when converting untyped values (degrees, slices). The typed
/// constructors cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Rotation is not one of 0, 90, 180, 270
    InvalidRotation(u16),
    /// Gamma table does not have exactly 256 entries
    InvalidGammaLength(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRotation(degrees) => {
                write!(f, "invalid rotation {degrees}, must be a right angle")
            }
            Self::InvalidGammaLength(len) => {
                write!(f, "gamma table has {len} levels, expected 256")
            }
        }
    }
}

/// Hardware driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Gamma curve applied after brightness scaling
    pub gamma: GammaTable,
    /// Rotation applied to every pixel before addressing
    pub rotation: Rotation,
}

impl DriverConfig {
    /// Default config with the given rotation
    pub fn with_rotation(rotation: Rotation) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// Replace the gamma curve
    pub fn gamma(mut self, gamma: GammaTable) -> Self {
        self.gamma = gamma;
        self
    }
}

/// Display layer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Wrap scrolling around the logical buffer edges
    pub tiling: bool,
}

impl DisplayConfig {
    /// Default display configuration
    pub const DEFAULT: Self = Self { tiling: true };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let driver = DriverConfig::default();
        assert_eq!(driver.rotation, Rotation::Deg0);
        assert_eq!(driver.gamma, GammaTable::default());

        assert!(DisplayConfig::default().tiling);
    }

    #[test]
    fn test_builders() {
        let mut levels = [0u8; 256];
        levels[255] = 42;
        let config = DriverConfig::with_rotation(Rotation::Deg180).gamma(GammaTable::new(levels));
        assert_eq!(config.rotation, Rotation::Deg180);
        assert_eq!(config.gamma.correct(255), 42);
    }
}

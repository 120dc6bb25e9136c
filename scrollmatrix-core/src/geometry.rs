//! Matrix geometry and physical LED addressing
//!
//! The IS31FL3731 exposes 144 PWM registers per frame. The Scroll pHAT HD
//! wires a 17x7 matrix onto them in two mirrored column banks: native
//! columns 0-8 count down from register column 8, columns 9-16 sit in the
//! lower half of the preceding register column with rows reversed.

use crate::config::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Native matrix width (unrotated)
pub const NATIVE_WIDTH: usize = 17;

/// Native matrix height (unrotated)
pub const NATIVE_HEIGHT: usize = 7;

/// PWM registers per frame
pub const FRAME_BYTES: usize = 144;

/// Register columns are 16 PWM bytes apart
const COLUMN_STRIDE: usize = 16;

/// Last native column in the first bank
const FIRST_BANK_LAST_COLUMN: usize = 8;

/// Display rotation, fixed when the driver is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub enum Rotation {
    /// No rotation
    #[default]
    Deg0,
    /// 90 degrees clockwise
    Deg90,
    /// 180 degrees
    Deg180,
    /// 270 degrees clockwise
    Deg270,
}

impl Rotation {
    /// Parse a rotation from degrees
    ///
    /// Only right angles are accepted.
    pub const fn from_degrees(degrees: u16) -> Result<Self, ConfigError> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(ConfigError::InvalidRotation(other)),
        }
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// True when width and height are exchanged
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Reported (width, height) of the matrix under this rotation
    pub const fn dimensions(self) -> (usize, usize) {
        if self.swaps_axes() {
            (NATIVE_HEIGHT, NATIVE_WIDTH)
        } else {
            (NATIVE_WIDTH, NATIVE_HEIGHT)
        }
    }

    /// Map a rotated coordinate back to native chip space
    ///
    /// Caller guarantees `(x, y)` is inside [`dimensions`](Self::dimensions).
    const fn unrotate(self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Self::Deg0 => (x, y),
            Self::Deg90 => (NATIVE_WIDTH - 1 - y, x),
            Self::Deg180 => (NATIVE_WIDTH - 1 - x, NATIVE_HEIGHT - 1 - y),
            Self::Deg270 => (y, NATIVE_HEIGHT - 1 - x),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Physical PWM register offset for a rotated pixel coordinate
///
/// Returns `None` when `(x, y)` lies outside the rotated matrix. For every
/// rotation the mapping is injective over the matrix and lands in
/// `0..FRAME_BYTES`.
pub const fn pixel_address(rotation: Rotation, x: usize, y: usize) -> Option<usize> {
    let (width, height) = rotation.dimensions();
    if x >= width || y >= height {
        return None;
    }

    let (x, y) = rotation.unrotate(x, y);
    // Rows are wired bottom-up
    let y = NATIVE_HEIGHT - 1 - y;

    let offset = if x > FIRST_BANK_LAST_COLUMN {
        (x - FIRST_BANK_LAST_COLUMN) * COLUMN_STRIDE - y - 2
    } else {
        (FIRST_BANK_LAST_COLUMN - x) * COLUMN_STRIDE + y
    };
    Some(offset)
}

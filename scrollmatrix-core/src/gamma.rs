//! Gamma correction and brightness scaling
//!
//! LEDs respond roughly linearly to PWM duty while the eye does not, so
//! every scaled intensity goes through a 256-entry lookup before it is
//! written to the chip.

use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Number of gamma levels (one per input intensity)
pub const GAMMA_LEVELS: usize = 256;

/// Default perceptual curve (exponent 2.8)
#[rustfmt::skip]
pub const DEFAULT_GAMMA: GammaTable = GammaTable([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    2, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 5, 5, 5,
    5, 6, 6, 6, 6, 7, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10,
    10, 10, 11, 11, 11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16,
    17, 17, 18, 18, 19, 19, 20, 20, 21, 21, 22, 22, 23, 24, 24, 25,
    25, 26, 27, 27, 28, 29, 29, 30, 31, 32, 32, 33, 34, 35, 35, 36,
    37, 38, 39, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 50,
    51, 52, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 66, 67, 68,
    69, 70, 72, 73, 74, 75, 77, 78, 79, 81, 82, 83, 85, 86, 87, 89,
    90, 92, 93, 95, 96, 98, 99, 101, 102, 104, 105, 107, 109, 110, 112, 114,
    115, 117, 119, 120, 122, 124, 126, 127, 129, 131, 133, 135, 137, 138, 140, 142,
    144, 146, 148, 150, 152, 154, 156, 158, 160, 162, 164, 167, 169, 171, 173, 175,
    177, 180, 182, 184, 186, 189, 191, 193, 196, 198, 200, 203, 205, 208, 210, 213,
    215, 218, 220, 223, 225, 228, 231, 233, 236, 239, 241, 244, 247, 249, 252, 255,
]);

/// Scale an intensity by a brightness level
///
/// Multiplicative with integer truncation: brightness 0 always yields 0 and
/// brightness 255 is the identity.
#[inline]
pub const fn scale_brightness(value: u8, brightness: u8) -> u8 {
    ((value as u16 * brightness as u16) / 255) as u8
}

/// Intensity to drive-level lookup table
///
/// Always holds exactly [`GAMMA_LEVELS`] entries.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct GammaTable([u8; GAMMA_LEVELS]);

impl GammaTable {
    /// Wrap a full table
    pub const fn new(levels: [u8; GAMMA_LEVELS]) -> Self {
        Self(levels)
    }

    /// Linear table (no correction)
    pub const fn linear() -> Self {
        let mut levels = [0u8; GAMMA_LEVELS];
        let mut i = 0;
        while i < GAMMA_LEVELS {
            levels[i] = i as u8;
            i += 1;
        }
        Self(levels)
    }

    /// Corrected drive level for an intensity
    #[inline]
    pub const fn correct(&self, value: u8) -> u8 {
        self.0[value as usize]
    }

    /// Raw table
    pub const fn levels(&self) -> &[u8; GAMMA_LEVELS] {
        &self.0
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        DEFAULT_GAMMA
    }
}

impl fmt::Debug for GammaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GammaTable([{}, {}, .., {}, {}])",
            self.0[0],
            self.0[1],
            self.0[GAMMA_LEVELS - 2],
            self.0[GAMMA_LEVELS - 1]
        )
    }
}

impl TryFrom<&[u8]> for GammaTable {
    type Error = ConfigError;

    fn try_from(levels: &[u8]) -> Result<Self, Self::Error> {
        let levels: [u8; GAMMA_LEVELS] = levels
            .try_into()
            .map_err(|_| ConfigError::InvalidGammaLength(levels.len()))?;
        Ok(Self(levels))
    }
}

impl TryFrom<Vec<u8>> for GammaTable {
    type Error = ConfigError;

    fn try_from(levels: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(levels.as_slice())
    }
}

impl From<GammaTable> for Vec<u8> {
    fn from(table: GammaTable) -> Self {
        table.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve_endpoints() {
        assert_eq!(DEFAULT_GAMMA.correct(0), 0);
        assert_eq!(DEFAULT_GAMMA.correct(255), 255);
        assert_eq!(GammaTable::default(), DEFAULT_GAMMA);
    }

    #[test]
    fn test_default_curve_is_monotonic() {
        let levels = DEFAULT_GAMMA.levels();
        for pair in levels.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_linear() {
        let linear = GammaTable::linear();
        for v in 0..=255u8 {
            assert_eq!(linear.correct(v), v);
        }
    }

    #[test]
    fn test_scale_brightness_edges() {
        assert_eq!(scale_brightness(255, 255), 255);
        assert_eq!(scale_brightness(255, 0), 0);
        assert_eq!(scale_brightness(0, 255), 0);
        assert_eq!(scale_brightness(128, 128), 64);
        // Truncates
        assert_eq!(scale_brightness(1, 254), 0);
    }

    #[test]
    fn test_try_from_slice() {
        let levels = [7u8; 256];
        let table = GammaTable::try_from(&levels[..]).unwrap();
        assert_eq!(table.correct(100), 7);

        assert_eq!(
            GammaTable::try_from(&levels[..255]),
            Err(ConfigError::InvalidGammaLength(255))
        );
        let long = alloc::vec![0u8; 257];
        assert_eq!(
            GammaTable::try_from(long),
            Err(ConfigError::InvalidGammaLength(257))
        );
    }
}

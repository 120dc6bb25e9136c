//! I2C command channel
//!
//! Adapts any `embedded_hal::i2c::I2c` master to [`BusChannel`] by
//! addressing a single 7-bit target.

use core::fmt;

use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::bus::BusChannel;

/// Default 7-bit address of the IS31FL3731 on the Scroll pHAT HD
pub const DEFAULT_ADDRESS: u8 = 0x74;

/// Largest payload accepted in one transfer
///
/// Matches the matrix driver's chunk size; the command byte comes on top.
pub const MAX_PAYLOAD: usize = 32;

/// Errors from the I2C channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cChannelError<E> {
    /// Underlying bus error
    I2c(E),
    /// Payload does not fit in a single transfer
    PayloadTooLong(usize),
}

impl<E: fmt::Debug> fmt::Display for I2cChannelError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "i2c bus error: {e:?}"),
            Self::PayloadTooLong(len) => {
                write!(f, "payload of {len} bytes exceeds {MAX_PAYLOAD} byte transfer limit")
            }
        }
    }
}

/// I2C-backed command channel
///
/// Each [`send`](BusChannel::send) becomes a single I2C write of
/// `[command, payload...]`.
pub struct I2cChannel<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cChannel<I2C> {
    /// Create a channel at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a channel for a device at a custom 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Target address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> BusChannel for I2cChannel<I2C> {
    type Error = I2cChannelError<I2C::Error>;

    fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error> {
        let mut frame: Vec<u8, { MAX_PAYLOAD + 1 }> = Vec::new();
        // Capacity is at least one, the command byte always fits
        let _ = frame.push(command);
        frame
            .extend_from_slice(payload)
            .map_err(|_| I2cChannelError::PayloadTooLong(payload.len()))?;

        self.i2c
            .write(self.address, &frame)
            .map_err(I2cChannelError::I2c)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;
    use std::vec::Vec as StdVec;

    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    use super::*;

    /// Records every write as (address, bytes)
    #[derive(Default)]
    struct FakeI2c {
        writes: StdVec<(u8, StdVec<u8>)>,
        fail: bool,
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            let mut bytes = StdVec::new();
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    bytes.extend_from_slice(data);
                }
            }
            self.writes.push((address, bytes));
            Ok(())
        }
    }

    #[test]
    fn test_send_prefixes_command() {
        let mut channel = I2cChannel::new(FakeI2c::default());
        channel.send(0xFD, &[0x0B]).unwrap();
        channel.send(0x24, &[1, 2, 3]).unwrap();

        let i2c = channel.release();
        assert_eq!(i2c.writes.len(), 2);
        assert_eq!(i2c.writes[0], (DEFAULT_ADDRESS, vec![0xFD, 0x0B]));
        assert_eq!(i2c.writes[1], (DEFAULT_ADDRESS, vec![0x24, 1, 2, 3]));
    }

    #[test]
    fn test_custom_address() {
        let mut channel = I2cChannel::with_address(FakeI2c::default(), 0x75);
        assert_eq!(channel.address(), 0x75);
        channel.send(0x0A, &[]).unwrap();
        assert_eq!(channel.release().writes[0], (0x75, vec![0x0A]));
    }

    #[test]
    fn test_max_payload_fits() {
        let mut channel = I2cChannel::new(FakeI2c::default());
        let payload = [0xAA; MAX_PAYLOAD];
        channel.send(0x24, &payload).unwrap();
        assert_eq!(channel.release().writes[0].1.len(), MAX_PAYLOAD + 1);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let mut channel = I2cChannel::new(FakeI2c::default());
        let payload = [0u8; MAX_PAYLOAD + 1];
        let result = channel.send(0x24, &payload);
        assert_eq!(result, Err(I2cChannelError::PayloadTooLong(MAX_PAYLOAD + 1)));
        assert!(channel.release().writes.is_empty());
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut channel = I2cChannel::new(FakeI2c {
            fail: true,
            ..FakeI2c::default()
        });
        assert_eq!(
            channel.send(0x0A, &[0]),
            Err(I2cChannelError::I2c(ErrorKind::Other))
        );
    }
}

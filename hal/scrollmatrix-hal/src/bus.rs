//! Command channel abstraction
//!
//! Register-based peripherals are driven by writing a command (register
//! address) followed by data bytes. No response payload is interpreted.

/// Write-only command channel to a peripheral
///
/// Implementations must send `command` and `payload` as one bus
/// transaction. A returned error means the peripheral state is unknown;
/// callers decide whether to retry.
pub trait BusChannel {
    /// Error type for bus operations
    type Error;

    /// Send a command byte followed by its payload
    ///
    /// # Arguments
    /// * `command` - Register address or command byte
    /// * `payload` - Data bytes written after the command
    fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<T: BusChannel + ?Sized> BusChannel for &mut T {
    type Error = T::Error;

    fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error> {
        T::send(self, command, payload)
    }
}

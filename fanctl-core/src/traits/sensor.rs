//! Temperature sensor errors

/// Errors that can occur reading the temperature sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No device answered, or it reported the disconnected sentinel
    Disconnected,
    /// Reading was not a number
    NotANumber,
    /// Scratchpad checksum did not match
    CrcMismatch,
    /// Bus transfer failed
    Bus,
}

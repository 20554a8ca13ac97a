//! Non-volatile storage abstractions
//!
//! A single small settings region addressed by byte offset. Implementations
//! hide erase granularity and program alignment from the caller.

/// Errors from non-volatile storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Access falls outside the storage region
    OutOfBounds,
    /// Buffer too small for the data
    BufferTooSmall,
}

/// Raw non-volatile storage
///
/// Offsets are relative to the start of the region the implementation
/// owns. A write replaces exactly `data.len()` bytes at `offset`; bytes
/// outside that range keep their previous contents.
pub trait NvStorage {
    /// Total size of the region in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(
        &mut self,
        offset: usize,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;

    /// Write `data` starting at `offset`
    fn write(
        &mut self,
        offset: usize,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

/// Check that `offset..offset + len` lies inside a region of `capacity` bytes
pub fn check_bounds(capacity: usize, offset: usize, len: usize) -> Result<(), FlashError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(FlashError::OutOfBounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inside() {
        assert_eq!(check_bounds(4096, 0, 32), Ok(()));
        assert_eq!(check_bounds(4096, 4064, 32), Ok(()));
    }

    #[test]
    fn test_bounds_outside() {
        assert_eq!(check_bounds(4096, 4065, 32), Err(FlashError::OutOfBounds));
        assert_eq!(
            check_bounds(4096, usize::MAX, 2),
            Err(FlashError::OutOfBounds)
        );
    }
}

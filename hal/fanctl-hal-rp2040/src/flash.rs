//! Flash settings storage for RP2040
//!
//! The settings live in the last erase sector of the external flash. A
//! write reads the sector back, patches the requested bytes and programs
//! the whole sector again.
//!
//! Implements the `NvStorage` trait from `fanctl-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::{NorFlash, ReadNorFlash};
use fanctl_hal::flash::check_bounds;

pub use fanctl_hal::flash::{FlashError, NvStorage};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_SECTOR_SIZE: usize = ERASE_SIZE;
pub const SETTINGS_SECTOR_START: usize = FLASH_SIZE - SETTINGS_SECTOR_SIZE;

/// RP2040 settings sector
pub struct Rp2040NvStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040NvStorage<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl<'d> NvStorage for Rp2040NvStorage<'d> {
    fn capacity(&self) -> usize {
        SETTINGS_SECTOR_SIZE
    }

    async fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), FlashError> {
        check_bounds(self.capacity(), offset, buffer.len())?;
        ReadNorFlash::read(
            &mut self.flash,
            (SETTINGS_SECTOR_START + offset) as u32,
            buffer,
        )
        .await
        .map_err(|_| FlashError::Flash)
    }

    async fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), FlashError> {
        check_bounds(self.capacity(), offset, data.len())?;

        let start = SETTINGS_SECTOR_START as u32;
        let end = FLASH_SIZE as u32;

        let mut sector = [0u8; SETTINGS_SECTOR_SIZE];
        ReadNorFlash::read(&mut self.flash, start, &mut sector)
            .await
            .map_err(|_| FlashError::Flash)?;

        if &sector[offset..offset + data.len()] == data {
            return Ok(());
        }
        sector[offset..offset + data.len()].copy_from_slice(data);

        NorFlash::erase(&mut self.flash, start, end)
            .await
            .map_err(|_| FlashError::Flash)?;
        NorFlash::write(&mut self.flash, start, &sector)
            .await
            .map_err(|_| FlashError::Flash)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("settings sector programmed at {:#x}", start);

        Ok(())
    }
}

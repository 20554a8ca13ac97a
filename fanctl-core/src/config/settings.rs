//! Persisted settings record
//!
//! The configuration is written as one fixed-size record at the start of the
//! settings region. A 16-bit magic value guards against erased flash, a
//! record from an incompatible layout, or random contents: any of those
//! yields defaults rather than a partially applied record.

use fanctl_hal::flash::check_bounds;
use fanctl_hal::{FlashError, NvStorage};
use serde::{Deserialize, Serialize};

use super::types::Configuration;

/// Magic number identifying a valid settings record
pub const SETTINGS_MAGIC: u16 = 0xFC01;

/// Size of the reserved record slot in bytes
pub const RECORD_LEN: usize = 32;

/// Offset of the record inside the settings region
pub const SETTINGS_OFFSET: usize = 0;

/// Errors from loading or saving settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Storage access failed
    Flash(FlashError),
    /// Record could not be serialized
    Encode,
    /// Record could not be deserialized
    Decode,
    /// Magic value did not match (found value attached)
    BadMagic(u16),
    /// Record decoded but violates configuration invariants
    Invalid,
}

impl From<FlashError> for SettingsError {
    fn from(e: FlashError) -> Self {
        SettingsError::Flash(e)
    }
}

/// On-flash settings layout
///
/// Field order is the serialization order and must not change without
/// bumping [`SETTINGS_MAGIC`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub magic: u16,
    pub pid_enabled: bool,
    pub setpoint: u8,
    pub start_temp: u8,
    pub end_temp: u8,
    pub hysteresis: u8,
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

impl From<&Configuration> for SettingsRecord {
    fn from(config: &Configuration) -> Self {
        Self {
            magic: SETTINGS_MAGIC,
            pid_enabled: config.pid_enabled,
            setpoint: config.setpoint,
            start_temp: config.start_temp,
            end_temp: config.end_temp,
            hysteresis: config.hysteresis,
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
        }
    }
}

impl SettingsRecord {
    /// Serialize into a zero-padded record slot
    pub fn encode(&self) -> Result<[u8; RECORD_LEN], SettingsError> {
        let mut buf = [0u8; RECORD_LEN];
        postcard::to_slice(self, &mut buf).map_err(|_| SettingsError::Encode)?;
        Ok(buf)
    }

    /// Deserialize a record slot and validate it
    pub fn decode(buf: &[u8]) -> Result<Configuration, SettingsError> {
        let record: SettingsRecord =
            postcard::from_bytes(buf).map_err(|_| SettingsError::Decode)?;

        if record.magic != SETTINGS_MAGIC {
            return Err(SettingsError::BadMagic(record.magic));
        }

        let config = Configuration {
            pid_enabled: record.pid_enabled,
            setpoint: record.setpoint,
            kp: record.kp,
            ki: record.ki,
            kd: record.kd,
            start_temp: record.start_temp,
            end_temp: record.end_temp,
            hysteresis: record.hysteresis,
        };

        if !config.is_valid() {
            return Err(SettingsError::Invalid);
        }

        Ok(config)
    }
}

/// Loads and saves the configuration through a non-volatile storage backend
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: NvStorage> SettingsStore<S> {
    /// Create a store over the given storage region
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Fail early when the region cannot hold the record slot
    fn check_slot(&self) -> Result<(), SettingsError> {
        check_bounds(self.storage.capacity(), SETTINGS_OFFSET, RECORD_LEN)?;
        Ok(())
    }

    /// Read and validate the stored record
    pub async fn try_load(&mut self) -> Result<Configuration, SettingsError> {
        self.check_slot()?;
        let mut buf = [0u8; RECORD_LEN];
        self.storage.read(SETTINGS_OFFSET, &mut buf).await?;
        SettingsRecord::decode(&buf)
    }

    /// Read the stored configuration, falling back to defaults
    ///
    /// Never fails: storage errors and invalid records both yield
    /// [`Configuration::default`].
    pub async fn load(&mut self) -> Configuration {
        self.try_load().await.unwrap_or_default()
    }

    /// Write the configuration with the current magic value
    pub async fn save(&mut self, config: &Configuration) -> Result<(), SettingsError> {
        self.check_slot()?;
        let buf = SettingsRecord::from(config).encode()?;
        self.storage.write(SETTINGS_OFFSET, &buf).await?;
        Ok(())
    }

    /// Access the underlying storage
    pub fn storage(&mut self) -> &mut S {
        &mut self.storage
    }
}

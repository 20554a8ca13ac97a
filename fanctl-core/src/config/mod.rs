//! Configuration types and persistence

pub mod settings;
pub mod types;

pub use settings::{SettingsError, SettingsRecord, SettingsStore, SETTINGS_MAGIC};
pub use types::*;

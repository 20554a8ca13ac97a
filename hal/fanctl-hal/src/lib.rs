//! fanctl Hardware Abstraction Layer
//!
//! Traits implemented by chip-specific HALs so the board-agnostic core can
//! persist its settings without knowing which flash part sits underneath.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  fanctl-core (SettingsStore)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fanctl-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  fanctl-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::NvStorage`] - Raw fixed-region persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, NvStorage};

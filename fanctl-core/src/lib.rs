//! Board-agnostic core logic for the fan controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (character display, fan output, sensor errors)
//! - Duty computation (hysteretic linear mapping, reverse-acting PID, fail-safe)
//! - Paginated settings menu
//! - Differential screen rendering
//! - Screen state machine
//! - Configuration types and the persisted settings record

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod controller;
pub mod menu;
pub mod render;
pub mod state;
pub mod traits;

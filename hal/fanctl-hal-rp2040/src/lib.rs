//! RP2040-specific HAL for the fan controller firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `fanctl-hal` traits, plus RP2040-specific setup:
//!
//! - Flash settings sector (implements `fanctl_hal::NvStorage`)
//! - 25 kHz fan PWM slice configuration

#![no_std]

pub mod flash;
pub mod pwm;

pub use fanctl_hal::{FlashError, NvStorage};

//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in fanctl-core for the controller's peripherals:
//!
//! - Push button click/double-click/hold decoding
//! - HD44780 character LCD behind a PCF8574 I2C expander
//! - PWM fan output
//! - DS18B20 scratchpad decoding

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod display;
pub mod fan;
pub mod sensor;

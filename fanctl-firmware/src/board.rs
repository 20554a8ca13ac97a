//! Board wiring for a Raspberry Pi Pico
//!
//! | Function        | GPIO | Peripheral   |
//! |-----------------|------|--------------|
//! | Fan PWM         | 2    | PWM slice 1A |
//! | LCD SDA         | 4    | I2C0         |
//! | LCD SCL         | 5    | I2C0         |
//! | Button (to GND) | 15   | input, pull-up |
//! | DS18B20 data    | 16   | PIO0 SM0     |
//!
//! The pins themselves are taken in `main`; this module only holds the
//! timing and bus parameters that go with them.

/// Button polling period (ms)
pub const BUTTON_POLL_MS: u64 = 1;

/// LCD backpack bus speed
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

// Each sample reads the conversion started one sample earlier
const _: () = assert!(
    fanctl_core::controller::SAMPLE_INTERVAL_MS >= fanctl_drivers::sensor::ds18b20::CONVERSION_MS
);

//! Configuration type definitions
//!
//! The runtime-editable parameter set and its bounds. Configuration is
//! stored in flash as a postcard-serialized [`SettingsRecord`](super::SettingsRecord).

/// Lowest temperature the controller can target (°C)
pub const MIN_CTR_TEMP: u8 = 20;

/// Highest temperature the controller can target (°C)
pub const MAX_CTR_TEMP: u8 = 80;

/// Smallest hysteresis band (duty %)
pub const MIN_HYSTERESIS: u8 = 1;

/// Largest hysteresis band (duty %)
pub const MAX_HYSTERESIS: u8 = 10;

/// Smallest PID gain reachable from the menu
pub const MIN_GAIN: f32 = 0.1;

/// Largest PID gain reachable from the menu
pub const MAX_GAIN: f32 = 10.0;

/// Proportional, integral and derivative gains
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

/// Controller configuration
///
/// Owned by the controller; the menu edits it in place and the settings
/// store persists it on menu exit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// PID mode when true, linear mode otherwise
    pub pid_enabled: bool,
    /// PID target temperature (°C)
    pub setpoint: u8,
    /// Proportional gain
    pub kp: f32,
    /// Integral gain
    pub ki: f32,
    /// Derivative gain
    pub kd: f32,
    /// Linear mode: temperature at which the fan starts (°C)
    pub start_temp: u8,
    /// Linear mode: temperature at which the fan reaches 100% (°C)
    pub end_temp: u8,
    /// Linear mode: minimum duty change before the output moves (%)
    pub hysteresis: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            pid_enabled: false,
            setpoint: 50,
            kp: 2.0,
            ki: 5.0,
            kd: 1.0,
            start_temp: 30,
            end_temp: 50,
            hysteresis: 3,
        }
    }
}

impl Configuration {
    /// Current PID gains
    pub fn gains(&self) -> PidGains {
        PidGains {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        }
    }

    /// Check every invariant the menu maintains
    ///
    /// A decoded record that fails this check is discarded as a whole.
    pub fn is_valid(&self) -> bool {
        self.start_temp < self.end_temp
            && self.start_temp >= MIN_CTR_TEMP
            && self.end_temp <= MAX_CTR_TEMP
            && (MIN_HYSTERESIS..=MAX_HYSTERESIS).contains(&self.hysteresis)
            && (MIN_CTR_TEMP..=MAX_CTR_TEMP).contains(&self.setpoint)
            && gain_in_range(self.kp)
            && gain_in_range(self.ki)
            && gain_in_range(self.kd)
    }
}

// NaN fails both comparisons.
fn gain_in_range(gain: f32) -> bool {
    gain > 0.0 && gain <= MAX_GAIN
}

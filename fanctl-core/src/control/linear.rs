//! Linear temperature-to-duty mapping with hysteresis
//!
//! Below the start temperature the fan is off, above the end temperature it
//! runs flat out, and in between the duty rises linearly. A hysteresis band
//! suppresses small output changes so the fan does not hunt around a
//! boundary.

/// Map a temperature onto a duty percentage
///
/// Interpolation runs on tenths of a degree, truncated, so the result is a
/// whole percent in `0..=100` that never decreases as `temp` rises.
pub fn map_temperature_to_duty(temp: f32, start_temp: u8, end_temp: u8) -> u8 {
    if temp <= start_temp as f32 {
        return 0;
    }
    if temp >= end_temp as f32 {
        return 100;
    }

    let temp_x10 = (temp * 10.0) as i32;
    let start_x10 = start_temp as i32 * 10;
    let end_x10 = end_temp as i32 * 10;

    let duty = (temp_x10 - start_x10) * 100 / (end_x10 - start_x10);
    duty.clamp(0, 100) as u8
}

/// Last duty emitted by the linear controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HysteresisMemory {
    last_duty: u8,
}

impl HysteresisMemory {
    /// Memory holding a given previous duty
    pub const fn with_last(last_duty: u8) -> Self {
        Self { last_duty }
    }

    /// Previously emitted duty
    pub fn last(&self) -> u8 {
        self.last_duty
    }

    /// Filter a freshly computed duty through the hysteresis band
    ///
    /// Fully off and fully on always pass straight through. Anything else
    /// only replaces the previous output when it differs by at least `band`.
    pub fn apply(&mut self, duty: u8, band: u8) -> u8 {
        if duty == 0 || duty == 100 || duty.abs_diff(self.last_duty) >= band {
            self.last_duty = duty;
        }
        self.last_duty
    }
}

/// Linear duty for a temperature, filtered through the hysteresis memory
pub fn compute_linear_duty(
    temp: f32,
    start_temp: u8,
    end_temp: u8,
    band: u8,
    memory: &mut HysteresisMemory,
) -> u8 {
    let duty = map_temperature_to_duty(temp, start_temp, end_temp);
    memory.apply(duty, band)
}

//! Reverse-acting PID controller
//!
//! A fan cools, so the output must rise when the temperature is above the
//! setpoint. The error is therefore taken as `input - setpoint`.
//!
//! Discrete form evaluated once per sample period:
//!
//! ```text
//! sum    = clamp(sum + Ki·T·e)
//! output = clamp(Kp·e + sum + (Kd/T)·(input - last_input))
//! ```
//!
//! The derivative acts on the measurement, so setpoint edits from the menu
//! do not kick the output.

use crate::config::PidGains;

/// Control sample period (ms)
pub const PID_SAMPLE_MS: u32 = 1000;

/// Lower output bound (duty %)
pub const OUTPUT_MIN: f32 = 0.0;

/// Upper output bound (duty %)
pub const OUTPUT_MAX: f32 = 100.0;

/// Gains scaled by the sample period
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct ScaledGains {
    kp: f32,
    ki: f32,
    kd: f32,
}

impl ScaledGains {
    fn new(gains: PidGains, sample_ms: u32) -> Self {
        let period_s = sample_ms as f32 / 1000.0;
        Self {
            kp: gains.kp,
            ki: gains.ki * period_s,
            kd: gains.kd / period_s,
        }
    }
}

/// PID controller state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidController {
    gains: ScaledGains,
    sample_ms: u32,
    /// Accumulated integral term, kept inside the output range
    output_sum: f32,
    /// Previous measurement for the derivative term
    last_input: Option<f32>,
    /// Last computed output
    output: f32,
}

impl PidController {
    /// Create a controller with the default sample period
    pub fn new(gains: PidGains) -> Self {
        Self::with_sample_period(gains, PID_SAMPLE_MS)
    }

    /// Create a controller evaluated every `sample_ms` milliseconds
    pub fn with_sample_period(gains: PidGains, sample_ms: u32) -> Self {
        Self {
            gains: ScaledGains::new(gains, sample_ms),
            sample_ms,
            output_sum: OUTPUT_MIN,
            last_input: None,
            output: OUTPUT_MIN,
        }
    }

    /// Replace the gains
    ///
    /// The accumulated integral term is kept so the output does not jump.
    pub fn set_tunings(&mut self, gains: PidGains) {
        self.gains = ScaledGains::new(gains, self.sample_ms);
    }

    /// Last computed output (duty %)
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Accumulated integral term
    pub fn integral(&self) -> f32 {
        self.output_sum
    }

    /// Evaluate one sample period
    ///
    /// Returns the new output in `0.0..=100.0`.
    pub fn compute(&mut self, input: f32, setpoint: f32) -> f32 {
        let error = input - setpoint;
        // First sample after construction: no derivative kick.
        let d_input = match self.last_input {
            Some(last) => input - last,
            None => 0.0,
        };

        self.output_sum = clamp_output(self.output_sum + self.gains.ki * error);

        let output = self.gains.kp * error + self.output_sum + self.gains.kd * d_input;
        self.output = clamp_output(output);
        self.last_input = Some(input);

        self.output
    }

    /// Evaluate one sample period and truncate to a whole duty percent
    pub fn compute_duty(&mut self, input: f32, setpoint: u8) -> u8 {
        self.compute(input, setpoint as f32) as u8
    }
}

fn clamp_output(value: f32) -> f32 {
    if value > OUTPUT_MAX {
        OUTPUT_MAX
    } else if value < OUTPUT_MIN {
        OUTPUT_MIN
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gains(kp: f32, ki: f32, kd: f32) -> PidGains {
        PidGains { kp, ki, kd }
    }

    #[test]
    fn test_below_setpoint_stays_off() {
        let mut pid = PidController::new(gains(2.0, 5.0, 1.0));
        for _ in 0..10 {
            assert_eq!(pid.compute_duty(40.0, 50), 0);
        }
        assert_eq!(pid.integral(), 0.0);
    }

    #[test]
    fn test_above_setpoint_drives_fan() {
        let mut pid = PidController::new(gains(2.0, 0.5, 0.0));
        // e = 5: sum = 2.5, output = 10 + 2.5
        assert_eq!(pid.compute_duty(55.0, 50), 12);
        // sum = 5.0, output = 15
        assert_eq!(pid.compute_duty(55.0, 50), 15);
    }

    #[test]
    fn test_output_clamped() {
        let mut pid = PidController::new(gains(10.0, 10.0, 10.0));
        assert_eq!(pid.compute(90.0, 20.0), 100.0);
        assert_eq!(pid.integral(), 100.0);
        assert_eq!(pid.compute(-10.0, 80.0), 0.0);
    }

    #[test]
    fn test_derivative_on_measurement() {
        let mut pid = PidController::new(gains(0.1, 0.1, 2.0));
        pid.compute(50.0, 50.0);
        // Rising temperature adds Kd * 3 even with zero error
        let out = pid.compute(53.0, 53.0);
        assert!((out - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_tunings_keeps_integral() {
        let mut pid = PidController::new(gains(1.0, 1.0, 0.1));
        pid.compute(60.0, 50.0);
        pid.compute(60.0, 50.0);
        let sum = pid.integral();
        assert!(sum > 0.0);

        pid.set_tunings(gains(3.0, 0.2, 0.1));
        assert_eq!(pid.integral(), sum);
    }

    #[test]
    fn test_sample_period_scales_gains() {
        let mut pid = PidController::with_sample_period(gains(0.1, 4.0, 0.1), 500);
        pid.compute(50.0, 50.0);
        // Ki * 0.5 s * e = 4 * 0.5 * 2
        pid.compute(52.0, 50.0);
        assert!((pid.integral() - 4.0).abs() < 1e-4);
    }
}

//! Duty selection
//!
//! Combines the startup/sensor guard with the two control strategies.
//! While warming up or while the sensor is faulty the fan is forced to full
//! speed and neither strategy is evaluated.

use crate::config::{Configuration, PidGains};
use crate::traits::SensorError;

use super::linear::{compute_linear_duty, HysteresisMemory};
use super::pid::PidController;

/// Time after boot during which readings are not trusted (ms)
pub const WARMUP_MS: u64 = 7000;

/// Temperature value a disconnected DS18B20 reports (°C)
pub const DISCONNECTED_C: f32 = -127.0;

/// Duty applied whenever the control law is bypassed (%)
pub const FAILSAFE_DUTY: u8 = 100;

/// Why a duty was chosen
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlStatus {
    /// Still inside the warm-up window
    WarmingUp,
    /// Reading was invalid
    SensorFault(SensorError),
    /// Control law evaluated on a valid reading (°C)
    Regulating(f32),
}

/// Outcome of one control update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyDecision {
    /// Duty to apply (0-100 %)
    pub duty: u8,
    pub status: ControlStatus,
}

impl DutyDecision {
    /// Whether the fail-safe override produced this duty
    pub fn is_failsafe(&self) -> bool {
        !matches!(self.status, ControlStatus::Regulating(_))
    }
}

/// Reject sentinel and NaN readings
pub fn classify_reading(reading: Result<f32, SensorError>) -> Result<f32, SensorError> {
    let temp = reading?;
    if temp.is_nan() {
        Err(SensorError::NotANumber)
    } else if temp == DISCONNECTED_C {
        Err(SensorError::Disconnected)
    } else {
        Ok(temp)
    }
}

/// Duty controller holding the state of both strategies
///
/// Switching modes leaves the inactive strategy's state untouched, so
/// flipping back resumes from the previous operating point.
#[derive(Debug, Clone)]
pub struct DutyController {
    memory: HysteresisMemory,
    pid: PidController,
}

impl DutyController {
    /// Create a controller using the configured gains
    pub fn new(config: &Configuration) -> Self {
        Self {
            memory: HysteresisMemory::default(),
            pid: PidController::new(config.gains()),
        }
    }

    /// Run the guard and, if it passes, the active control law
    pub fn update(
        &mut self,
        reading: Result<f32, SensorError>,
        uptime_ms: u64,
        config: &Configuration,
    ) -> DutyDecision {
        if uptime_ms < WARMUP_MS {
            return DutyDecision {
                duty: FAILSAFE_DUTY,
                status: ControlStatus::WarmingUp,
            };
        }

        let temp = match classify_reading(reading) {
            Ok(temp) => temp,
            Err(e) => {
                return DutyDecision {
                    duty: FAILSAFE_DUTY,
                    status: ControlStatus::SensorFault(e),
                }
            }
        };

        let duty = if config.pid_enabled {
            self.pid.compute_duty(temp, config.setpoint)
        } else {
            compute_linear_duty(
                temp,
                config.start_temp,
                config.end_temp,
                config.hysteresis,
                &mut self.memory,
            )
        };

        DutyDecision {
            duty,
            status: ControlStatus::Regulating(temp),
        }
    }

    /// Apply new PID gains without resetting the controller
    pub fn apply_gains(&mut self, gains: PidGains) {
        self.pid.set_tunings(gains);
    }

    /// Hysteresis memory of the linear strategy
    pub fn memory(&self) -> &HysteresisMemory {
        &self.memory
    }

    /// PID strategy state
    pub fn pid(&self) -> &PidController {
        &self.pid
    }
}

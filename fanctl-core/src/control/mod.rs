//! Fan duty control
//!
//! - [`linear`] - Temperature band mapping with hysteresis
//! - [`pid`] - Reverse-acting PID
//! - [`duty`] - Warm-up and sensor guard, mode selection

pub mod duty;
pub mod linear;
pub mod pid;

pub use duty::{
    classify_reading, ControlStatus, DutyController, DutyDecision, DISCONNECTED_C, FAILSAFE_DUTY,
    WARMUP_MS,
};
pub use linear::{compute_linear_duty, map_temperature_to_duty, HysteresisMemory};
pub use pid::{PidController, PID_SAMPLE_MS};

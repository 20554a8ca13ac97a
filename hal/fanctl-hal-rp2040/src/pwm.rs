//! Fan PWM configuration
//!
//! 4-pin PC fans expect a 25 kHz control signal. The slice runs in
//! phase-correct mode from the 125 MHz system clock, so one period is
//! `2 * (top + 1)` cycles.

use embassy_rp::pwm::{ChannelAPin, Config, Pwm, PwmOutput, Slice};
use embassy_rp::Peri;

/// System clock the divider is computed for
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Fan control frequency
pub const FAN_PWM_HZ: u32 = 25_000;

/// Counter top for [`FAN_PWM_HZ`] in phase-correct mode
pub const FAN_PWM_TOP: u16 = (SYS_CLK_HZ / (2 * FAN_PWM_HZ) - 1) as u16;

const _: () = assert!(SYS_CLK_HZ / (2 * (FAN_PWM_TOP as u32 + 1)) == FAN_PWM_HZ);

/// Slice configuration for the fan output, starting at full speed
pub fn fan_pwm_config() -> Config {
    let mut config = Config::default();
    config.phase_correct = true;
    config.divider = 1.into();
    config.top = FAN_PWM_TOP;
    config.compare_a = FAN_PWM_TOP + 1;
    config
}

/// Configure `slice` for the fan and hand back its channel A output
///
/// The output implements `embedded_hal::pwm::SetDutyCycle`.
pub fn fan_output<'d, T: Slice>(
    slice: Peri<'d, T>,
    pin: Peri<'d, impl ChannelAPin<T>>,
) -> Option<PwmOutput<'d>> {
    let pwm = Pwm::new_output_a(slice, pin, fan_pwm_config());
    let (a, _) = pwm.split();
    a
}

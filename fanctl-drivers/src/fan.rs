//! PWM fan output
//!
//! Wraps any `embedded-hal` PWM channel. The duty cycle is applied as a
//! percentage of the channel's top value, so the same driver works for
//! whatever PWM frequency the board configures.

use embedded_hal::pwm::SetDutyCycle;
use fanctl_core::traits::FanOutput;

/// Fan driven by a PWM channel
pub struct PwmFan<P> {
    channel: P,
    duty: u8,
}

impl<P: SetDutyCycle> PwmFan<P> {
    /// Wrap a channel; the fan is started at 100 % until the first sample
    pub fn new(mut channel: P) -> Self {
        let duty = match channel.set_duty_cycle_fully_on() {
            Ok(()) => 100,
            // Unknown output; the first update overwrites it
            Err(_) => u8::MAX,
        };
        Self { channel, duty }
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> FanOutput for PwmFan<P> {
    fn set_duty_cycle(&mut self, percent: u8) {
        let percent = percent.min(100);
        match self.channel.set_duty_cycle_percent(percent) {
            Ok(()) => self.duty = percent,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("fan PWM update to {}% failed", percent);
            }
        }
    }

    fn duty_cycle(&self) -> u8 {
        self.duty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    struct MockPwm {
        max: u16,
        duty: u16,
        fail: bool,
    }

    impl ErrorType for MockPwm {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.duty = duty;
            Ok(())
        }
    }

    fn pwm(max: u16) -> MockPwm {
        MockPwm {
            max,
            duty: 1234,
            fail: false,
        }
    }

    #[test]
    fn test_starts_full_speed() {
        let fan = PwmFan::new(pwm(2500));
        assert_eq!(fan.duty_cycle(), 100);
        assert_eq!(fan.release().duty, 2500);
    }

    #[test]
    fn test_unknown_start_state_on_failure() {
        let mut channel = pwm(2500);
        channel.fail = true;
        let mut fan = PwmFan::new(channel);
        assert_eq!(fan.duty_cycle(), u8::MAX);

        fan.channel.fail = false;
        fan.set_duty_cycle(30);
        assert_eq!(fan.duty_cycle(), 30);
    }

    #[test]
    fn test_percent_scales_to_top() {
        let mut fan = PwmFan::new(pwm(2500));
        fan.set_duty_cycle(40);
        assert_eq!(fan.duty_cycle(), 40);
        assert_eq!(fan.release().duty, 1000);
    }

    #[test]
    fn test_clamps_above_full() {
        let mut fan = PwmFan::new(pwm(2500));
        fan.set_duty_cycle(150);
        assert_eq!(fan.duty_cycle(), 100);
        assert_eq!(fan.release().duty, 2500);
    }

    #[test]
    fn test_failed_update_keeps_last_duty() {
        let mut fan = PwmFan::new(pwm(2500));
        fan.set_duty_cycle(60);
        fan.channel.fail = true;
        fan.set_duty_cycle(20);
        assert_eq!(fan.duty_cycle(), 60);
    }
}

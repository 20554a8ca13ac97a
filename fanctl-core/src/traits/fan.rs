//! Fan output trait

/// A PWM-driven fan
pub trait FanOutput {
    /// Set the drive duty cycle
    ///
    /// `percent` is clamped to `0..=100` by implementations.
    fn set_duty_cycle(&mut self, percent: u8);

    /// Currently applied duty cycle (0-100 %)
    fn duty_cycle(&self) -> u8;
}

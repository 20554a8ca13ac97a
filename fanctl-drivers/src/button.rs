//! Push button gesture decoder
//!
//! Turns a raw pin level sampled from the main loop into single clicks,
//! double clicks and repeated steps while held. The decoder is driven purely
//! by the timestamps it is given, so it needs no timer of its own.
//!
//! ```text
//! press ─ release ─(300 ms quiet)──────────────▶ Single
//! press ─ release ─ press (within 300 ms) ─────▶ Double
//! press ─(held 500 ms)─▶ Step ─(every 150 ms)─▶ Step ...
//! ```

use embedded_hal::digital::InputPin;
use fanctl_core::traits::{ButtonEvent, ButtonSource};

/// Level must be stable this long to count (ms)
pub const DEBOUNCE_MS: u32 = 50;

/// Window for the second press of a double click (ms)
pub const DOUBLE_CLICK_MS: u32 = 300;

/// Hold time before stepping starts (ms)
pub const HOLD_MS: u32 = 500;

/// Interval between steps while held (ms)
pub const STEP_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Idle,
    /// First press, waiting for release or hold timeout
    Pressed { since: u32 },
    /// Released once, waiting for a second press
    Released { at: u32 },
    /// Held past the hold timeout
    Holding { last_step: u32 },
    /// Gesture already reported, waiting for release
    WaitRelease,
}

/// Debounced gesture state machine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickDecoder {
    phase: Phase,
    /// Debounced level
    stable: bool,
    /// Last raw level seen
    raw: bool,
    raw_since: u32,
}

impl ClickDecoder {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            stable: false,
            raw: false,
            raw_since: 0,
        }
    }

    /// Feed the raw level (`true` = pressed) at time `now_ms`
    pub fn update(&mut self, now_ms: u32, pressed: bool) -> Option<ButtonEvent> {
        let edge = self.debounce(now_ms, pressed);

        match (self.phase, edge) {
            (Phase::Idle, Some(true)) => {
                self.phase = Phase::Pressed { since: now_ms };
                None
            }
            (Phase::Pressed { .. }, Some(false)) => {
                self.phase = Phase::Released { at: now_ms };
                None
            }
            (Phase::Pressed { since }, None) if elapsed(now_ms, since) >= HOLD_MS => {
                self.phase = Phase::Holding { last_step: now_ms };
                Some(ButtonEvent::Step)
            }
            (Phase::Released { .. }, Some(true)) => {
                self.phase = Phase::WaitRelease;
                Some(ButtonEvent::Double)
            }
            (Phase::Released { at }, None) if elapsed(now_ms, at) >= DOUBLE_CLICK_MS => {
                self.phase = Phase::Idle;
                Some(ButtonEvent::Single)
            }
            (Phase::Holding { .. }, Some(false)) | (Phase::WaitRelease, Some(false)) => {
                self.phase = Phase::Idle;
                None
            }
            (Phase::Holding { last_step }, None) if elapsed(now_ms, last_step) >= STEP_MS => {
                self.phase = Phase::Holding { last_step: now_ms };
                Some(ButtonEvent::Step)
            }
            _ => None,
        }
    }

    /// Returns the new debounced level when it changes
    fn debounce(&mut self, now_ms: u32, pressed: bool) -> Option<bool> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since = now_ms;
        }
        if self.raw != self.stable && elapsed(now_ms, self.raw_since) >= DEBOUNCE_MS {
            self.stable = self.raw;
            return Some(self.stable);
        }
        None
    }
}

impl Default for ClickDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed(now_ms: u32, since: u32) -> u32 {
    now_ms.wrapping_sub(since)
}

/// Button on a GPIO pin
pub struct Button<P> {
    pin: P,
    active_low: bool,
    decoder: ClickDecoder,
}

impl<P: InputPin> Button<P> {
    /// Button pulling the pin to ground when pressed
    pub fn new_active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            decoder: ClickDecoder::new(),
        }
    }

    /// Button pulling the pin high when pressed
    pub fn new_active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            decoder: ClickDecoder::new(),
        }
    }

    fn is_pressed(&mut self) -> bool {
        // A read error counts as released
        let result = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        result.unwrap_or(false)
    }
}

impl<P: InputPin> ButtonSource for Button<P> {
    fn poll(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        let pressed = self.is_pressed();
        self.decoder.update(now_ms, pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Drive the decoder with (duration_ms, pressed) segments, polling every ms
    fn run(segments: &[(u32, bool)]) -> Vec<(u32, ButtonEvent)> {
        let mut decoder = ClickDecoder::new();
        let mut events = Vec::new();
        let mut now = 1;
        for &(duration, pressed) in segments {
            for _ in 0..duration {
                if let Some(event) = decoder.update(now, pressed) {
                    events.push((now, event));
                }
                now += 1;
            }
        }
        events
    }

    fn kinds(events: &[(u32, ButtonEvent)]) -> Vec<ButtonEvent> {
        events.iter().map(|(_, e)| *e).collect()
    }

    #[test]
    fn test_single_click() {
        let events = run(&[(100, true), (500, false)]);
        assert_eq!(kinds(&events), vec![ButtonEvent::Single]);
    }

    #[test]
    fn test_double_click() {
        let events = run(&[(100, true), (120, false), (100, true), (500, false)]);
        assert_eq!(kinds(&events), vec![ButtonEvent::Double]);
    }

    #[test]
    fn test_slow_second_click_is_two_singles() {
        let events = run(&[
            (100, true),
            (600, false),
            (100, true),
            (600, false),
        ]);
        assert_eq!(kinds(&events), vec![ButtonEvent::Single, ButtonEvent::Single]);
    }

    #[test]
    fn test_hold_repeats_steps() {
        // Press registers at t=51, first step 500 ms later, then every 150 ms
        // until the release is debounced at t=1051
        let events = run(&[(1000, true), (400, false)]);
        let steps: Vec<u32> = events.iter().map(|(t, _)| *t).collect();
        assert!(kinds(&events).iter().all(|e| *e == ButtonEvent::Step));
        assert_eq!(steps, vec![551, 701, 851, 1001]);
    }

    #[test]
    fn test_bounce_is_filtered() {
        let mut segments = Vec::new();
        for _ in 0..5 {
            segments.push((3, true));
            segments.push((3, false));
        }
        segments.push((500, false));
        assert!(run(&segments).is_empty());
    }

    struct MockPin {
        low: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }

    #[test]
    fn test_active_low_pin() {
        let mut button = Button::new_active_low(MockPin { low: true });
        let mut event = None;
        for now in 1..=200 {
            if now == 100 {
                button.pin.low = false;
            }
            if let Some(e) = button.poll(now) {
                event = Some(e);
            }
        }
        assert_eq!(event, None);
        for now in 201..=600 {
            if let Some(e) = button.poll(now) {
                event = Some(e);
            }
        }
        assert_eq!(event, Some(ButtonEvent::Single));
    }

    #[test]
    fn test_active_high_idle_pin() {
        let mut button = Button::new_active_high(MockPin { low: true });
        assert!((1..1000).all(|now| button.poll(now).is_none()));
    }
}

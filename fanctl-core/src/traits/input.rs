//! Button input

/// Decoded button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Short press with no second press following
    Single,
    /// Two short presses in quick succession
    Double,
    /// Emitted repeatedly while the button is held
    Step,
}

/// Source of decoded button events
///
/// Polled from the main loop with a monotonic millisecond timestamp.
pub trait ButtonSource {
    fn poll(&mut self, now_ms: u32) -> Option<ButtonEvent>;
}

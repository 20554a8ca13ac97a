//! Screen state machine
//!
//! What the display shows is a function of the current screen and an event.

use super::events::ScreenEvent;

/// Screen modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenMode {
    /// Warm-up in progress
    #[default]
    Init,
    /// Sensor reading invalid
    Error,
    /// Live temperature and duty
    Main,
    /// Settings menu
    Menu,
}

impl ScreenMode {
    /// Check if this screen hands button clicks to the menu
    pub fn is_menu(&self) -> bool {
        matches!(self, ScreenMode::Menu)
    }

    /// Process an event and return the next screen
    pub fn transition(self, event: ScreenEvent) -> Self {
        use ScreenEvent::*;
        use ScreenMode::*;

        match (self, event) {
            // The menu stays up while control runs; samples don't evict it
            (Menu, MenuToggle) => Main,
            (Menu, _) => Menu,

            (_, MenuToggle) => Menu,
            (_, WarmingUp) => Init,
            (_, SensorFault) => Error,
            (_, SampleOk) => Main,
        }
    }
}

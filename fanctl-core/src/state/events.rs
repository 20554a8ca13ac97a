//! Events that drive screen transitions

use crate::control::ControlStatus;

/// Screen events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenEvent {
    /// Sample taken inside the warm-up window
    WarmingUp,
    /// Sample rejected by the sensor guard
    SensorFault,
    /// Valid sample regulated normally
    SampleOk,
    /// Double click: open or close the menu
    MenuToggle,
}

impl From<&ControlStatus> for ScreenEvent {
    fn from(status: &ControlStatus) -> Self {
        match status {
            ControlStatus::WarmingUp => ScreenEvent::WarmingUp,
            ControlStatus::SensorFault(_) => ScreenEvent::SensorFault,
            ControlStatus::Regulating(_) => ScreenEvent::SampleOk,
        }
    }
}

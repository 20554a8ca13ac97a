//! Menu pages
//!
//! The PID flag heads both pages and decides which one is shown. Toggling it
//! swaps the page in place.

use crate::config::Configuration;

use super::param::ParamId;

const PID_ITEMS: [ParamId; 5] = [
    ParamId::PidEnabled,
    ParamId::Setpoint,
    ParamId::Kp,
    ParamId::Ki,
    ParamId::Kd,
];

const LINEAR_ITEMS: [ParamId; 4] = [
    ParamId::PidEnabled,
    ParamId::StartTemp,
    ParamId::EndTemp,
    ParamId::Hysteresis,
];

/// A list of parameters shown together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    Pid,
    Linear,
}

impl Page {
    /// Page matching the configured mode
    pub fn for_config(config: &Configuration) -> Self {
        if config.pid_enabled {
            Page::Pid
        } else {
            Page::Linear
        }
    }

    /// Parameters on this page, in display order
    pub fn items(self) -> &'static [ParamId] {
        match self {
            Page::Pid => &PID_ITEMS,
            Page::Linear => &LINEAR_ITEMS,
        }
    }

    pub fn len(self) -> u8 {
        self.items().len() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_follows_flag() {
        let mut config = Configuration::default();
        assert_eq!(Page::for_config(&config), Page::Linear);
        config.pid_enabled = true;
        assert_eq!(Page::for_config(&config), Page::Pid);
    }

    #[test]
    fn test_flag_heads_both_pages() {
        assert_eq!(Page::Pid.items()[0], ParamId::PidEnabled);
        assert_eq!(Page::Linear.items()[0], ParamId::PidEnabled);
        assert_eq!(Page::Pid.len(), 5);
        assert_eq!(Page::Linear.len(), 4);
    }
}

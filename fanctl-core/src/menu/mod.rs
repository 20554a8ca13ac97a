//! Paginated settings menu
//!
//! The menu edits a [`Configuration`] owned by the caller. It never holds a
//! copy of the values, so what is shown is always what will be saved.
//!
//! - [`param`] - Parameter table, typed values and step rules
//! - [`page`] - PID and linear pages
//! - [`nav`] - Selection and scroll window

pub mod nav;
pub mod page;
pub mod param;

pub use nav::{NavState, ScrollPosition, MENU_ROWS};
pub use page::Page;
pub use param::{ParamId, ParamKind, ParamValue, Suffix};

use crate::config::Configuration;

/// Menu state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Menu {
    open: bool,
    nav: NavState,
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            open: false,
            nav: NavState::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the menu on the first item
    pub fn enter(&mut self) {
        self.open = true;
        self.nav.reset();
    }

    /// Close the menu
    ///
    /// Returns true when the menu was open, meaning the configuration
    /// should be committed.
    pub fn exit(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        was_open
    }

    /// Move the selection to the next item
    pub fn advance_selection(&mut self, config: &Configuration) {
        let page = Page::for_config(config);
        self.nav.advance(page.len(), MENU_ROWS);
    }

    /// Step the selected parameter
    ///
    /// Returns the parameter that changed. Editing the PID flag swaps the
    /// page; navigation is pulled back inside the new page afterwards.
    pub fn step_selected_value(&mut self, config: &mut Configuration) -> Option<ParamId> {
        let id = self.selected_param(config)?;
        id.step(config);
        self.nav.normalize(Page::for_config(config).len(), MENU_ROWS);
        Some(id)
    }

    /// Currently selected parameter
    pub fn selected_param(&self, config: &Configuration) -> Option<ParamId> {
        Page::for_config(config)
            .items()
            .get(self.nav.selected_index() as usize)
            .copied()
    }

    /// Parameters in the scroll window, top to bottom
    pub fn visible_items(&self, config: &Configuration) -> &'static [ParamId] {
        let items = Page::for_config(config).items();
        let start = (self.nav.window_start() as usize).min(items.len());
        let end = (start + MENU_ROWS as usize).min(items.len());
        &items[start..end]
    }

    /// Selected row within the window
    pub fn selected_row(&self) -> u8 {
        self.nav.selected_row()
    }

    pub fn scroll_position(&self, config: &Configuration) -> ScrollPosition {
        self.nav
            .scroll_position(Page::for_config(config).len(), MENU_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit() {
        let mut menu = Menu::new();
        assert!(!menu.is_open());
        assert!(!menu.exit());

        menu.enter();
        assert!(menu.is_open());
        assert!(menu.exit());
        assert!(!menu.is_open());
    }

    #[test]
    fn test_enter_resets_selection() {
        let config = Configuration::default();
        let mut menu = Menu::new();
        menu.enter();
        menu.advance_selection(&config);
        menu.advance_selection(&config);
        menu.exit();

        menu.enter();
        assert_eq!(menu.selected_param(&config), Some(ParamId::PidEnabled));
    }

    #[test]
    fn test_linear_page_window() {
        let config = Configuration::default();
        let mut menu = Menu::new();
        menu.enter();

        assert_eq!(
            menu.visible_items(&config),
            &[ParamId::PidEnabled, ParamId::StartTemp, ParamId::EndTemp]
        );
        assert_eq!(menu.scroll_position(&config), ScrollPosition::Top);

        for _ in 0..3 {
            menu.advance_selection(&config);
        }
        assert_eq!(
            menu.visible_items(&config),
            &[ParamId::StartTemp, ParamId::EndTemp, ParamId::Hysteresis]
        );
        assert_eq!(menu.selected_param(&config), Some(ParamId::Hysteresis));
        assert_eq!(menu.selected_row(), 2);
        assert_eq!(menu.scroll_position(&config), ScrollPosition::Bottom);
    }

    #[test]
    fn test_step_edits_selected() {
        let mut config = Configuration::default();
        let mut menu = Menu::new();
        menu.enter();
        menu.advance_selection(&config);

        assert_eq!(menu.step_selected_value(&mut config), Some(ParamId::StartTemp));
        assert_eq!(config.start_temp, 31);
    }

    #[test]
    fn test_toggle_flag_swaps_page() {
        let mut config = Configuration::default();
        let mut menu = Menu::new();
        menu.enter();

        assert_eq!(menu.step_selected_value(&mut config), Some(ParamId::PidEnabled));
        assert!(config.pid_enabled);
        assert_eq!(
            menu.visible_items(&config),
            &[ParamId::PidEnabled, ParamId::Setpoint, ParamId::Kp]
        );

        // Walk to Kd: five advances cover the PID page and wrap
        for _ in 0..4 {
            menu.advance_selection(&config);
        }
        assert_eq!(menu.selected_param(&config), Some(ParamId::Kd));
        assert_eq!(menu.scroll_position(&config), ScrollPosition::Bottom);
        menu.advance_selection(&config);
        assert_eq!(menu.selected_param(&config), Some(ParamId::PidEnabled));

        menu.step_selected_value(&mut config);
        assert!(!config.pid_enabled);
        assert_eq!(menu.selected_param(&config), Some(ParamId::PidEnabled));
    }

    #[test]
    fn test_gain_edit() {
        let mut config = Configuration {
            pid_enabled: true,
            ..Configuration::default()
        };
        let mut menu = Menu::new();
        menu.enter();
        menu.advance_selection(&config);
        menu.advance_selection(&config);

        assert_eq!(menu.step_selected_value(&mut config), Some(ParamId::Kp));
        assert_eq!(config.kp, 2.1);
        assert_eq!(ParamId::Kp.value(&config), ParamValue::Float(2.1));
    }
}

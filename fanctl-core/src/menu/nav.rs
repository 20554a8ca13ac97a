//! Scroll window navigation
//!
//! The selection moves down the visible rows, then the window scrolls one
//! item at a time, then everything wraps to the top.

use crate::traits::DISPLAY_ROWS;

/// Rows available for menu items; the bottom row holds the footer
pub const MENU_ROWS: u8 = DISPLAY_ROWS - 1;

/// Where the scroll window sits within the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollPosition {
    /// Whole page fits; no indicators
    Fits,
    /// More items below only
    Top,
    /// More items above and below
    Middle,
    /// More items above only
    Bottom,
}

impl ScrollPosition {
    /// Indicator on the first visible row
    pub fn shows_up(self) -> bool {
        matches!(self, ScrollPosition::Middle | ScrollPosition::Bottom)
    }

    /// Indicator on the last visible row
    pub fn shows_down(self) -> bool {
        matches!(self, ScrollPosition::Top | ScrollPosition::Middle)
    }
}

/// Selection and window state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavState {
    selected_row: u8,
    window_start: u8,
}

impl NavState {
    pub const fn new() -> Self {
        Self {
            selected_row: 0,
            window_start: 0,
        }
    }

    /// Selected row within the window
    pub fn selected_row(&self) -> u8 {
        self.selected_row
    }

    /// Index of the first visible item
    pub fn window_start(&self) -> u8 {
        self.window_start
    }

    /// Index of the selected item within the page
    pub fn selected_index(&self) -> u8 {
        self.window_start + self.selected_row
    }

    /// Back to the first item
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move the selection one item down, scrolling or wrapping as needed
    pub fn advance(&mut self, total: u8, rows: u8) {
        if total == 0 || rows == 0 {
            self.reset();
            return;
        }

        if total <= rows {
            self.window_start = 0;
            self.selected_row = (self.selected_row + 1) % total;
        } else if self.selected_row + 1 < rows {
            self.selected_row += 1;
        } else if self.window_start + rows < total {
            self.window_start += 1;
        } else {
            self.reset();
        }
    }

    /// Pull the window back inside a page of `total` items
    pub fn normalize(&mut self, total: u8, rows: u8) {
        if total == 0 || rows == 0 {
            self.reset();
            return;
        }

        if total <= rows {
            self.window_start = 0;
            self.selected_row = self.selected_row.min(total - 1);
        } else {
            self.window_start = self.window_start.min(total - rows);
            self.selected_row = self.selected_row.min(rows - 1);
        }
    }

    /// Scroll indicator state for a page of `total` items
    pub fn scroll_position(&self, total: u8, rows: u8) -> ScrollPosition {
        if total <= rows {
            ScrollPosition::Fits
        } else if self.window_start == 0 {
            ScrollPosition::Top
        } else if self.window_start + rows >= total {
            ScrollPosition::Bottom
        } else {
            ScrollPosition::Middle
        }
    }
}

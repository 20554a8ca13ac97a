//! Screen layouts
//!
//! Builds frames for the different screen modes on a 20x4 grid.

use core::fmt::Write;

use crate::config::Configuration;
use crate::menu::param::DEGREE_CHAR;
use crate::menu::{Menu, MENU_ROWS};
use crate::traits::{DISPLAY_COLS, DISPLAY_ROWS};

use super::frame::Frame;
use super::glyphs::Glyph;

/// Column holding the menu scroll indicators
const EDGE_COL: u8 = DISPLAY_COLS - 1;

/// Stars in a full progress bar
const BAR_WIDTH: u8 = DISPLAY_COLS;

/// Direction the temperature moved since the previous sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Steady,
}

impl Trend {
    /// Compare two readings at display resolution (0.1 °C)
    pub fn between(previous: Option<f32>, current: f32) -> Self {
        let Some(previous) = previous else {
            return Trend::Steady;
        };
        let (prev, now) = (tenths(previous), tenths(current));
        if now > prev {
            Trend::Rising
        } else if now < prev {
            Trend::Falling
        } else {
            Trend::Steady
        }
    }

    /// Character code drawn for this trend
    pub fn code(self) -> u8 {
        match self {
            Trend::Rising => Glyph::TrendUp.code(),
            Trend::Falling => Glyph::TrendDown.code(),
            Trend::Steady => b' ',
        }
    }
}

fn tenths(temp: f32) -> i32 {
    let scaled = temp * 10.0;
    if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    }
}

/// Data shown on the main screen
#[derive(Debug, Clone, Copy)]
pub struct MainView<'a> {
    /// Latest valid temperature (°C)
    pub temperature: f32,
    pub trend: Trend,
    /// Applied duty (%)
    pub duty: u8,
    pub config: &'a Configuration,
}

/// Warm-up message
pub fn compose_init(frame: &mut Frame) {
    frame.clear();
    frame.put_str(3, 1, "Initializing...");
}

/// Sensor fault message
pub fn compose_error(frame: &mut Frame) {
    frame.clear();
    frame.put_str(4, 1, "Sensor Error!");
}

/// Live temperature, duty, progress bar and mode summary
pub fn compose_main(frame: &mut Frame, view: &MainView<'_>) {
    frame.clear();

    let mut w = frame.writer(0, 0);
    let _ = write!(w, "Temp: {:.1}", view.temperature);
    w.codes(&[DEGREE_CHAR, b'C', b' ', view.trend.code()]);

    let _ = write!(frame.writer(0, 1), "Fan speed: {}%", view.duty);

    let stars = (view.duty.min(100) / (100 / BAR_WIDTH)) as usize;
    let mut bar = [b' '; BAR_WIDTH as usize];
    bar[..stars].fill(b'*');
    frame.put(0, 2, &bar);

    let config = view.config;
    let mut w = frame.writer(0, DISPLAY_ROWS - 1);
    if config.pid_enabled {
        let _ = write!(w, "PID  target {}", config.setpoint);
    } else {
        let _ = write!(w, "Linear {}-{}", config.start_temp, config.end_temp);
    }
    w.codes(&[DEGREE_CHAR, b'C']);
}

/// Menu window with selection marker, values and scroll indicators
pub fn compose_menu(frame: &mut Frame, menu: &Menu, config: &Configuration) {
    frame.clear();

    let items = menu.visible_items(config);
    let scroll = menu.scroll_position(config);

    for (row, id) in items.iter().enumerate() {
        let row = row as u8;
        if row == menu.selected_row() {
            frame.put_char(0, row, Glyph::Select.code());
        }
        frame.put_str(1, row, id.label());

        let mut value: heapless::Vec<u8, 12> = heapless::Vec::new();
        let mut text: heapless::String<8> = heapless::String::new();
        let _ = write!(text, "{}", id.value(config));
        let _ = value.extend_from_slice(text.as_bytes());
        let _ = value.extend_from_slice(id.suffix().codes());
        frame.put_right(EDGE_COL, row, &value);
    }

    if let Some(last) = (items.len() as u8).checked_sub(1) {
        if scroll.shows_up() {
            frame.put_char(EDGE_COL, 0, Glyph::ScrollUp.code());
        }
        if scroll.shows_down() {
            frame.put_char(EDGE_COL, last, Glyph::ScrollDown.code());
        }
    }

    frame.put_str(0, MENU_ROWS, "1x:next hold:+ 2x:ok");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(frame: &Frame, row: u8) -> std::string::String {
        frame
            .row(row)
            .iter()
            .map(|&c| match c {
                DEGREE_CHAR => 'o',
                0..=7 => char::from(b'0' + c),
                _ => c as char,
            })
            .collect()
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::between(None, 30.0), Trend::Steady);
        assert_eq!(Trend::between(Some(30.0), 30.1), Trend::Rising);
        assert_eq!(Trend::between(Some(30.0), 29.9), Trend::Falling);
        // Below display resolution
        assert_eq!(Trend::between(Some(30.0), 30.02), Trend::Steady);
    }

    #[test]
    fn test_status_screens() {
        let mut frame = Frame::blank();
        compose_init(&mut frame);
        assert_eq!(row_text(&frame, 1), "   Initializing...  ");

        compose_error(&mut frame);
        assert_eq!(row_text(&frame, 1), "    Sensor Error!   ");
        assert_eq!(row_text(&frame, 0), " ".repeat(20));
    }

    #[test]
    fn test_main_screen() {
        let config = Configuration::default();
        let mut frame = Frame::blank();
        compose_main(
            &mut frame,
            &MainView {
                temperature: 38.44,
                trend: Trend::Rising,
                duty: 42,
                config: &config,
            },
        );

        assert_eq!(row_text(&frame, 0), "Temp: 38.4oC 1      ");
        assert_eq!(row_text(&frame, 1), "Fan speed: 42%      ");
        assert_eq!(row_text(&frame, 2), "********            ");
        assert_eq!(row_text(&frame, 3), "Linear 30-50oC      ");
    }

    #[test]
    fn test_full_bar() {
        let config = Configuration::default();
        let mut frame = Frame::blank();
        compose_main(
            &mut frame,
            &MainView {
                temperature: 60.0,
                trend: Trend::Steady,
                duty: 100,
                config: &config,
            },
        );
        assert_eq!(row_text(&frame, 2), "*".repeat(20));
    }

    #[test]
    fn test_menu_screen_top() {
        let config = Configuration::default();
        let mut menu = Menu::new();
        menu.enter();

        let mut frame = Frame::blank();
        compose_menu(&mut frame, &menu, &config);

        assert_eq!(row_text(&frame, 0), "0PID mode       Off ");
        assert_eq!(row_text(&frame, 1), " Start temp    30oC ");
        assert_eq!(row_text(&frame, 2), " End temp      50oC4");
    }

    #[test]
    fn test_menu_screen_bottom() {
        let config = Configuration::default();
        let mut menu = Menu::new();
        menu.enter();
        for _ in 0..3 {
            menu.advance_selection(&config);
        }

        let mut frame = Frame::blank();
        compose_menu(&mut frame, &menu, &config);

        assert_eq!(row_text(&frame, 0), " Start temp    30oC3");
        assert_eq!(row_text(&frame, 2), "0Hysteresis      3% ");
        assert_eq!(row_text(&frame, 3), "1x:next hold:+ 2x:ok");
    }
}

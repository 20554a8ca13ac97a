//! Render scheduler
//!
//! Keeps a shadow copy of what is on the display and only sends the runs of
//! characters that differ from the new frame. The display is cleared only
//! when the screen mode changes or a redraw is forced.

use crate::state::ScreenMode;
use crate::traits::{CharDisplay, DisplayError, DisplayExt, DISPLAY_ROWS};

use super::frame::Frame;

/// Differential renderer
pub struct Renderer {
    shadow: Frame,
    screen: Option<ScreenMode>,
}

impl Renderer {
    /// Create a renderer that will clear on first use
    pub const fn new() -> Self {
        Self {
            shadow: Frame::blank(),
            screen: None,
        }
    }

    /// Forget what is on the display; the next render clears first
    pub fn invalidate(&mut self) {
        self.screen = None;
    }

    /// What the renderer believes is currently shown
    pub fn shadow(&self) -> &Frame {
        &self.shadow
    }

    /// Bring the display in line with `frame`
    ///
    /// On a write error the shadow can no longer be trusted, so the next
    /// call starts from a full clear.
    pub fn render<D: CharDisplay>(
        &mut self,
        display: &mut D,
        screen: ScreenMode,
        frame: &Frame,
        force: bool,
    ) -> Result<(), DisplayError> {
        let result = self.draw(display, screen, frame, force);
        if result.is_err() {
            self.invalidate();
        }
        result
    }

    fn draw<D: CharDisplay>(
        &mut self,
        display: &mut D,
        screen: ScreenMode,
        frame: &Frame,
        force: bool,
    ) -> Result<(), DisplayError> {
        if force || self.screen != Some(screen) {
            display.clear()?;
            self.shadow.clear();
            self.screen = Some(screen);
        }

        for row in 0..DISPLAY_ROWS {
            let new = frame.row(row);
            let old = self.shadow.row(row);

            let mut col = 0;
            while col < new.len() {
                if new[col] == old[col] {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < new.len() && new[col] != old[col] {
                    col += 1;
                }
                display.bytes_at(start as u8, row, &new[start..col])?;
            }
        }

        self.shadow = frame.clone();
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Display double recording every operation
    #[derive(Default)]
    pub struct RecordingDisplay {
        pub clears: usize,
        pub writes: Vec<(u8, u8, Vec<u8>)>,
        pub glyphs: Vec<u8>,
        pub backlight: Option<bool>,
        cursor: (u8, u8),
        pub fail: bool,
    }

    impl RecordingDisplay {
        /// Total characters sent since the last reset
        pub fn chars_written(&self) -> usize {
            self.writes.iter().map(|(_, _, c)| c.len()).sum()
        }

        pub fn reset(&mut self) {
            self.clears = 0;
            self.writes.clear();
        }
    }

    impl CharDisplay for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.clears += 1;
            self.cursor = (0, 0);
            Ok(())
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.cursor = (col, row);
            self.writes.push((col, row, Vec::new()));
            Ok(())
        }

        fn write_char(&mut self, code: u8) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            match self.writes.last_mut() {
                Some(last) => last.2.push(code),
                None => self.writes.push((self.cursor.0, self.cursor.1, vec![code])),
            }
            self.cursor.0 += 1;
            Ok(())
        }

        fn create_glyph(&mut self, slot: u8, _bitmap: &[u8; 8]) -> Result<(), DisplayError> {
            self.glyphs.push(slot);
            Ok(())
        }

        fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.backlight = Some(on);
            Ok(())
        }
    }

    fn frame_with(row: u8, text: &str) -> Frame {
        let mut frame = Frame::blank();
        frame.put_str(0, row, text);
        frame
    }

    #[test]
    fn test_first_render_clears() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new();

        renderer
            .render(&mut display, ScreenMode::Main, &frame_with(0, "Temp: 30.0"), false)
            .unwrap();
        assert_eq!(display.clears, 1);
        // Blanks already match the cleared display
        assert_eq!(display.writes, vec![(0, 0, b"Temp: 30.0".to_vec())]);
    }

    #[test]
    fn test_only_changed_run_is_sent() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new();
        renderer
            .render(&mut display, ScreenMode::Main, &frame_with(0, "Temp: 30.0"), false)
            .unwrap();
        display.reset();

        renderer
            .render(&mut display, ScreenMode::Main, &frame_with(0, "Temp: 30.4"), false)
            .unwrap();
        assert_eq!(display.clears, 0);
        assert_eq!(display.writes, vec![(9, 0, b"4".to_vec())]);
    }

    #[test]
    fn test_shrinking_value_blanks_stale_digits() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new();
        renderer
            .render(&mut display, ScreenMode::Main, &frame_with(1, "Fan speed: 100%"), false)
            .unwrap();
        display.reset();

        renderer
            .render(&mut display, ScreenMode::Main, &frame_with(1, "Fan speed: 9%"), false)
            .unwrap();
        assert_eq!(display.writes, vec![(11, 1, b"9%  ".to_vec())]);
        assert_eq!(renderer.shadow(), &frame_with(1, "Fan speed: 9%"));
    }

    #[test]
    fn test_unchanged_frame_sends_nothing() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new();
        let frame = frame_with(2, "*****");
        renderer
            .render(&mut display, ScreenMode::Main, &frame, false)
            .unwrap();
        display.reset();

        renderer
            .render(&mut display, ScreenMode::Main, &frame, false)
            .unwrap();
        assert_eq!(display.clears, 0);
        assert_eq!(display.chars_written(), 0);
    }

    #[test]
    fn test_mode_change_and_force_clear() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new();
        let frame = frame_with(0, "x");

        renderer
            .render(&mut display, ScreenMode::Main, &frame, false)
            .unwrap();
        renderer
            .render(&mut display, ScreenMode::Menu, &frame, false)
            .unwrap();
        renderer
            .render(&mut display, ScreenMode::Menu, &frame, true)
            .unwrap();
        renderer
            .render(&mut display, ScreenMode::Menu, &frame, false)
            .unwrap();
        assert_eq!(display.clears, 3);
    }

    #[test]
    fn test_error_forces_full_redraw() {
        let mut display = RecordingDisplay::default();
        let mut renderer = Renderer::new();
        let frame = frame_with(0, "abc");
        renderer
            .render(&mut display, ScreenMode::Main, &frame, false)
            .unwrap();

        display.fail = true;
        assert_eq!(
            renderer.render(&mut display, ScreenMode::Main, &frame_with(0, "abd"), false),
            Err(DisplayError::Bus)
        );

        display.fail = false;
        display.reset();
        renderer
            .render(&mut display, ScreenMode::Main, &frame, false)
            .unwrap();
        assert_eq!(display.clears, 1);
        assert_eq!(display.chars_written(), 3);
    }
}

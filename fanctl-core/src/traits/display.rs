//! Character display trait
//!
//! Abstracts an HD44780-class character grid. Column and row are zero-based;
//! bytes below 8 address the custom glyph slots, everything else is sent to
//! the controller's character ROM unchanged.

/// Display width in characters
pub const DISPLAY_COLS: u8 = 20;

/// Display height in rows
pub const DISPLAY_ROWS: u8 = 4;

/// Number of custom glyph slots
pub const GLYPH_SLOTS: u8 = 8;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Cursor position outside the grid
    OutOfBounds,
    /// Glyph slot outside `0..GLYPH_SLOTS`
    InvalidGlyph,
}

/// Trait for character-grid displays
pub trait CharDisplay {
    /// Clear the entire screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write one character code at the cursor and advance it
    fn write_char(&mut self, code: u8) -> Result<(), DisplayError>;

    /// Write raw character codes at the cursor
    fn write_bytes(&mut self, codes: &[u8]) -> Result<(), DisplayError> {
        for &code in codes {
            self.write_char(code)?;
        }
        Ok(())
    }

    /// Write ASCII text at the cursor
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.write_bytes(text.as_bytes())
    }

    /// Upload a 5x8 glyph bitmap into a custom character slot
    fn create_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;
}

/// Helper trait for common drawing operations
pub trait DisplayExt: CharDisplay {
    /// Write character codes starting at a position
    fn bytes_at(&mut self, col: u8, row: u8, codes: &[u8]) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        self.write_bytes(codes)
    }

    /// Upload a set of glyphs into consecutive slots starting at 0
    fn load_glyphs(&mut self, glyphs: &[[u8; 8]]) -> Result<(), DisplayError> {
        for (slot, bitmap) in glyphs.iter().enumerate() {
            self.create_glyph(slot as u8, bitmap)?;
        }
        Ok(())
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay> DisplayExt for T {}

//! Frame buffer
//!
//! A full grid of character codes describing what the display should show.
//! Screens are composed into a frame; the scheduler diffs frames against
//! what is already on the glass.

use core::fmt;

use crate::traits::{DISPLAY_COLS, DISPLAY_ROWS};

const COLS: usize = DISPLAY_COLS as usize;
const ROWS: usize = DISPLAY_ROWS as usize;

/// Character grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    cells: [[u8; COLS]; ROWS],
}

impl Frame {
    /// All blanks
    pub const fn blank() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
        }
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        *self = Self::blank();
    }

    /// Character codes of one row
    pub fn row(&self, row: u8) -> &[u8] {
        match self.cells.get(row as usize) {
            Some(cells) => cells,
            None => &[],
        }
    }

    /// Place codes starting at a position, clipped to the row
    ///
    /// Returns the column after the last code written.
    pub fn put(&mut self, col: u8, row: u8, codes: &[u8]) -> u8 {
        let Some(cells) = self.cells.get_mut(row as usize) else {
            return col;
        };
        let start = (col as usize).min(COLS);
        let len = codes.len().min(COLS - start);
        cells[start..start + len].copy_from_slice(&codes[..len]);
        (start + len) as u8
    }

    /// Place text starting at a position
    pub fn put_str(&mut self, col: u8, row: u8, text: &str) -> u8 {
        self.put(col, row, text.as_bytes())
    }

    /// Place codes so the last one lands just before `end_col`
    pub fn put_right(&mut self, end_col: u8, row: u8, codes: &[u8]) -> u8 {
        let start = (end_col as usize).saturating_sub(codes.len());
        let skip = codes.len().saturating_sub(end_col as usize);
        self.put(start as u8, row, &codes[skip..])
    }

    /// Place a single code
    pub fn put_char(&mut self, col: u8, row: u8, code: u8) {
        self.put(col, row, &[code]);
    }

    /// Writer appending formatted text to a row from a starting column
    pub fn writer(&mut self, col: u8, row: u8) -> RowWriter<'_> {
        RowWriter {
            frame: self,
            col,
            row,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

/// `fmt::Write` adapter over one frame row
///
/// Text past the right edge is dropped.
pub struct RowWriter<'a> {
    frame: &'a mut Frame,
    col: u8,
    row: u8,
}

impl RowWriter<'_> {
    /// Column the next character lands in
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Append raw character codes
    pub fn codes(&mut self, codes: &[u8]) {
        self.col = self.frame.put(self.col, self.row, codes);
    }
}

impl fmt::Write for RowWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.codes(s.as_bytes());
        Ok(())
    }
}

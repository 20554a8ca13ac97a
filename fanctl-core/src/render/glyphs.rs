//! Custom character glyphs
//!
//! 5x8 bitmaps uploaded into the display's CGRAM at boot. The slot number is
//! the character code used to draw the glyph.

/// Glyph slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    /// Menu selection marker
    Select = 0,
    /// Temperature rising
    TrendUp = 1,
    /// Temperature falling
    TrendDown = 2,
    /// More menu items above
    ScrollUp = 3,
    /// More menu items below
    ScrollDown = 4,
}

impl Glyph {
    /// Character code that draws this glyph
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Bitmaps in slot order
pub const GLYPHS: [[u8; 8]; 5] = [
    // Select
    [
        0b00000, 0b00100, 0b00110, 0b11111, 0b00110, 0b00100, 0b00000, 0b00000,
    ],
    // TrendUp
    [
        0b00100, 0b01110, 0b10101, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000,
    ],
    // TrendDown
    [
        0b00100, 0b00100, 0b00100, 0b00100, 0b10101, 0b01110, 0b00100, 0b00000,
    ],
    // ScrollUp
    [
        0b00000, 0b00100, 0b01110, 0b11111, 0b00000, 0b00000, 0b00000, 0b00000,
    ],
    // ScrollDown
    [
        0b00000, 0b00000, 0b00000, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
    ],
];

//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The expander drives the LCD in 4-bit mode:
//!
//! | PCF8574 bit | LCD signal |
//! |-------------|------------|
//! | P0          | RS         |
//! | P1          | RW         |
//! | P2          | EN         |
//! | P3          | Backlight  |
//! | P4-P7       | D4-D7      |
//!
//! Each nibble is clocked with one I2C write carrying the EN-high and
//! EN-low expander states back to back; at 100 kHz the bus time alone
//! exceeds the controller's enable pulse and command execution times.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use fanctl_core::traits::display::GLYPH_SLOTS;
use fanctl_core::traits::{CharDisplay, DisplayError, DISPLAY_COLS, DISPLAY_ROWS};

/// Usual address of PCF8574 backpacks with A0-A2 open
pub const PCF8574_DEFAULT_ADDR: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINES: u8 = 0x08;

/// DDRAM address of the first column of each row on a 20x4 panel
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 on a PCF8574 expander
pub struct Hd44780<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<I: I2c, D: DelayNs> Hd44780<I, D> {
    /// Create a driver; call [`init`](Self::init) before use
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
        }
    }

    /// Run the power-on 4-bit initialisation sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Wait for Vcc to settle
        self.delay.delay_ms(50);
        self.expander(0)?;

        // Three 8-bit function sets, then switch to 4-bit
        self.nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_SET | TWO_LINES)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)
    }

    /// Release the bus and delay
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            BACKLIGHT
        } else {
            0
        }
    }

    fn expander(&mut self, value: u8) -> Result<(), DisplayError> {
        let value = value | self.backlight_bit();
        self.i2c
            .write(self.address, &[value])
            .map_err(|_| DisplayError::Bus)
    }

    /// Clock the high nibble of `bits` with the given control flags
    fn nibble(&mut self, bits: u8, flags: u8) -> Result<(), DisplayError> {
        let value = (bits & 0xF0) | flags | self.backlight_bit();
        self.i2c
            .write(self.address, &[value | EN, value])
            .map_err(|_| DisplayError::Bus)
    }

    fn send(&mut self, byte: u8, flags: u8) -> Result<(), DisplayError> {
        let high = (byte & 0xF0) | flags | self.backlight_bit();
        let low = (byte << 4) | flags | self.backlight_bit();
        self.i2c
            .write(self.address, &[high | EN, high, low | EN, low])
            .map_err(|_| DisplayError::Bus)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.send(cmd, 0)
    }
}

impl<I: I2c, D: DelayNs> CharDisplay for Hd44780<I, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= DISPLAY_COLS || row >= DISPLAY_ROWS {
            return Err(DisplayError::OutOfBounds);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn write_char(&mut self, code: u8) -> Result<(), DisplayError> {
        self.send(code, RS)
    }

    fn create_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), DisplayError> {
        if slot >= GLYPH_SLOTS {
            return Err(DisplayError::InvalidGlyph);
        }
        self.command(CMD_SET_CGRAM | (slot << 3))?;
        for &row in bitmap {
            self.send(row & 0x1F, RS)?;
        }
        // Leave the address counter in DDRAM
        self.command(CMD_SET_DDRAM)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander(0)
    }
}

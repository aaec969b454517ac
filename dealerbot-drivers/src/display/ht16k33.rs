//! HT16K33 4-digit 7-segment backpack (I2C)
//!
//! # Protocol
//!
//! Commands are single bytes written to the device address:
//! - `0x21`: system setup, oscillator on
//! - `0x80 | blink << 1 | on`: display setup
//! - `0xE0 | level`: dimming, 16 levels
//!
//! Display RAM is written as a start address followed by data bytes, two
//! bytes per row. On the 4-digit backpack the digits sit at rows 0, 1, 3
//! and 4; row 2 drives the colon.

use dealerbot_core::traits::{DisplayError, SegmentDisplay, DISPLAY_DIGITS};
use embedded_hal::i2c::I2c;

use super::font::{glyph, DP};

/// Default 7-bit address with all address jumpers open
pub const DEFAULT_ADDRESS: u8 = 0x70;

const CMD_OSCILLATOR_ON: u8 = 0x21;
const CMD_DISPLAY_SETUP: u8 = 0x80;
const DISPLAY_ON: u8 = 0x01;
const CMD_BRIGHTNESS: u8 = 0xE0;
const MAX_BRIGHTNESS: u8 = 15;

/// Display RAM address of each digit
const DIGIT_ADDRESSES: [u8; DISPLAY_DIGITS] = [0x00, 0x02, 0x06, 0x08];

/// Bytes from RAM address 0 through the last digit's high byte
const RAM_SPAN: usize = 10;

/// HT16K33 driver
pub struct Ht16k33<I> {
    i2c: I,
    address: u8,
    /// Segment bits currently shown, one byte per digit
    buffer: [u8; DISPLAY_DIGITS],
}

impl<I: I2c> Ht16k33<I> {
    /// Create a driver, the device is not touched until [`init`](Self::init)
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [0; DISPLAY_DIGITS],
        }
    }

    /// Start the oscillator, switch the display on and set brightness
    pub fn init(&mut self, brightness: u8) -> Result<(), DisplayError> {
        self.command(CMD_OSCILLATOR_ON)?;
        self.command(CMD_DISPLAY_SETUP | DISPLAY_ON)?;
        self.set_brightness(brightness)?;
        self.clear()
    }

    /// Segment bits currently shown
    pub fn segments(&self) -> [u8; DISPLAY_DIGITS] {
        self.buffer
    }

    /// Write raw segment bits for all digits
    pub fn write_segments(&mut self, segments: [u8; DISPLAY_DIGITS]) -> Result<(), DisplayError> {
        let mut frame = [0u8; RAM_SPAN + 1];
        // frame[0] is the RAM start address (0x00)
        for (bits, addr) in segments.iter().zip(DIGIT_ADDRESSES) {
            frame[1 + addr as usize] = *bits;
        }
        self.i2c
            .write(self.address, &frame)
            .map_err(|_| DisplayError::Bus)?;
        self.buffer = segments;
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[cmd])
            .map_err(|_| DisplayError::Bus)
    }
}

/// Encode text into segment bits
///
/// A `.` after a character lights that digit's decimal point instead of
/// taking a digit of its own.
pub fn encode(text: &str) -> Result<[u8; DISPLAY_DIGITS], DisplayError> {
    let mut segments = [0u8; DISPLAY_DIGITS];
    let mut count = 0;

    for c in text.chars() {
        if c == '.' && count > 0 && segments[count - 1] & DP == 0 {
            segments[count - 1] |= DP;
            continue;
        }
        if count == DISPLAY_DIGITS {
            return Err(DisplayError::TextTooLong);
        }
        segments[count] = glyph(c).ok_or(DisplayError::UnsupportedGlyph(c))?;
        count += 1;
    }
    Ok(segments)
}

impl<I: I2c> SegmentDisplay for Ht16k33<I> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.write_segments([0; DISPLAY_DIGITS])
    }

    fn show(&mut self, text: &str) -> Result<(), DisplayError> {
        let segments = encode(text)?;
        self.write_segments(segments)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        if level > MAX_BRIGHTNESS {
            return Err(DisplayError::InvalidBrightness);
        }
        self.command(CMD_BRIGHTNESS | level)
    }
}

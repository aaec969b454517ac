//! Segment display trait for the 4-digit status display

/// Number of characters the display can show
pub const DISPLAY_DIGITS: usize = 4;

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Text longer than the number of digits
    TextTooLong,
    /// Character has no segment pattern
    UnsupportedGlyph(char),
    /// Brightness outside 0-15
    InvalidBrightness,
}

/// Trait for a short text display
///
/// The display acts as a dumb output - the controller decides what text
/// to show for each state.
pub trait SegmentDisplay {
    /// Blank all digits
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Show text left-aligned, blanking unused digits
    fn show(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Set brightness (0-15)
    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError>;
}

/// Helper methods for common display content
pub trait DisplayExt: SegmentDisplay {
    /// Show a number right-aligned, or `----` if it does not fit
    fn show_number(&mut self, value: u16) -> Result<(), DisplayError> {
        let mut buf = [b' '; DISPLAY_DIGITS];

        if value > 9999 {
            buf = [b'-'; DISPLAY_DIGITS];
        } else {
            let mut v = value;
            let mut i = DISPLAY_DIGITS;
            loop {
                i -= 1;
                buf[i] = b'0' + (v % 10) as u8;
                v /= 10;
                if v == 0 || i == 0 {
                    break;
                }
            }
        }

        // Only ASCII digits, spaces and dashes were written
        let text = core::str::from_utf8(&buf).unwrap_or("----");
        self.show(text)
    }
}

// Blanket implementation for all SegmentDisplay types
impl<T: SegmentDisplay> DisplayExt for T {}

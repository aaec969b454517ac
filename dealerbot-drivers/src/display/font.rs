//! 7-segment glyph table
//!
//! Bit layout is the HT16K33 backpack's: bit 0 = segment A (top), then
//! clockwise B..F, bit 6 = G (middle), bit 7 = decimal point.
//!
//! ```text
//!   -A-
//!  F   B
//!   -G-
//!  E   C
//!   -D-  .DP
//! ```

/// Decimal point bit
pub const DP: u8 = 0x80;

const DIGITS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Segment pattern for a character
///
/// Letters without a distinct upper-case shape share the lower-case
/// pattern. Returns `None` for characters seven segments cannot draw
/// (K, M, V, W, X, ...).
pub fn glyph(c: char) -> Option<u8> {
    let bits = match c {
        '0'..='9' => DIGITS[c as usize - '0' as usize],
        ' ' => 0x00,
        '-' => 0x40,
        '_' => 0x08,
        '=' => 0x48,
        'A' | 'a' => 0x77,
        'b' | 'B' => 0x7C,
        'C' => 0x39,
        'c' => 0x58,
        'd' | 'D' => 0x5E,
        'E' | 'e' => 0x79,
        'F' | 'f' => 0x71,
        'G' => 0x3D,
        'g' => 0x6F,
        'H' => 0x76,
        'h' => 0x74,
        'I' => 0x06,
        'i' => 0x04,
        'J' | 'j' => 0x1E,
        'L' | 'l' => 0x38,
        'n' | 'N' => 0x54,
        'O' => 0x3F,
        'o' => 0x5C,
        'P' | 'p' => 0x73,
        'q' | 'Q' => 0x67,
        'r' | 'R' => 0x50,
        'S' | 's' => 0x6D,
        't' | 'T' => 0x78,
        'U' => 0x3E,
        'u' => 0x1C,
        'y' | 'Y' => 0x6E,
        _ => return None,
    };
    Some(bits)
}

//! Wire-level color helpers
//!
//! Palette colors travel as bare 2-character hexadecimal tokens, one token
//! per channel. Parsing is deliberately permissive: the token is consumed as
//! a hex prefix and unparsable input yields 0, matching the numeric
//! semantics of the wire protocol rather than a strict error path.

use libm::roundf;

const fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Parse a 2-character hexadecimal channel token.
///
/// Accumulates leading hex digits and stops at the first non-hex character,
/// so `"4z"` parses to 4 and `"zz"` to 0.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_hex_byte(token: &str) -> u8 {
    let mut value: u32 = 0;
    for byte in token.bytes() {
        let Some(digit) = hex_digit(byte) else {
            break;
        };
        value = value * 16 + u32::from(digit);
    }
    (value & 0xFF) as u8
}

/// Linear interpolation between two channel values.
///
/// `ratio` is the amount of `value1`: 1.0 yields `value1`, 0.0 yields
/// `value2`. Used for cross-fading between adjacent palette colors near a
/// segment boundary.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn mix(value1: u8, value2: u8, ratio: f32) -> u8 {
    let mixed = ratio * f32::from(value1) + (1.0 - ratio) * f32::from(value2);
    roundf(mixed).clamp(0.0, 255.0) as u8
}

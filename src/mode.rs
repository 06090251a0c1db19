//! Mode string decoding
//!
//! The animation configuration arrives as a compact textual mode string,
//! fetched periodically from a server by an external poll loop:
//!
//! ```text
//! [0]      mode id        1 digit
//! [1-2]    speed divisor  2 digits
//! [3-4]    segment size   2 digits, "00" selects the full strip
//! [5]      gradient flag  '1' enables gradient stepping
//! [6]      sentinel       '-' selects rainbow mode, rest is ignored
//! [6..]    palette        2-hex-char tokens, round-robin R,G,B
//! ```

use crate::color::{Rgb, parse_hex_byte};

/// Number of palette slots in a configuration.
pub const PALETTE_SIZE: usize = 24;

/// Hue positions in the rainbow color space.
pub const RAINBOW_SPACE: u32 = 360;

/// Length of the fixed header fields.
const HEADER_LEN: usize = 6;

/// Sentinel character selecting rainbow mode.
const RAINBOW_SENTINEL: u8 = b'-';

/// Rainbow mode compresses the segment size by this factor.
const RAINBOW_SEGMENT_DIVISOR: u16 = 8;

/// Error returned when a mode string cannot be decoded.
///
/// A rejected string never replaces the current configuration; the caller
/// keeps animating the last valid mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeError {
    /// The string is shorter than the fixed header fields.
    TooShort { len: usize },
    /// A numeric header field contains a non-digit character.
    InvalidNumber { field: &'static str },
}

/// One decoded animation configuration.
///
/// Immutable once decoded; a new mode string produces a whole new value that
/// replaces the previous one atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeConfig {
    /// Rendering selector; ids 0-9 animate, anything else is the caller's
    /// solid-white fallback.
    pub mode_id: u8,
    /// Render ticks consumed per animation step, at least 1.
    pub speed_divisor: u8,
    /// Pixel positions per palette color band, at least 1.
    pub segment_size: u16,
    /// Advance by whole segments and blend softly instead of snapping.
    pub gradient: bool,
    /// Cycle hues instead of the palette.
    pub rainbow: bool,
    /// Color bands, meaningful only when `rainbow` is false. Slots without
    /// decoded tokens stay black.
    pub palette: [Rgb; PALETTE_SIZE],
}

impl ModeConfig {
    /// Decode a mode string.
    ///
    /// Returns `Ok(None)` when the string carries the same mode id as
    /// `previous_mode_id`, without parsing the rest. `strip_len` substitutes
    /// for a segment size of zero.
    pub fn decode(
        raw: &str,
        previous_mode_id: Option<u8>,
        strip_len: u16,
    ) -> Result<Option<Self>, ModeError> {
        let bytes = raw.as_bytes();
        if bytes.len() < HEADER_LEN {
            return Err(ModeError::TooShort { len: bytes.len() });
        }

        let mode_id = parse_decimal(&bytes[0..1], "mode")?;
        if previous_mode_id == Some(mode_id) {
            return Ok(None);
        }

        let speed_divisor = parse_decimal(&bytes[1..3], "speed")?.max(1);
        let mut segment_size = u16::from(parse_decimal(&bytes[3..5], "segment")?);
        if segment_size == 0 {
            segment_size = strip_len.max(1);
        }
        let gradient = bytes[5] == b'1';

        if bytes.get(HEADER_LEN) == Some(&RAINBOW_SENTINEL) {
            return Ok(Some(Self {
                mode_id,
                speed_divisor,
                segment_size: (segment_size / RAINBOW_SEGMENT_DIVISOR).max(1),
                gradient,
                rainbow: true,
                palette: [Rgb::default(); PALETTE_SIZE],
            }));
        }

        Ok(Some(Self {
            mode_id,
            speed_divisor,
            segment_size,
            gradient,
            rainbow: false,
            palette: decode_palette(&bytes[HEADER_LEN..]),
        }))
    }

    /// Extent of the color space the animation walks through.
    pub const fn color_space(&self) -> u32 {
        if self.rainbow {
            RAINBOW_SPACE
        } else {
            PALETTE_SIZE as u32
        }
    }

    /// Length of one full animation cycle in steps.
    pub const fn cycle_len(&self) -> u32 {
        self.color_space() * self.segment_size as u32
    }
}

/// Parse a fixed-width decimal header field.
///
/// Unlike palette tokens, header fields are strict: any non-digit character
/// rejects the whole string instead of silently decoding as zero.
fn parse_decimal(bytes: &[u8], field: &'static str) -> Result<u8, ModeError> {
    let mut value: u8 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(ModeError::InvalidNumber { field });
        }
        value = value.wrapping_mul(10).wrapping_add(byte - b'0');
    }
    Ok(value)
}

/// Fill palette slots from 2-hex-char tokens in round-robin channel order.
///
/// Token 0 is slot 0's red channel, token 1 its green, token 2 its blue,
/// token 3 slot 1's red, and so on. Decoding stops once all slots are full.
/// A trailing partial token and an incomplete final triple are discarded, so
/// only fully specified slots deviate from black.
fn decode_palette(bytes: &[u8]) -> [Rgb; PALETTE_SIZE] {
    let mut palette = [Rgb::default(); PALETTE_SIZE];

    let tokens = bytes.chunks_exact(2);
    let complete_slots = (tokens.len() / 3).min(PALETTE_SIZE);
    for (index, token) in tokens.enumerate().take(complete_slots * 3) {
        let slot = index / 3;
        let value = core::str::from_utf8(token).map_or(0, parse_hex_byte);
        match index % 3 {
            0 => palette[slot].r = value,
            1 => palette[slot].g = value,
            _ => palette[slot].b = value,
        }
    }

    palette
}

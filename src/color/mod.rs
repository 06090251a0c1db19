mod codec;

pub use codec::{mix, parse_hex_byte};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Convert a hue in degrees (0-359) to a fully saturated RGB color.
///
/// Maps the 360-degree hue circle onto the 0-255 circle used by
/// `smart_leds::hsv::Hsv`.
#[allow(clippy::cast_possible_truncation)]
pub fn hue_to_rgb(degrees: u16) -> Rgb {
    let degrees = u32::from(degrees % 360);
    let hue = ((degrees * 255 + 180) / 360) as u8;
    hsv2rgb(Hsv {
        hue,
        sat: 255,
        val: 255,
    })
}

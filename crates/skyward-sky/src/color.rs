//! Linear RGB color with the 0–255 and hex conversions the host API speaks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// RGB color with channels nominally in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 0–255 channel values, as given in startup components.
    ///
    /// Values are scaled by `1/255` without clamping; clamping happens on
    /// conversion back to hex.
    pub fn from_channels(channels: [f32; 3]) -> Self {
        let scale = 1.0 / 255.0;
        Self::new(
            channels[0] * scale,
            channels[1] * scale,
            channels[2] * scale,
        )
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::from_channels([
            ((hex >> 16) & 0xff) as f32,
            ((hex >> 8) & 0xff) as f32,
            (hex & 0xff) as f32,
        ])
    }

    /// Pack into `0xRRGGBB`, clamping each channel and rounding to the nearest step.
    pub fn to_hex(self) -> u32 {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (quantize(self.r) << 16) | (quantize(self.g) << 8) | quantize(self.b)
    }

    /// CSS-style `#rrggbb` string.
    pub fn hex_string(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_is_exact_for_byte_colors() {
        for hex in [0xffffff, 0x98caf5, 0x000000, 0x123456] {
            assert_eq!(Rgb::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_channels_normalize_to_unit_range() {
        let c = Rgb::from_channels([255.0, 0.0, 51.0]);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_channels_clamp_on_export() {
        let c = Rgb::from_channels([510.0, -20.0, 128.0]);
        assert_eq!(c.to_hex(), 0xff0080);
    }

    #[test]
    fn test_hex_string_is_lowercase_and_padded() {
        assert_eq!(Rgb::from_hex(0x98caf5).hex_string(), "#98caf5");
        assert_eq!(Rgb::from_hex(0x0000ff).hex_string(), "#0000ff");
    }
}

//! Linear RGB colour used by lights, materials and helpers.
//!
//! Colours are stored in linear space because that is what the shaders light
//! with. The parameter panel edits colours in sRGB, so conversions live here.

/// Linear-space RGB colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a `0xRRGGBB` sRGB hex value.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self::from_srgb([r, g, b])
    }

    /// Returns the `0xRRGGBB` sRGB hex value, rounded per channel.
    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.to_srgb();
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(r) << 16) | (channel(g) << 8) | channel(b)
    }

    /// Converts from gamma-encoded sRGB components in `[0, 1]`.
    pub fn from_srgb(srgb: [f32; 3]) -> Self {
        Self::new(
            srgb_to_linear(srgb[0]),
            srgb_to_linear(srgb[1]),
            srgb_to_linear(srgb[2]),
        )
    }

    /// Converts to gamma-encoded sRGB components in `[0, 1]`.
    pub fn to_srgb(self) -> [f32; 3] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        ]
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_keeps_channels() {
        for hex in [0xffffff, 0x888888, 0x123456, 0x000000, 0xff0080] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_mid_gray_is_darker_in_linear_space() {
        let gray = Color::from_hex(0x888888);
        assert!(gray.r < 0.5);
        assert!((gray.r - 0.246).abs() < 1e-3);
    }

    #[test]
    fn test_scaled() {
        let c = Color::WHITE.scaled(0.3);
        assert_eq!(c.to_array(), [0.3, 0.3, 0.3]);
    }
}

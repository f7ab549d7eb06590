//! RGB color

use std::ops::{Add, AddAssign, Mul};

/// RGB color, nominally in [0, 1] per channel
///
/// Lighting accumulates into colors with `+` and modulates them with `*`;
/// sums may leave the unit range until [`Color::saturate`] is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Gray with all channels set to `v`
    pub const fn gray(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub const fn from_array(c: [f32; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Clamp every channel to at most 1.0
    ///
    /// Channels are never clamped from below: lighting only ever adds
    /// non-negative terms.
    pub fn saturate(self) -> Self {
        Self::rgb(self.r.min(1.0), self.g.min(1.0), self.b.min(1.0))
    }

    /// 8-bit channels, clamped to [0, 1] first
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (255.999 * self.r.clamp(0.0, 1.0)) as u8,
            (255.999 * self.g.clamp(0.0, 1.0)) as u8,
            (255.999 * self.b.clamp(0.0, 1.0)) as u8,
        ]
    }

    /// `#rrggbb` form
    pub fn to_hex_string(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::rgb(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

/// Per-channel modulation
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::rgb(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::rgb(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulate_and_scale() {
        let c = Color::rgb(1.0, 0.5, 0.0) * Color::gray(0.5);
        assert_eq!(c, Color::rgb(0.5, 0.25, 0.0));
        assert_eq!(Color::WHITE * 0.25, Color::gray(0.25));
    }

    #[test]
    fn test_saturate_only_clamps_above() {
        let c = Color::rgb(1.5, 0.3, -0.2).saturate();
        assert_eq!(c, Color::rgb(1.0, 0.3, -0.2));
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex(0xFF8000);
        assert_eq!(c.to_hex_string(), "#ff8000");
        assert_eq!(Color::RED.to_rgb8(), [255, 0, 0]);
    }
}

use palette::{FromColor, LinSrgba, Srgba};

use crate::scene::ColorLinPremul;

// sRGB <-> linear premultiplied conversions.
impl ColorLinPremul {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        let s = Srgba::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Fade by an opacity factor. All channels scale so the color stays premultiplied;
    /// the resulting alpha is `a * opacity`.
    #[inline]
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            r: self.r * o,
            g: self.g * o,
            b: self.b * o,
            a: self.a * o,
        }
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        // Unpremultiply
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        // Convert linear to sRGB
        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self::rgba(
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
                255,
            )),
            6 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_round_trip_opaque() {
        let c = ColorLinPremul::rgba(63, 130, 246, 255);
        assert_eq!(c.to_srgba_u8(), [63, 130, 246, 255]);
    }

    #[test]
    fn test_with_opacity_scales_alpha() {
        let c = ColorLinPremul::rgba(255, 255, 255, 255).with_opacity(0.5);
        assert!((c.a - 0.5).abs() < 1e-6);
        assert!((c.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(
            ColorLinPremul::from_hex("#ff0000"),
            Some(ColorLinPremul::rgba(255, 0, 0, 255))
        );
        assert_eq!(
            ColorLinPremul::from_hex("#fff"),
            Some(ColorLinPremul::rgba(255, 255, 255, 255))
        );
        assert_eq!(ColorLinPremul::from_hex("#0000ff80").map(|c| c.to_srgba_u8()[3]), Some(128));
        assert_eq!(ColorLinPremul::from_hex("nope"), None);
        assert_eq!(ColorLinPremul::from_hex("#gggggg"), None);
    }
}

/// Linear straight-alpha RGBA color.
///
/// Constructors taking sRGB input (hex literals, HSL) decode to linear light so
/// that blending on an sRGB surface matches what the author picked.
/// Premultiplication happens at upload time via [`Color::premultiplied`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a color from linear components.
    #[inline]
    pub const fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from a `0xRRGGBB` sRGB literal.
    pub fn from_hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Self::from_srgb(r, g, b, 1.0)
    }

    /// Creates a color from straight sRGB components in `[0, 1]`.
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates an opaque color from sRGB-space HSL, every component in `[0, 1]`.
    ///
    /// Hue wraps; saturation and lightness are clamped.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::from_srgb(l, l, l, 1.0);
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::from_srgb(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            1.0,
        )
    }

    #[inline]
    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns `[r*a, g*a, b*a, a]`.
    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        ((c * 0.9478672986 + 0.0521327014).powf(2.4)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn hex_white_and_black() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::from_linear(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn hex_mid_grey_decodes_to_linear() {
        // sRGB 0x80 ≈ 0.2158 linear.
        let c = Color::from_hex(0x808080);
        assert!(close(c.r, 0.2158));
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));

        let green = Color::from_hsl(1.0 / 3.0, 1.0, 0.5);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));
    }

    #[test]
    fn hsl_zero_saturation_is_grey() {
        let c = Color::from_hsl(0.7, 0.0, 0.5);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn hsl_channels_stay_in_unit_range() {
        for step in 0..50 {
            let t = step as f32 / 50.0;
            let c = Color::from_hsl(0.6 + t * 0.2, 0.5 + t * 0.5, 0.5 + t * 0.49);
            for v in c.rgb() {
                assert!((0.0..=1.0).contains(&v), "channel {v} out of range");
            }
        }
    }

    #[test]
    fn premultiplied_scales_rgb() {
        let c = Color::from_linear(1.0, 0.5, 0.25, 0.5);
        assert_eq!(c.premultiplied(), [0.5, 0.25, 0.125, 0.5]);
    }
}

use congra_parser::ColorValue;

/// Premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a`.
///
/// Gradient interpolation happens in this space, so a transparent stop does
/// not drag its neighbour's hue towards black.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation. For `a == 0`, RGB is 0.
    #[inline]
    pub fn to_straight(self) -> [f32; 4] {
        if self.a <= 0.0 {
            [0.0; 4]
        } else {
            let inv = 1.0 / self.a;
            [self.r * inv, self.g * inv, self.b * inv, self.a]
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Linear blend, `t = 0` is `self` and `t = 1` is `other`.
    #[inline]
    pub fn mix(self, other: Color, t: f32) -> Color {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Color {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }

    /// Straight-alpha sRGB bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_straight().map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl From<ColorValue> for Color {
    fn from(c: ColorValue) -> Self {
        Color::from_straight(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_roundtrip_through_premul() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c.to_array(), [0.5, 0.25, 0.0, 0.5]);
        assert_eq!(c.to_straight(), [1.0, 0.5, 0.0, 0.5]);
    }

    #[test]
    fn fully_transparent_has_no_color() {
        assert_eq!(Color::from_straight(1.0, 1.0, 1.0, 0.0).to_straight(), [0.0; 4]);
    }

    #[test]
    fn mix_endpoints_and_middle() {
        let red = Color::from_straight(1.0, 0.0, 0.0, 1.0);
        let blue = Color::from_straight(0.0, 0.0, 1.0, 1.0);
        assert_eq!(red.mix(blue, 0.0), red);
        assert_eq!(red.mix(blue, 1.0), blue);
        assert_eq!(red.mix(blue, 0.5).to_array(), [0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn rgba8_rounds() {
        assert_eq!(Color::from_straight(1.0, 0.5, 0.0, 1.0).to_rgba8(), [255, 128, 0, 255]);
    }

    #[test]
    fn from_parser_color() {
        let c: Color = congra_parser::parse_color("rgba(255, 0, 0, 0.5)").unwrap().into();
        assert_eq!(c.to_array(), [0.5, 0.0, 0.0, 0.5]);
    }
}

use core::ops::Sub;

use congra_parser::Center;

/// 2D vector, either in pixels or as a fraction of a target size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise product; turns a fractional position into pixels.
    #[inline]
    pub fn scale(self, size: Vec2) -> Vec2 {
        Vec2::new(self.x * size.x, self.y * size.y)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<Center> for Vec2 {
    fn from(c: Center) -> Self {
        Vec2::new(c.x as f32, c.y as f32)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_maps_fraction_to_pixels() {
        assert_eq!(Vec2::new(0.25, 0.5).scale(Vec2::new(200.0, 100.0)), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn from_center() {
        assert_eq!(Vec2::from(Center::default()), Vec2::splat(0.5));
    }

    #[test]
    fn sub_is_componentwise() {
        assert_eq!(Vec2::new(3.0, 1.0) - Vec2::new(1.0, 2.0), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn finite_check() {
        assert!(Vec2::new(1.0, -2.0).is_finite());
        assert!(!Vec2::new(f32::NAN, 0.0).is_finite());
    }
}

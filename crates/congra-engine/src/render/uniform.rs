//! Fixed-capacity uniform block for a conic gradient fragment shader.

use anyhow::ensure;
use bytemuck::{Pod, Zeroable};

use crate::paint::ConicGradient;

/// Stop slots in [`ConicUniform`].
pub const MAX_STOPS: usize = 16;

/// Uniform block layout (std140-compatible: every array element is a vec4).
///
/// - `colors[i]`: premultiplied RGBA of stop `i`
/// - `offsets[i].x`: stop offset in turns
/// - `hints[i].xy`: hint pair for the segment ending at stop `i + 1`
///
/// Slots past `stop_count` repeat the last color, offset and hint, so a
/// shader loop over all slots never reads garbage.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ConicUniform {
    pub colors: [[f32; 4]; MAX_STOPS],
    pub offsets: [[f32; 4]; MAX_STOPS],
    pub hints: [[f32; 4]; MAX_STOPS],
    pub center: [f32; 2],
    pub start_angle: f32,
    pub last_offset: f32,
    pub stop_count: u32,
    pub repeating: u32,
    pub _pad: [u32; 2], // 16-byte alignment
}

impl ConicUniform {
    /// Packs `gradient`. Fails instead of truncating when it has more stops
    /// than [`MAX_STOPS`], and rejects definitions that are not valid.
    pub fn pack(gradient: &ConicGradient) -> anyhow::Result<Self> {
        let n = gradient.stops.len();
        ensure!(n <= MAX_STOPS, "gradient has {} stops, uniform holds {}", n, MAX_STOPS);
        ensure!(gradient.is_valid(), "gradient definition is not valid");

        let mut u = Self::zeroed();
        for i in 0..MAX_STOPS {
            let stop = gradient.stops[i.min(n - 1)];
            u.colors[i] = stop.color.to_array();
            u.offsets[i] = [stop.t, 0.0, 0.0, 0.0];
        }
        for i in 0..MAX_STOPS {
            let hint = gradient.hints[i.min(gradient.hints.len() - 1)];
            u.hints[i] = [hint.midpoint, hint.end, 0.0, 0.0];
        }

        u.center = gradient.center.to_array();
        u.start_angle = gradient.start_angle;
        u.last_offset = gradient.last_offset();
        u.stop_count = n as u32;
        u.repeating = u32::from(gradient.spread == crate::paint::SpreadMode::Repeat);

        log::debug!("packed conic uniform: {} stops, {} bytes", n, std::mem::size_of::<Self>());
        Ok(u)
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, ColorStop, SpreadMode};

    fn gradient(n: usize) -> ConicGradient {
        let stops = (0..n)
            .map(|i| ColorStop::new(i as f32 / (n - 1) as f32, Color::from_straight(1.0, i as f32 / n as f32, 0.0, 1.0)))
            .collect();
        ConicGradient::new(Vec2::new(0.25, 0.75), 0.125, stops, SpreadMode::Repeat)
    }

    #[test]
    fn size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<ConicUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ConicUniform>(), 3 * 16 * MAX_STOPS + 32);
    }

    #[test]
    fn packs_header_fields() {
        let u = ConicUniform::pack(&gradient(3)).unwrap();
        assert_eq!(u.center, [0.25, 0.75]);
        assert_eq!(u.start_angle, 0.125);
        assert_eq!(u.last_offset, 1.0);
        assert_eq!(u.stop_count, 3);
        assert_eq!(u.repeating, 1);
        assert_eq!(u.as_bytes().len(), std::mem::size_of::<ConicUniform>());
    }

    #[test]
    fn unused_slots_repeat_the_last_stop_and_hint() {
        let g = gradient(3);
        let u = ConicUniform::pack(&g).unwrap();
        for i in 3..MAX_STOPS {
            assert_eq!(u.colors[i], g.stops[2].color.to_array());
            assert_eq!(u.offsets[i][0], 1.0);
        }
        for i in 2..MAX_STOPS {
            assert_eq!(u.hints[i], u.hints[1]);
        }
        assert_eq!(u.hints[1][..2], [0.75, 1.0]);
    }

    #[test]
    fn full_capacity_packs() {
        let u = ConicUniform::pack(&gradient(MAX_STOPS)).unwrap();
        assert_eq!(u.stop_count as usize, MAX_STOPS);
    }

    #[test]
    fn overflow_is_an_error() {
        let err = ConicUniform::pack(&gradient(MAX_STOPS + 1)).unwrap_err();
        assert!(err.to_string().contains("17 stops"));
    }

    #[test]
    fn invalid_gradient_is_an_error() {
        let mut g = gradient(2);
        g.hints.clear();
        assert!(ConicUniform::pack(&g).is_err());
    }
}

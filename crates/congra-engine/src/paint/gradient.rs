use congra_parser::{GradientDescriptor, HintPair};

use crate::coords::Vec2;

use super::Color;

/// How angles past the last stop are treated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to the edge stops.
    Pad,
    /// Repeat the stop pattern with a period of the last offset.
    Repeat,
}

/// A single gradient stop. `t` is in turns.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Interpolation hint for the segment ending at a stop: the colors blend
/// 50/50 at `midpoint` and the transition finishes at `end`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hint {
    pub midpoint: f32,
    pub end: f32,
}

impl Hint {
    #[inline]
    pub const fn new(midpoint: f32, end: f32) -> Self {
        Self { midpoint, end }
    }
}

impl From<HintPair> for Hint {
    fn from(h: HintPair) -> Self {
        Hint::new(h.midpoint as f32, h.end as f32)
    }
}

/// Conic gradient definition.
///
/// Semantics:
/// - `center` is a fraction of the target size, `(0, 0)` top-left.
/// - `start_angle` is in turns, clockwise from the top.
/// - `hints[i]` shapes the segment between `stops[i]` and `stops[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGradient {
    pub center: Vec2,
    pub start_angle: f32,
    pub stops: Vec<ColorStop>,
    pub hints: Vec<Hint>,
    pub spread: SpreadMode,
}

impl ConicGradient {
    /// Builds a gradient with plain linear segments between `stops`.
    pub fn new(center: Vec2, start_angle: f32, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        let hints = stops
            .windows(2)
            .map(|w| Hint::new((w[1].t - w[0].t) / 2.0 + w[0].t, w[1].t))
            .collect();
        Self { center, start_angle, stops, hints, spread }
    }

    /// Offset of the final stop, the period of a repeating gradient.
    pub fn last_offset(&self) -> f32 {
        self.stops.last().map(|s| s.t).unwrap_or(1.0)
    }

    /// Returns true when the definition can be sampled: finite values, at
    /// least two stops in non-decreasing order, one hint per segment, and a
    /// positive period when repeating.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.start_angle.is_finite()
            && self.stops.len() >= 2
            && self.hints.len() + 1 == self.stops.len()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.windows(2).all(|w| w[0].t <= w[1].t)
            && self.hints.iter().all(|h| h.midpoint.is_finite() && h.end.is_finite())
            && (self.spread == SpreadMode::Pad || self.last_offset() > 0.0)
    }
}

impl From<&GradientDescriptor> for ConicGradient {
    fn from(d: &GradientDescriptor) -> Self {
        Self {
            center: d.center.into(),
            start_angle: d.angle as f32,
            stops: d.stops().map(|s| ColorStop::new(s.offset as f32, s.color.into())).collect(),
            hints: d.hints.iter().copied().map(Hint::from).collect(),
            spread: if d.repeating { SpreadMode::Repeat } else { SpreadMode::Pad },
        }
    }
}

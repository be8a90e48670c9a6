use crate::color::ColorValue;

// ── Center ────────────────────────────────────────────────────────────────

/// Gradient center as fractions of the box: `(0, 0)` is top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Center {
    pub x: f64,
    pub y: f64,
}

impl Center {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Center {
    /// The middle of the box, used when there is no `at` clause.
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

// ── HintPair ──────────────────────────────────────────────────────────────

/// Interpolation boundary for the segment ending at a stop.
///
/// `midpoint` is where the two colors blend 50/50; `end` is where the
/// transition finishes. `midpoint <= end`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HintPair {
    pub midpoint: f64,
    pub end: f64,
}

impl HintPair {
    #[inline]
    pub const fn new(midpoint: f64, end: f64) -> Self {
        Self { midpoint, end }
    }

    /// Plain linear blend between two offsets: midpoint halfway.
    #[inline]
    pub fn linear(from: f64, to: f64) -> Self {
        Self::new((to - from) / 2.0 + from, to)
    }
}

// ── ResolvedStop ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedStop {
    pub color: ColorValue,
    /// Position in turns. Not folded into `[0, 1)`.
    pub offset: f64,
}

// ── GradientDescriptor ────────────────────────────────────────────────────

/// A fully resolved conic gradient, ready for a renderer.
///
/// Invariants:
/// - `colors.len() == offsets.len() == hints.len() + 1`
/// - `offsets` is non-decreasing
///
/// A descriptor is built fresh by every parse call. Do not cache descriptors
/// keyed by their source text: callers may mutate the arrays between renders,
/// and a text-keyed cache would hand back the mutated copy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GradientDescriptor {
    pub repeating: bool,
    /// Start angle in turns, clockwise from the top. Not folded.
    pub angle: f64,
    pub center: Center,
    pub colors: Vec<ColorValue>,
    pub offsets: Vec<f64>,
    pub hints: Vec<HintPair>,
}

impl GradientDescriptor {
    pub fn stop_count(&self) -> usize {
        self.colors.len()
    }

    pub fn stops(&self) -> impl Iterator<Item = ResolvedStop> + '_ {
        self.colors
            .iter()
            .zip(&self.offsets)
            .map(|(&color, &offset)| ResolvedStop { color, offset })
    }

    /// Offset of the final stop; the wrap period of a repeating gradient.
    pub fn last_offset(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(1.0)
    }

    /// Colors as the flat `4 × N` array a shader uniform expects.
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Offsets as a flat `N` array.
    pub fn flat_offsets(&self) -> Vec<f32> {
        self.offsets.iter().map(|&o| o as f32).collect()
    }

    /// Hint pairs as a flat `2 × (N - 1)` array.
    pub fn flat_hints(&self) -> Vec<f32> {
        self.hints
            .iter()
            .flat_map(|h| [h.midpoint as f32, h.end as f32])
            .collect()
    }
}

//! CPU reference sampler with the same math a conic gradient fragment shader
//! runs. Useful for previews, tests, and software targets.

use std::f32::consts::TAU;

use crate::coords::Vec2;
use crate::paint::{Color, ConicGradient, SpreadMode};

/// Angle of `frag` around `center`, in turns clockwise from the top, folded
/// into `[0, 1)`. `frag` and `resolution` are in pixels (top-left origin),
/// `center` is a fraction of `resolution`.
pub fn angle_at(frag: Vec2, resolution: Vec2, center: Vec2) -> f32 {
    let d = frag - center.scale(resolution);
    (d.x.atan2(-d.y) / TAU).rem_euclid(1.0)
}

/// Color of `gradient` at `turns` (an [`angle_at`] value).
pub fn sample(gradient: &ConicGradient, turns: f32) -> Color {
    let Some(last) = gradient.stops.last() else {
        return Color::transparent();
    };

    let mut angle = (turns - gradient.start_angle).rem_euclid(1.0);
    if gradient.spread == SpreadMode::Repeat && last.t > 0.0 {
        angle = angle.rem_euclid(last.t);
    }

    let Some(i) = gradient.stops.iter().position(|s| s.t >= angle) else {
        return last.color;
    };
    if i == 0 {
        return gradient.stops[0].color;
    }

    let (a, b) = (gradient.stops[i - 1], gradient.stops[i]);
    let Some(hint) = gradient.hints.get(i - 1) else {
        return b.color;
    };

    if hint.midpoint == hint.end {
        return if angle > hint.end { b.color } else { a.color };
    }

    let span = hint.end - a.t;
    let h = (hint.midpoint - a.t) / span;
    let p = (angle - a.t) / span;
    if p >= 1.0 {
        return b.color;
    }
    if p <= 0.0 {
        return a.color;
    }
    a.color.mix(b.color, p.powf(0.5f32.ln() / h.ln()))
}

/// Renders `gradient` into a `width × height` straight-alpha RGBA8 buffer,
/// row-major, sampling pixel centers.
pub fn rasterize(gradient: &ConicGradient, width: u32, height: u32) -> Vec<u8> {
    let resolution = Vec2::new(width as f32, height as f32);
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let frag = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let color = sample(gradient, angle_at(frag, resolution, gradient.center));
            out.extend_from_slice(&color.to_rgba8());
        }
    }
    log::trace!("rasterized {}x{} conic gradient", width, height);
    out
}

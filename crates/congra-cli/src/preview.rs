//! 24-bit ANSI terminal preview.
//!
//! Each character cell is an upper half block: foreground is the top pixel,
//! background the bottom one, so `height` pixels take `height / 2` rows.

use std::fmt::Write;

use congra_engine::paint::ConicGradient;
use congra_engine::render::rasterize;

const RESET: &str = "\x1b[0m";

/// Renders `gradient` at `width × height` pixels. Odd heights round up.
pub fn render(gradient: &ConicGradient, width: u32, height: u32) -> String {
    let height = height + height % 2;
    let px = rasterize(gradient, width, height);
    let at = |x: u32, y: u32| {
        let i = pixel_index(width, x, y);
        [px[i], px[i + 1], px[i + 2]]
    };

    let mut out = String::new();
    for row in (0..height).step_by(2) {
        for x in 0..width {
            let [tr, tg, tb] = at(x, row);
            let [br, bg, bb] = at(x, row + 1);
            // Writing to a String cannot fail.
            let _ = write!(out, "\x1b[38;2;{tr};{tg};{tb}m\x1b[48;2;{br};{bg};{bb}m\u{2580}");
        }
        out.push_str(RESET);
        out.push('\n');
    }
    out
}

/// Byte index of pixel `(x, y)` in a row-major RGBA8 buffer.
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * 4
}

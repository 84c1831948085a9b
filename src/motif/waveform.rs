use rand::Rng;
use rand::rngs::StdRng;
use std::f32::consts::TAU;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

/// Superimposed sine curves in a horizontal band, stroked in several passes
/// of decreasing width and increasing alpha to fake a glow.
pub(super) fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    let wave_count = rng.gen_range(2..=3);
    for wave in 0..wave_count {
        let base_y = height * (0.35 + wave as f32 * 0.12) + rng.gen_range(-12.0..12.0);
        let amplitude = 30.0 + wave as f32 * 10.0 + rng.gen_range(0.0..10.0);
        let frequency = 0.02 - wave as f32 * 0.002 + rng.gen_range(-0.002..0.002);
        let phase = rng.gen_range(0.0..TAU);

        let mut points = Vec::with_capacity((width / 2.0) as usize + 1);
        let mut x = 0.0;
        while x <= width {
            let y = base_y + (x * frequency + phase).sin() * amplitude;
            points.push((x, y));
            x += 2.0;
        }

        let Some(path) = draw::polyline(&points) else {
            continue;
        };
        for pass in (1..=3u8).rev() {
            let alpha = 50 + (4 - pass) * 30;
            let stroke_width = pass as f32 * 2.0;
            draw::stroke(
                pixmap,
                &path,
                color::rgba(&theme.primary, alpha),
                stroke_width,
            );
        }
    }
}

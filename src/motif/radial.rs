use rand::Rng;
use rand::rngs::StdRng;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

const RING_COUNT: u32 = 10;

/// Concentric rings of growing radius and fading alpha, with radial spokes
/// on every other ring.
pub(super) fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let cx = pixmap.width() as f32 / 2.0;
    let cy = pixmap.height() as f32 / 2.0;
    let spoke_phase = rng.gen_range(0.0..30.0_f32);

    for ring in 0..RING_COUNT {
        let radius = 50.0 + ring as f32 * 30.0 + rng.gen_range(-4.0..4.0);
        let alpha = (150 - ring * 10) as u8;
        draw::stroke_circle(
            pixmap,
            cx,
            cy,
            radius,
            color::rgba(&theme.primary, alpha),
            2.0,
        );

        if ring % 2 != 0 {
            continue;
        }
        let mut angle = spoke_phase;
        while angle < spoke_phase + 360.0 {
            let rad = angle.to_radians();
            let (sin, cos) = rad.sin_cos();
            draw::line(
                pixmap,
                cx + radius * cos,
                cy + radius * sin,
                cx + (radius + 20.0) * cos,
                cy + (radius + 20.0) * sin,
                color::rgba(&theme.accent, alpha),
                2.0,
            );
            angle += 30.0;
        }
    }
}

use rand::Rng;
use rand::rngs::StdRng;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

/// Versus-style split: two translucent color fields meeting at an off-center
/// diagonal, with a glowing seam stroked down the boundary.
pub(super) fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let cx = width / 2.0 + rng.gen_range(-60.0..60.0);

    let left = [
        (0.0, 0.0),
        (cx - 50.0, 0.0),
        (cx + 50.0, height),
        (0.0, height),
    ];
    if let Some(path) = draw::polygon(&left) {
        draw::fill(pixmap, &path, color::rgba(&theme.primary, 50));
    }

    let right = [
        (cx - 50.0, 0.0),
        (width, 0.0),
        (width, height),
        (cx + 50.0, height),
    ];
    if let Some(path) = draw::polygon(&right) {
        draw::fill(pixmap, &path, color::rgba(&theme.secondary, 50));
    }

    // Seam, stroked a few times with a sideways offset to read as a glow.
    for offset in -2i32..=2 {
        let shift = offset as f32 * 2.0;
        let alpha = (200 - offset.unsigned_abs() * 40) as u8;
        draw::line(
            pixmap,
            cx - 50.0 + shift,
            0.0,
            cx + 50.0 + shift,
            height,
            color::rgba(&theme.glow, alpha),
            3.0,
        );
    }
}

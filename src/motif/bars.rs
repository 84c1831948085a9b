use rand::Rng;
use rand::rngs::StdRng;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

const BAR_COUNT: u32 = 60;

/// Audio-visualizer style frequency bars, symmetric about the vertical
/// midline, color-interpolated from primary to secondary across the row.
pub(super) fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let bar_width = width / BAR_COUNT as f32;
    let mid_y = height / 2.0;

    for bar in 0..BAR_COUNT {
        let bar_height = rng.gen_range(50.0..300.0_f32).min(height);
        let t = bar as f32 / BAR_COUNT as f32;
        let mut fill = color::lerp(&theme.primary, &theme.secondary, t);
        fill.set_alpha(180.0 / 255.0);
        draw::fill_rect(
            pixmap,
            bar as f32 * bar_width,
            mid_y - bar_height / 2.0,
            (bar_width - 2.0).max(1.0),
            bar_height,
            fill,
        );
    }
}

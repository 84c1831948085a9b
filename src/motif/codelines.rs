use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

const LINE_HEIGHT: f32 = 30.0;
const INDENTS: [f32; 4] = [0.0, 20.0, 40.0, 60.0];

/// Mock source-code listing: indented line blocks with occasional
/// syntax-highlight spans.
pub(super) fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let height = pixmap.height() as f32;
    let rows = (height / LINE_HEIGHT) as u32;

    for row in 0..rows {
        let y = row as f32 * LINE_HEIGHT + 20.0;
        let indent = *INDENTS.choose(rng).unwrap_or(&0.0);
        let line_length = rng.gen_range(100.0..400.0_f32);
        let x = 50.0 + indent;
        draw::fill_rect(
            pixmap,
            x,
            y,
            line_length,
            15.0,
            color::rgba(&theme.primary, 100),
        );

        if rng.gen_bool(0.3) {
            let highlight_x = x + rng.gen_range(0.0..line_length / 2.0);
            let highlight_length = rng.gen_range(30.0..100.0_f32);
            draw::fill_rect(
                pixmap,
                highlight_x,
                y,
                highlight_length,
                15.0,
                color::rgba(&theme.accent, 150),
            );
        }
    }
}

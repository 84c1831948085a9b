use rand::Rng;
use rand::rngs::StdRng;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

const GRID_STEP: f32 = 80.0;
const JITTER: f32 = 8.0;

/// Circuit-board pattern: nodes scattered on a jittered coarse grid, nearby
/// pairs joined by right-angle traces, node dots outlined in the glow color.
pub(super) fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let nodes = scatter_nodes(width, height, rng);

    let trace = color::rgba(&theme.primary, 100);
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (x1, y1) = nodes[i];
            let (x2, y2) = nodes[j];
            let distance = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
            if distance < GRID_STEP * 1.5 && rng.gen_bool(0.5) {
                // Manhattan elbow through the shared corner.
                draw::line(pixmap, x1, y1, x1, y2, trace, 2.0);
                draw::line(pixmap, x1, y2, x2, y2, trace, 2.0);
            }
        }
    }

    for (x, y) in &nodes {
        draw::fill_circle(pixmap, *x, *y, 5.0, color::rgb(&theme.accent));
        draw::stroke_circle(pixmap, *x, *y, 5.0, color::rgb(&theme.glow), 1.5);
    }
}

/// Walks the interior grid, keeping each cell with probability 0.7 and
/// nudging kept nodes off the exact grid lines.
fn scatter_nodes(width: f32, height: f32, rng: &mut StdRng) -> Vec<(f32, f32)> {
    let mut nodes = Vec::new();
    let mut x = GRID_STEP;
    while x < width - GRID_STEP {
        let mut y = GRID_STEP;
        while y < height - GRID_STEP {
            if rng.gen_bool(0.7) {
                nodes.push((
                    x + rng.gen_range(-JITTER..JITTER),
                    y + rng.gen_range(-JITTER..JITTER),
                ));
            }
            y += GRID_STEP;
        }
        x += GRID_STEP;
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn nodes_land_off_the_exact_grid() {
        let mut rng = StdRng::seed_from_u64(4);
        let nodes = scatter_nodes(600.0, 338.0, &mut rng);
        assert!(!nodes.is_empty());
        let off_grid = nodes.iter().any(|(x, y)| {
            let dx = (x - (x / GRID_STEP).round() * GRID_STEP).abs();
            let dy = (y - (y / GRID_STEP).round() * GRID_STEP).abs();
            dx > 0.01 || dy > 0.01
        });
        assert!(off_grid, "every node sits exactly on a grid line");
    }

    #[test]
    fn nodes_stay_inside_the_canvas() {
        let mut rng = StdRng::seed_from_u64(9);
        for (x, y) in scatter_nodes(600.0, 338.0, &mut rng) {
            assert!(x > 0.0 && x < 600.0);
            assert!(y > 0.0 && y < 338.0);
        }
    }
}

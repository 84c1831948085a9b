//! Foreground decoration drawn after the motif: cyber corner brackets,
//! scattered geometric shapes and small light particles.

use rand::Rng;
use rand::rngs::StdRng;
use std::f32::consts::TAU;
use tiny_skia::Pixmap;

use crate::color;
use crate::draw;
use crate::theme::Theme;

const CORNER_SIZE: f32 = 100.0;
const CORNER_WIDTH: f32 = 3.0;
const TRIANGLE_COUNT: u32 = 5;
const HEXAGON_COUNT: u32 = 3;
const PARTICLE_COUNT: u32 = 20;

pub fn draw(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    corner_brackets(pixmap, theme);
    scattered_shapes(pixmap, theme, rng);
    particles(pixmap, theme, rng);
}

/// L-shaped brackets in all four corners, accent colored.
fn corner_brackets(pixmap: &mut Pixmap, theme: &Theme) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let size = CORNER_SIZE.min(width / 3.0).min(height / 3.0);
    let inset = 20.0_f32.min(size / 4.0);
    let accent = color::rgb(&theme.accent);

    let corners = [
        (inset, inset, 1.0, 1.0),
        (width - inset, inset, -1.0, 1.0),
        (inset, height - inset, 1.0, -1.0),
        (width - inset, height - inset, -1.0, -1.0),
    ];
    for (x, y, dx, dy) in corners {
        draw::line(pixmap, x, y, x + size * dx, y, accent, CORNER_WIDTH);
        draw::line(pixmap, x, y, x, y + size * dy, accent, CORNER_WIDTH);
    }
}

fn scattered_shapes(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    for _ in 0..TRIANGLE_COUNT {
        let cx = rng.gen_range(0.0..width);
        let cy = rng.gen_range(0.0..height);
        let size = rng.gen_range(20.0..60.0_f32);
        if let Some(path) = ngon(cx, cy, size / 2.0, 3, rng.gen_range(0.0..TAU)) {
            draw::stroke(pixmap, &path, color::rgba(&theme.primary, 100), 2.0);
        }
    }

    for _ in 0..HEXAGON_COUNT {
        let cx = rng.gen_range(0.0..width);
        let cy = rng.gen_range(0.0..height);
        let size = rng.gen_range(30.0..70.0_f32);
        if let Some(path) = ngon(cx, cy, size / 2.0, 6, rng.gen_range(0.0..TAU)) {
            draw::stroke(pixmap, &path, color::rgba(&theme.accent, 50), 2.0);
        }
    }
}

fn particles(pixmap: &mut Pixmap, theme: &Theme, rng: &mut StdRng) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    for _ in 0..PARTICLE_COUNT {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let radius = rng.gen_range(1.0..3.0_f32);
        let alpha = rng.gen_range(100..=255_u32) as u8;
        draw::fill_circle(pixmap, x, y, radius, color::rgba(&theme.glow, alpha));
    }
}

fn ngon(cx: f32, cy: f32, radius: f32, sides: u32, phase: f32) -> Option<tiny_skia::Path> {
    let points: Vec<(f32, f32)> = (0..sides)
        .map(|i| {
            let angle = phase + TAU * i as f32 / sides as f32;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();
    draw::polygon(&points)
}

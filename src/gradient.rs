use rand::Rng;
use rand::rngs::StdRng;
use tiny_skia::{
    GradientStop, LinearGradient, Paint, Pixmap, Point, RadialGradient, Rect, SpreadMode,
    Transform,
};

use crate::color;
use crate::config::{CanvasConfig, NoiseConfig};
use crate::error::RenderError;
use crate::theme::Theme;

/// Background gradient shape. Vertical runs top to bottom; radial runs from
/// the canvas center out to half the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientMode {
    Vertical,
    Radial,
}

/// Builds the base canvas: theme gradient plus low-amplitude noise to break
/// color banding. The only failure is pixmap allocation.
pub fn build(
    canvas: &CanvasConfig,
    theme: &Theme,
    mode: GradientMode,
    noise: &NoiseConfig,
    rng: &mut StdRng,
) -> Result<Pixmap, RenderError> {
    let width = canvas.width.max(1);
    let height = canvas.height.max(1);
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::CanvasAlloc {
        width: canvas.width,
        height: canvas.height,
    })?;
    pixmap.fill(color::rgb(&theme.background));

    let stops = vec![
        GradientStop::new(0.0, color::rgb(&theme.gradient_start)),
        GradientStop::new(1.0, color::rgb(&theme.gradient_end)),
    ];
    let (w, h) = (width as f32, height as f32);
    let shader = match mode {
        GradientMode::Vertical => LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(0.0, h),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientMode::Radial => {
            let center = Point::from_xy(w / 2.0, h / 2.0);
            let radius = (w * w + h * h).sqrt() / 2.0;
            RadialGradient::new(
                center,
                center,
                radius,
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            )
        }
    };
    if let Some(shader) = shader {
        let mut paint = Paint::default();
        paint.shader = shader;
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, w, h) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    apply_noise(&mut pixmap, noise, rng);
    Ok(pixmap)
}

/// Blends a per-channel random offset into every pixel. The canvas is
/// opaque, so the premultiplied buffer can be treated as straight RGB.
fn apply_noise(pixmap: &mut Pixmap, noise: &NoiseConfig, rng: &mut StdRng) {
    if noise.amplitude == 0 || noise.weight <= 0.0 {
        return;
    }
    let weight = noise.weight.clamp(0.0, 1.0);
    for pixel in pixmap.data_mut().chunks_exact_mut(4) {
        for channel in pixel.iter_mut().take(3) {
            let offset = rng.gen_range(0..=noise.amplitude) as f32;
            let current = *channel as f32;
            *channel = (current + (offset - current) * weight)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
    }
}

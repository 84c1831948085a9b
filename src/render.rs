//! The composition pipeline: one call takes a request to finished PNG bytes.
//! Layer order is gradient, motif, accents, bloom, then the text overlays,
//! which stay crisp because they land after the blur.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiny_skia::Pixmap;
use tracing::debug;

use crate::accents;
use crate::bloom;
use crate::color;
use crate::config::EngineConfig;
use crate::draw;
use crate::error::RenderError;
use crate::fonts::{FontStore, TextPaint};
use crate::gradient::{self, GradientMode};
use crate::motif;
use crate::request::RenderRequest;
use crate::theme::{self, Theme};
use crate::wrap;

const PANEL_PADDING: f32 = 30.0;
const TAG_MARGIN: f32 = 40.0;
const TAG_PAD_X: f32 = 14.0;
const TAG_PAD_Y: f32 = 8.0;
const BRAND_MARGIN: f32 = 30.0;

/// Renders one thumbnail and returns the encoded PNG. Never fails for any
/// title, category, tool or theme input; the only error paths are canvas
/// allocation and PNG encoding.
pub fn render_thumbnail(
    request: &RenderRequest,
    config: &EngineConfig,
) -> Result<Vec<u8>, RenderError> {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let theme = theme::select(
        request.category,
        request.tool_label.as_deref(),
        request.theme_override.as_deref(),
        &mut rng,
    );

    let mode = if rng.gen_bool(0.5) {
        GradientMode::Vertical
    } else {
        GradientMode::Radial
    };
    let mut pixmap = gradient::build(&config.canvas, theme, mode, &config.noise, &mut rng)?;
    debug!(?mode, "background composed");

    let motif = motif::pick(request.category, &mut rng);
    motif::draw(&mut pixmap, motif, theme, &mut rng);
    accents::draw(&mut pixmap, theme, &mut rng);
    bloom::apply(&mut pixmap, &config.glow);
    debug!(?motif, "scene composed, overlaying text");

    let font = FontStore::resolve(&config.text);
    draw_title(&mut pixmap, &request.title, theme, config, &font);
    if let Some(tool) = request.tool_label.as_deref()
        && !tool.trim().is_empty()
    {
        draw_tag(&mut pixmap, tool, theme, config, &font);
    }
    if config.brand.enabled && !config.brand.text.is_empty() {
        draw_brand(&mut pixmap, theme, config, &font);
    }

    pixmap
        .encode_png()
        .map_err(|error| RenderError::Encode(error.to_string()))
}

/// Wrapped title lines over a translucent backdrop panel, each line drawn as
/// stacked glow passes under a solid fill.
fn draw_title(
    pixmap: &mut Pixmap,
    title: &str,
    theme: &Theme,
    config: &EngineConfig,
    font: &FontStore,
) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let text = &config.text;
    let size = text.title_size;
    let max_width = (width - 2.0 * text.margin_x).max(size);

    let cleaned = wrap::strip_date_prefix(title);
    let lines = wrap::wrap_title(&cleaned, font, size, max_width, text.max_lines, text);
    if lines.is_empty() {
        return;
    }
    debug!(line_count = lines.len(), "title wrapped");

    let line_widths: Vec<f32> = lines.iter().map(|line| font.measure(line, size)).collect();
    let block_width = line_widths.iter().cloned().fold(0.0, f32::max);
    let block_height = lines.len() as f32 * text.line_height;
    let block_top = (height - block_height) / 2.0;

    draw::fill_rect(
        pixmap,
        (width - block_width) / 2.0 - PANEL_PADDING,
        block_top - PANEL_PADDING / 2.0,
        block_width + PANEL_PADDING * 2.0,
        block_height + PANEL_PADDING,
        color::rgba("#000000", 200),
    );
    draw::stroke_rect(
        pixmap,
        (width - block_width) / 2.0 - PANEL_PADDING,
        block_top - PANEL_PADDING / 2.0,
        block_width + PANEL_PADDING * 2.0,
        block_height + PANEL_PADDING,
        color::rgba(&theme.primary, 150),
        3.0,
    );

    let glow_color = color::rgba(&theme.glow, config.glow.text_glow_alpha);
    for (index, line) in lines.iter().enumerate() {
        let x = (width - line_widths[index]) / 2.0;
        let y_top = block_top + index as f32 * text.line_height + (text.line_height - size) / 2.0;
        for glow_width in &config.glow.text_glow_widths {
            font.draw_text(
                pixmap,
                line,
                size,
                x,
                y_top,
                &TextPaint::Glow {
                    color: glow_color,
                    width: *glow_width,
                },
            );
        }
        font.draw_text(
            pixmap,
            line,
            size,
            x,
            y_top,
            &TextPaint::Fill(color::rgb(&theme.text)),
        );
    }
}

/// Tool chip in the top-left corner: `#LABEL` uppercased inside an outlined
/// translucent box.
fn draw_tag(
    pixmap: &mut Pixmap,
    tool: &str,
    theme: &Theme,
    config: &EngineConfig,
    font: &FontStore,
) {
    let size = config.text.tag_size;
    let label = format!("#{}", tool.trim().to_uppercase());
    let label_width = font.measure(&label, size);

    draw::fill_rect(
        pixmap,
        TAG_MARGIN - TAG_PAD_X,
        TAG_MARGIN - TAG_PAD_Y,
        label_width + TAG_PAD_X * 2.0,
        size + TAG_PAD_Y * 2.0,
        color::rgba(&theme.primary, 100),
    );
    draw::stroke_rect(
        pixmap,
        TAG_MARGIN - TAG_PAD_X,
        TAG_MARGIN - TAG_PAD_Y,
        label_width + TAG_PAD_X * 2.0,
        size + TAG_PAD_Y * 2.0,
        color::rgba(&theme.glow, 200),
        2.0,
    );
    font.draw_text(
        pixmap,
        &label,
        size,
        TAG_MARGIN,
        TAG_MARGIN,
        &TextPaint::Fill(color::rgb(&theme.text)),
    );
}

/// Brand mark in the bottom-right corner, with a soft secondary-color halo.
fn draw_brand(pixmap: &mut Pixmap, theme: &Theme, config: &EngineConfig, font: &FontStore) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let size = config.text.tag_size;
    let text = &config.brand.text;
    let x = width - font.measure(text, size) - BRAND_MARGIN;
    let y_top = height - size - BRAND_MARGIN;

    for pass in (1..=3u8).rev() {
        font.draw_text(
            pixmap,
            text,
            size,
            x,
            y_top,
            &TextPaint::Glow {
                color: color::rgba(&theme.secondary, 20 + pass * 10),
                width: pass as f32 * 2.0,
            },
        );
    }
    font.draw_text(
        pixmap,
        text,
        size,
        x,
        y_top,
        &TextPaint::Fill(color::rgb(&theme.text)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::request::Category;

    fn small_config() -> EngineConfig {
        EngineConfig {
            canvas: CanvasConfig {
                width: 300,
                height: 169,
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn output_is_png() {
        let mut request = RenderRequest::new("Quick check");
        request.seed = Some(9);
        let bytes = render_thumbnail(&request, &small_config()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn equal_seeds_render_identical_bytes() {
        let mut request = RenderRequest::new("Deterministic output");
        request.category = Category::Music;
        request.seed = Some(42);
        let config = small_config();
        let first = render_thumbnail(&request, &config).unwrap();
        let second = render_thumbnail(&request, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_title_still_renders() {
        let mut request = RenderRequest::new("");
        request.seed = Some(1);
        assert!(render_thumbnail(&request, &small_config()).is_ok());
    }

    #[test]
    fn zero_sized_canvas_is_clamped_not_fatal() {
        let mut config = small_config();
        config.canvas.width = 0;
        let mut request = RenderRequest::new("x");
        request.seed = Some(1);
        assert!(render_thumbnail(&request, &config).is_ok());
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canvas geometry. The 1200x675 default is the 16:9 article-cover size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 675,
        }
    }
}

/// Title and overlay typography. `font_paths` are tried first, then
/// `font_families` against the system database; the built-in bitmap face is
/// the guaranteed last resort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font_paths: Vec<PathBuf>,
    pub font_families: Vec<String>,
    pub title_size: f32,
    pub tag_size: f32,
    pub max_lines: usize,
    /// Horizontal margin on each side; usable title width is
    /// `canvas.width - 2 * margin_x`.
    pub margin_x: f32,
    pub line_height: f32,
    pub ellipsis: String,
    /// Multi-character separators split on preferentially when a title
    /// overflows and both halves fit on their own line.
    pub preferred_breaks: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_paths: Vec::new(),
            font_families: vec![
                "Hiragino Sans".to_string(),
                "Noto Sans CJK JP".to_string(),
                "Noto Sans JP".to_string(),
                "Arial".to_string(),
            ],
            title_size: 52.0,
            tag_size: 20.0,
            max_lines: 3,
            margin_x: 60.0,
            line_height: 70.0,
            ellipsis: "...".to_string(),
            preferred_breaks: vec![
                "ガイド - ".to_string(),
                "ガイド-".to_string(),
                "ガイド ".to_string(),
            ],
        }
    }
}

/// Bloom post-process and neon text glow parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub bloom_brightness: f32,
    pub bloom_radius: u32,
    pub bloom_mix: f32,
    /// Stroke widths of the stacked glow passes under the solid text, drawn
    /// widest first.
    pub text_glow_widths: Vec<f32>,
    pub text_glow_alpha: u8,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            bloom_brightness: 2.0,
            bloom_radius: 10,
            bloom_mix: 0.3,
            text_glow_widths: vec![8.0, 6.0, 4.0, 2.0],
            text_glow_alpha: 50,
        }
    }
}

/// Per-pixel noise blended into the gradient to break color banding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Maximum per-channel offset, in 0..=255 units.
    pub amplitude: u8,
    pub weight: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            amplitude: 30,
            weight: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    pub text: String,
    pub enabled: bool,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            text: "AI MELODY KOBO".to_string(),
            enabled: true,
        }
    }
}

/// Start-up configuration for the engine. Nothing here mutates at runtime;
/// one instance is shared by value across renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    pub text: TextConfig,
    pub glow: GlowConfig,
    pub noise: NoiseConfig,
    pub brand: BrandConfig,
}

/// Loads a JSON config file, filling unspecified fields from defaults.
/// `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&contents)?;
    Ok(config)
}

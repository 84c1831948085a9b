use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::request::Category;

/// Immutable color palette used consistently across one render. Colors are
/// hex strings, parsed at draw time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub glow: String,
    pub background: String,
    pub text: String,
    pub gradient_start: String,
    pub gradient_end: String,
}

macro_rules! theme {
    ($primary:expr, $secondary:expr, $accent:expr, $glow:expr,
     $background:expr, $text:expr, $gradient_start:expr, $gradient_end:expr) => {
        Theme {
            primary: $primary.to_string(),
            secondary: $secondary.to_string(),
            accent: $accent.to_string(),
            glow: $glow.to_string(),
            background: $background.to_string(),
            text: $text.to_string(),
            gradient_start: $gradient_start.to_string(),
            gradient_end: $gradient_end.to_string(),
        }
    };
}

impl Theme {
    pub fn neon_purple() -> Self {
        theme!("#FF00FF", "#00FFFF", "#FF00AA", "#FF00FF", "#0A0A0F", "#FFFFFF", "#1A0033", "#000511")
    }

    pub fn cyber_blue() -> Self {
        theme!("#00D4FF", "#FF0080", "#00FF88", "#00D4FF", "#000814", "#FFFFFF", "#001D3D", "#000814")
    }

    pub fn ai_green() -> Self {
        theme!("#00FF41", "#FF1744", "#FFEA00", "#00FF41", "#0D1117", "#FFFFFF", "#001A00", "#0D1117")
    }

    pub fn synth_orange() -> Self {
        theme!("#FF6B35", "#F7931E", "#FF006E", "#FF6B35", "#1A0E0A", "#FFFFFF", "#2D1810", "#1A0E0A")
    }

    pub fn hologram() -> Self {
        theme!("#B388FF", "#00E5FF", "#FF4081", "#B388FF", "#0F0F23", "#FFFFFF", "#1A1A3E", "#0F0F23")
    }

    /// Strict monochrome terminal palette. Reachable only by explicit
    /// override or the development category, never by random fallback.
    pub fn matrix() -> Self {
        theme!("#00FF00", "#00AA00", "#00FF00", "#00FF00", "#000000", "#00FF00", "#001100", "#000000")
    }
}

/// Name of the theme excluded from the random fallback pool.
const RESERVED: &str = "matrix";

static CATALOG: Lazy<Vec<(&'static str, Theme)>> = Lazy::new(|| {
    vec![
        ("neon_purple", Theme::neon_purple()),
        ("cyber_blue", Theme::cyber_blue()),
        ("ai_green", Theme::ai_green()),
        ("synth_orange", Theme::synth_orange()),
        ("hologram", Theme::hologram()),
        ("matrix", Theme::matrix()),
    ]
});

/// Looks a theme up by name. Case-insensitive.
pub fn lookup(name: &str) -> Option<&'static Theme> {
    let name = name.trim().to_ascii_lowercase();
    CATALOG
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, theme)| theme)
}

pub fn theme_names() -> Vec<&'static str> {
    CATALOG.iter().map(|(name, _)| *name).collect()
}

fn tool_theme(tool_label: &str) -> Option<&'static str> {
    match tool_label.trim().to_ascii_lowercase().as_str() {
        "suno" => Some("neon_purple"),
        "udio" => Some("cyber_blue"),
        "musicgen" => Some("ai_green"),
        "stable audio" => Some("synth_orange"),
        "aiva" => Some("hologram"),
        _ => None,
    }
}

fn category_theme(category: Category) -> Option<&'static str> {
    match category {
        Category::Voice => Some("cyber_blue"),
        Category::Music => Some("neon_purple"),
        Category::Development => Some("matrix"),
        Category::News => Some("hologram"),
        _ => None,
    }
}

/// Resolves the palette for one render. Lookup order: explicit override,
/// tool label, category, then a uniform random pick among the general
/// themes (the reserved terminal theme is never chosen by default).
/// Total by construction; unknown inputs fall through to the random pool.
pub fn select(
    category: Category,
    tool_label: Option<&str>,
    theme_override: Option<&str>,
    rng: &mut StdRng,
) -> &'static Theme {
    if let Some(name) = theme_override
        && let Some(theme) = lookup(name)
    {
        debug!(theme = name, "theme selected by override");
        return theme;
    }

    if let Some(name) = tool_label.and_then(tool_theme) {
        debug!(theme = name, "theme selected by tool label");
        return lookup(name).expect("tool theme names are catalog keys");
    }

    if let Some(name) = category_theme(category) {
        debug!(theme = name, ?category, "theme selected by category");
        return lookup(name).expect("category theme names are catalog keys");
    }

    let pool: Vec<&'static str> = CATALOG
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| *name != RESERVED)
        .collect();
    let name = pool.choose(rng).copied().expect("catalog is non-empty");
    debug!(theme = name, "theme selected at random");
    lookup(name).expect("pool names are catalog keys")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(lookup("Neon_Purple").is_some());
        assert!(lookup("  MATRIX ").is_some());
        assert!(lookup("nonexistent").is_none());
    }

    #[test]
    fn all_catalog_colors_parse() {
        for name in theme_names() {
            let theme = lookup(name).unwrap();
            for hex in [
                &theme.primary,
                &theme.secondary,
                &theme.accent,
                &theme.glow,
                &theme.background,
                &theme.text,
                &theme.gradient_start,
                &theme.gradient_end,
            ] {
                let stripped = hex.trim_start_matches('#');
                assert_eq!(stripped.len(), 6, "{name}: bad hex {hex}");
                assert!(
                    u32::from_str_radix(stripped, 16).is_ok(),
                    "{name}: bad hex {hex}"
                );
            }
        }
    }

    #[test]
    fn select_is_total_for_arbitrary_inputs() {
        let mut rng = StdRng::seed_from_u64(7);
        for category in [
            Category::Music,
            Category::Voice,
            Category::Tutorial,
            Category::News,
            Category::Comparison,
            Category::Development,
            Category::General,
        ] {
            select(category, Some("no-such-tool"), Some("no-such-theme"), &mut rng);
            select(category, None, None, &mut rng);
        }
    }

    #[test]
    fn override_wins_over_tool_and_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let theme = select(Category::Voice, Some("suno"), Some("ai_green"), &mut rng);
        assert_eq!(theme.primary, Theme::ai_green().primary);
    }

    #[test]
    fn tool_label_wins_over_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let theme = select(Category::Voice, Some("Suno"), None, &mut rng);
        assert_eq!(theme.primary, Theme::neon_purple().primary);
    }

    #[test]
    fn random_fallback_never_picks_the_reserved_theme() {
        let matrix = Theme::matrix();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let theme = select(Category::General, None, None, &mut rng);
            assert_ne!(theme.background, matrix.background);
        }
    }
}

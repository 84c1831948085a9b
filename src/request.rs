use serde::{Deserialize, Serialize};

/// Content category driving motif and theme selection. The set is closed;
/// free-form strings from callers are folded into it by [`Category::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Music,
    Voice,
    Tutorial,
    News,
    Comparison,
    Development,
    General,
}

impl Category {
    /// Maps a caller-supplied category string onto the closed enum. Unknown
    /// values degrade to `General`; this is deliberate, not an error path.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "music" | "music_generation" | "suno_specific" | "udio_specific"
            | "musicgen_specific" => Category::Music,
            "voice" | "voice_synthesis" | "singing_synthesis" => Category::Voice,
            "tutorial" | "beginner_guide" | "howto" => Category::Tutorial,
            "news" | "tool_update" | "industry_news" => Category::News,
            "comparison" | "tool_comparison" | "versus" => Category::Comparison,
            "development" | "programming" | "app_development" => Category::Development,
            _ => Category::General,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

/// One thumbnail render. The title may be empty or arbitrarily long with
/// mixed scripts; the engine must always produce an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRequest {
    pub title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tool_label: Option<String>,
    #[serde(default)]
    pub theme_override: Option<String>,
    /// Seed for motif choice, jitter and noise. `None` draws from entropy;
    /// equal seeds with equal inputs render byte-identical output.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RenderRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_aliases() {
        assert_eq!(Category::parse("suno_specific"), Category::Music);
        assert_eq!(Category::parse("voice_synthesis"), Category::Voice);
        assert_eq!(Category::parse("beginner_guide"), Category::Tutorial);
        assert_eq!(Category::parse("tool_comparison"), Category::Comparison);
        assert_eq!(Category::parse("programming"), Category::Development);
    }

    #[test]
    fn unknown_strings_fall_back_to_general() {
        assert_eq!(Category::parse(""), Category::General);
        assert_eq!(Category::parse("quantum_basket_weaving"), Category::General);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse("  Tutorial "), Category::Tutorial);
        assert_eq!(Category::parse("NEWS"), Category::News);
    }
}

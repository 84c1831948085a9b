//! Generative background motifs. Each motif is a self-contained procedure
//! over the canvas and theme, deterministic for a given rng; the category
//! decides which motifs are eligible and the rng picks one per render.

mod bars;
mod circuit;
mod codelines;
mod radial;
mod split;
mod waveform;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tiny_skia::Pixmap;
use tracing::debug;

use crate::request::Category;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motif {
    Waveform,
    FrequencyBars,
    RadialVisualizer,
    CircuitGraph,
    CodeLines,
    SplitDiagonal,
}

/// Motifs a category may draw. Every category maps to a non-empty set.
pub fn eligible(category: Category) -> &'static [Motif] {
    match category {
        Category::Music | Category::General => &[
            Motif::Waveform,
            Motif::FrequencyBars,
            Motif::RadialVisualizer,
        ],
        Category::Voice => &[Motif::Waveform, Motif::RadialVisualizer],
        Category::Tutorial | Category::Development => {
            &[Motif::CodeLines, Motif::CircuitGraph]
        }
        Category::News => &[Motif::CodeLines, Motif::FrequencyBars],
        Category::Comparison => &[Motif::SplitDiagonal],
    }
}

pub fn pick(category: Category, rng: &mut StdRng) -> Motif {
    let motif = eligible(category)
        .choose(rng)
        .copied()
        .unwrap_or(Motif::Waveform);
    debug!(?motif, ?category, "motif selected");
    motif
}

/// Draws the motif over the gradient background, in place.
pub fn draw(pixmap: &mut Pixmap, motif: Motif, theme: &Theme, rng: &mut StdRng) {
    match motif {
        Motif::Waveform => waveform::draw(pixmap, theme, rng),
        Motif::FrequencyBars => bars::draw(pixmap, theme, rng),
        Motif::RadialVisualizer => radial::draw(pixmap, theme, rng),
        Motif::CircuitGraph => circuit::draw(pixmap, theme, rng),
        Motif::CodeLines => codelines::draw(pixmap, theme, rng),
        Motif::SplitDiagonal => split::draw(pixmap, theme, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const ALL_CATEGORIES: [Category; 7] = [
        Category::Music,
        Category::Voice,
        Category::Tutorial,
        Category::News,
        Category::Comparison,
        Category::Development,
        Category::General,
    ];

    #[test]
    fn every_category_has_eligible_motifs() {
        for category in ALL_CATEGORIES {
            assert!(!eligible(category).is_empty(), "{category:?}");
        }
    }

    #[test]
    fn comparison_always_uses_the_split_motif() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..8 {
            assert_eq!(pick(Category::Comparison, &mut rng), Motif::SplitDiagonal);
        }
    }

    #[test]
    fn pick_is_deterministic_for_equal_seeds() {
        for category in ALL_CATEGORIES {
            let mut rng_a = StdRng::seed_from_u64(99);
            let mut rng_b = StdRng::seed_from_u64(99);
            assert_eq!(pick(category, &mut rng_a), pick(category, &mut rng_b));
        }
    }

    #[test]
    fn all_motifs_draw_without_panicking_and_touch_the_canvas() {
        let motifs = [
            Motif::Waveform,
            Motif::FrequencyBars,
            Motif::RadialVisualizer,
            Motif::CircuitGraph,
            Motif::CodeLines,
            Motif::SplitDiagonal,
        ];
        let theme = Theme::neon_purple();
        for motif in motifs {
            let mut pixmap = Pixmap::new(600, 338).unwrap();
            let mut rng = StdRng::seed_from_u64(11);
            draw(&mut pixmap, motif, &theme, &mut rng);
            assert!(
                pixmap.data().iter().any(|byte| *byte != 0),
                "{motif:?} drew nothing"
            );
        }
    }

    #[test]
    fn motifs_survive_tiny_canvases() {
        let motifs = [
            Motif::Waveform,
            Motif::FrequencyBars,
            Motif::RadialVisualizer,
            Motif::CircuitGraph,
            Motif::CodeLines,
            Motif::SplitDiagonal,
        ];
        let theme = Theme::matrix();
        for motif in motifs {
            let mut pixmap = Pixmap::new(8, 8).unwrap();
            let mut rng = StdRng::seed_from_u64(2);
            draw(&mut pixmap, motif, &theme, &mut rng);
        }
    }
}

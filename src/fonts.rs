use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use tiny_skia::{
    Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};
use tracing::{debug, warn};
use ttf_parser::Face;

use crate::config::TextConfig;

static FONT_CACHE: Lazy<Mutex<HashMap<String, Option<Arc<OutlineFont>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Advance width, relative to the font size, charged for a glyph the loaded
/// face cannot supply.
const FALLBACK_ADVANCE: f32 = 0.56;

/// A resolved font: either a real outline face or the built-in bitmap
/// fallback. Resolution never fails; the bitmap face is the last resort of
/// the configured chain.
#[derive(Clone)]
pub struct FontStore {
    font: Option<Arc<OutlineFont>>,
}

pub struct OutlineFont {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
}

/// How a text run is painted. Glow passes are stroked (and filled) dilated
/// copies drawn under the final solid fill.
pub enum TextPaint {
    Fill(Color),
    Glow { color: Color, width: f32 },
}

impl FontStore {
    /// Resolves the configured chain: explicit file paths first, then the
    /// system font database by family name, then the built-in bitmap face.
    /// The outcome is cached process-wide per configuration.
    pub fn resolve(config: &TextConfig) -> Self {
        let key = cache_key(config);
        if let Ok(mut cache) = FONT_CACHE.lock() {
            if let Some(found) = cache.get(&key) {
                return Self { font: found.clone() };
            }
            let loaded = load_chain(config);
            cache.insert(key, loaded.clone());
            return Self { font: loaded };
        }
        Self {
            font: load_chain(config),
        }
    }

    /// The guaranteed last-resort face, independent of configuration and the
    /// host system. Tests use this for fully deterministic metrics.
    pub fn builtin() -> Self {
        Self { font: None }
    }

    pub fn has_outline(&self) -> bool {
        self.font.is_some()
    }

    /// Measured advance width of `text` at `size` pixels under this store's
    /// metric. Pure and total; unknown glyphs are charged a fallback width.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        if text.is_empty() || size <= 0.0 {
            return 0.0;
        }
        match &self.font {
            Some(font) => font.measure(text, size),
            None => text
                .chars()
                .filter(|ch| *ch != '\n')
                .map(|ch| builtin_advance(ch, size))
                .sum(),
        }
    }

    /// Draws one line of text with its top edge at `y_top`. Out-of-bounds
    /// geometry is clipped by the raster layer, never an error.
    pub fn draw_text(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        size: f32,
        x: f32,
        y_top: f32,
        paint: &TextPaint,
    ) {
        match &self.font {
            Some(font) => font.draw(pixmap, text, size, x, y_top, paint),
            None => draw_builtin(pixmap, text, size, x, y_top, paint),
        }
    }
}

fn cache_key(config: &TextConfig) -> String {
    let mut key = String::new();
    for path in &config.font_paths {
        key.push_str(&path.to_string_lossy());
        key.push(';');
    }
    key.push('|');
    for family in &config.font_families {
        key.push_str(family);
        key.push(';');
    }
    key
}

fn load_chain(config: &TextConfig) -> Option<Arc<OutlineFont>> {
    for path in &config.font_paths {
        let Ok(data) = fs::read(path) else {
            debug!(path = %path.display(), "font path unreadable, trying next candidate");
            continue;
        };
        if let Some(font) = OutlineFont::parse(data, 0) {
            debug!(path = %path.display(), "loaded font from configured path");
            return Some(Arc::new(font));
        }
        debug!(path = %path.display(), "font file did not parse, trying next candidate");
    }

    let mut db = Database::new();
    db.load_system_fonts();

    let mut families: Vec<Family<'_>> = config
        .font_families
        .iter()
        .map(|name| Family::Name(name.as_str()))
        .collect();
    families.push(Family::SansSerif);

    let query = Query {
        families: &families,
        weight: Weight::BOLD,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query).or_else(|| {
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        db.query(&query)
    });

    if let Some(id) = id {
        let mut loaded = None;
        db.with_face_data(id, |data, index| {
            loaded = OutlineFont::parse(data.to_vec(), index);
        });
        if let Some(font) = loaded {
            debug!("loaded font from system database");
            return Some(Arc::new(font));
        }
    }

    warn!("no usable font found; falling back to built-in bitmap face");
    None
}

impl OutlineFont {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
        })
    }

    fn measure(&self, text: &str, size: f32) -> f32 {
        let Ok(face) = Face::parse(&self.data, self.index) else {
            return text.chars().count() as f32 * size * FALLBACK_ADVANCE;
        };
        let scale = size / self.units_per_em as f32;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            width += match face.glyph_index(ch) {
                Some(glyph) => face
                    .glyph_hor_advance(glyph)
                    .map(|advance| advance as f32 * scale)
                    .unwrap_or(size * FALLBACK_ADVANCE),
                None => size * missing_advance(ch),
            };
        }
        width.max(0.0)
    }

    fn draw(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        size: f32,
        x: f32,
        y_top: f32,
        paint: &TextPaint,
    ) {
        let Ok(face) = Face::parse(&self.data, self.index) else {
            return;
        };
        let scale = size / self.units_per_em as f32;
        let baseline = y_top + face.ascender() as f32 * scale;
        let Some(path) = line_path(&face, text, scale, size, x, baseline) else {
            return;
        };
        let mut skia_paint = Paint::default();
        skia_paint.anti_alias = true;
        match paint {
            TextPaint::Fill(color) => {
                skia_paint.set_color(*color);
                pixmap.fill_path(
                    &path,
                    &skia_paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            TextPaint::Glow { color, width } => {
                skia_paint.set_color(*color);
                pixmap.fill_path(
                    &path,
                    &skia_paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &skia_paint, &stroke, Transform::identity(), None);
            }
        }
    }
}

/// Builds a single path covering the whole line, glyph by glyph.
fn line_path(
    face: &Face,
    text: &str,
    scale: f32,
    size: f32,
    origin_x: f32,
    baseline: f32,
) -> Option<Path> {
    let mut builder = GlyphPathBuilder::new(origin_x, baseline, scale);
    for ch in text.chars() {
        if ch == '\n' {
            continue;
        }
        match face.glyph_index(ch) {
            Some(glyph) => {
                face.outline_glyph(glyph, &mut builder);
                let advance = face
                    .glyph_hor_advance(glyph)
                    .map(|advance| advance as f32 * scale)
                    .unwrap_or(size * FALLBACK_ADVANCE);
                builder.advance(advance);
            }
            None => builder.advance(size * missing_advance(ch)),
        }
    }
    builder.finish()
}

fn missing_advance(ch: char) -> f32 {
    if is_fullwidth(ch) { 1.0 } else { FALLBACK_ADVANCE }
}

/// East-Asian fullwidth ranges relevant to mixed-script titles.
pub fn is_fullwidth(ch: char) -> bool {
    matches!(ch,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{303E}'
        | '\u{3041}'..='\u{33FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{A000}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FE30}'..='\u{FE4F}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{20000}'..='\u{2FFFD}'
        | '\u{30000}'..='\u{3FFFD}')
}

/// Collects glyph outlines into one tiny-skia path, advancing a pen between
/// glyphs. Font Y points up; screen Y points down.
struct GlyphPathBuilder {
    path: PathBuilder,
    pen_x: f32,
    baseline: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(pen_x: f32, baseline: f32, scale: f32) -> Self {
        Self {
            path: PathBuilder::new(),
            pen_x,
            baseline,
            scale,
        }
    }

    fn advance(&mut self, amount: f32) {
        self.pen_x += amount;
    }

    fn tx(&self, gx: f32) -> f32 {
        self.pen_x + gx * self.scale
    }

    fn ty(&self, gy: f32) -> f32 {
        self.baseline - gy * self.scale
    }

    fn finish(self) -> Option<Path> {
        self.path.finish()
    }
}

impl ttf_parser::OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(self.tx(x), self.ty(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(self.tx(x), self.ty(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path
            .quad_to(self.tx(x1), self.ty(y1), self.tx(x), self.ty(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.cubic_to(
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            self.tx(x),
            self.ty(y),
        );
    }

    fn close(&mut self) {
        self.path.close();
    }
}

// ---------------------------------------------------------------------------
// Built-in bitmap face
// ---------------------------------------------------------------------------

/// Glyph cell is 5 columns by 7 rows; one column of spacing.
const BUILTIN_ROWS: f32 = 7.0;
const BUILTIN_COLS: f32 = 5.0;

fn builtin_advance(ch: char, size: f32) -> f32 {
    if ch.is_ascii() {
        size * (BUILTIN_COLS + 1.0) / BUILTIN_ROWS
    } else {
        size
    }
}

fn draw_builtin(
    pixmap: &mut Pixmap,
    text: &str,
    size: f32,
    x: f32,
    y_top: f32,
    paint: &TextPaint,
) {
    let (color, inflate) = match paint {
        TextPaint::Fill(color) => (*color, 0.0),
        TextPaint::Glow { color, width } => (*color, width / 2.0),
    };
    let mut skia_paint = Paint::default();
    skia_paint.anti_alias = true;
    skia_paint.set_color(color);

    let dot = size / BUILTIN_ROWS;
    let mut pen_x = x;
    for ch in text.chars() {
        if ch == '\n' {
            continue;
        }
        if let Some(glyph) = builtin_glyph(ch) {
            for (col, bits) in glyph.iter().enumerate() {
                for row in 0..7u32 {
                    if bits & (1 << row) == 0 {
                        continue;
                    }
                    crate::draw::fill_rect(
                        pixmap,
                        pen_x + col as f32 * dot - inflate,
                        y_top + row as f32 * dot - inflate,
                        dot + inflate * 2.0,
                        dot + inflate * 2.0,
                        color,
                    );
                }
            }
        } else if !ch.is_ascii() {
            // No bitmap for this script: a hollow box keeps layout visible.
            let pad = size * 0.1;
            if let Some(rect) = Rect::from_xywh(
                pen_x + pad - inflate,
                y_top + pad - inflate,
                size * 0.8 + inflate * 2.0,
                size * 0.8 + inflate * 2.0,
            ) {
                let mut outline = PathBuilder::new();
                outline.push_rect(rect);
                if let Some(path) = outline.finish() {
                    let stroke = Stroke {
                        width: (size * 0.08 + inflate).max(1.0),
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &skia_paint, &stroke, Transform::identity(), None);
                }
            }
        }
        pen_x += builtin_advance(ch, size);
    }
}

fn builtin_glyph(ch: char) -> Option<&'static [u8; 5]> {
    if !(' '..='~').contains(&ch) {
        return None;
    }
    Some(&BUILTIN_5X7[ch as usize - 0x20])
}

/// Classic column-major 5x7 ASCII face; bit 0 of each column byte is the top
/// row. Printable range 0x20..=0x7E.
#[rustfmt::skip]
const BUILTIN_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x14, 0x08, 0x3E, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x41, 0x22, 0x14, 0x08, 0x00], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x32], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x08, 0x2A, 0x1C, 0x08], // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_measure_is_monotonic_in_length() {
        let font = FontStore::builtin();
        let short = font.measure("abc", 52.0);
        let long = font.measure("abcdef", 52.0);
        assert!(long > short);
    }

    #[test]
    fn builtin_measure_scales_with_size() {
        let font = FontStore::builtin();
        let small = font.measure("hello", 20.0);
        let large = font.measure("hello", 40.0);
        assert!((large - small * 2.0).abs() < 0.001);
    }

    #[test]
    fn fullwidth_chars_measure_wider_than_ascii() {
        let font = FontStore::builtin();
        assert!(font.measure("音", 52.0) > font.measure("a", 52.0));
    }

    #[test]
    fn empty_text_measures_zero() {
        let font = FontStore::builtin();
        assert_eq!(font.measure("", 52.0), 0.0);
    }

    #[test]
    fn fullwidth_classifier_covers_kana_and_kanji() {
        for ch in ['あ', 'ア', '音', '楽', '【', '】'] {
            assert!(is_fullwidth(ch), "{ch} should be fullwidth");
        }
        for ch in ['a', 'Z', '0', '-', ' '] {
            assert!(!is_fullwidth(ch), "{ch} should be halfwidth");
        }
    }

    #[test]
    fn builtin_draw_does_not_panic_outside_canvas() {
        let mut pixmap = Pixmap::new(100, 50).unwrap();
        let font = FontStore::builtin();
        let paint = TextPaint::Fill(Color::WHITE);
        font.draw_text(&mut pixmap, "clip me 音", 40.0, -30.0, -10.0, &paint);
        font.draw_text(&mut pixmap, "far", 40.0, 500.0, 500.0, &paint);
    }

    #[test]
    fn builtin_draw_survives_tiny_sizes() {
        // Sub-2px dots at fractional positions must not trip the raster
        // layer's hairline path.
        let mut pixmap = Pixmap::new(60, 12).unwrap();
        let font = FontStore::builtin();
        font.draw_text(
            &mut pixmap,
            "tiny text",
            8.0,
            0.4,
            0.3,
            &TextPaint::Fill(Color::WHITE),
        );
        font.draw_text(
            &mut pixmap,
            "glow",
            8.0,
            0.4,
            0.3,
            &TextPaint::Glow {
                color: Color::WHITE,
                width: 1.0,
            },
        );
    }

    #[test]
    fn builtin_draw_touches_pixels() {
        let mut pixmap = Pixmap::new(200, 60).unwrap();
        let font = FontStore::builtin();
        font.draw_text(
            &mut pixmap,
            "AI",
            40.0,
            10.0,
            10.0,
            &TextPaint::Fill(Color::WHITE),
        );
        assert!(pixmap.data().iter().any(|byte| *byte != 0));
    }

    #[test]
    fn resolve_always_yields_a_store() {
        // Whatever the host has installed, resolution must not fail.
        let store = FontStore::resolve(&TextConfig::default());
        assert!(store.measure("fallback", 20.0) > 0.0);
    }
}

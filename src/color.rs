use tiny_skia::Color;

/// Parses a `#RRGGBB` (or `RRGGBB`) hex string. Malformed input degrades to
/// mid-grey rather than erroring; theme tables are the only callers and are
/// validated by tests.
pub fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return (128, 128, 128);
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(128);
    (channel(0..2), channel(2..4), channel(4..6))
}

/// Opaque color from a hex string.
pub fn rgb(hex: &str) -> Color {
    let (r, g, b) = parse_hex(hex);
    Color::from_rgba8(r, g, b, 255)
}

/// Color from a hex string with an explicit alpha.
pub fn rgba(hex: &str, alpha: u8) -> Color {
    let (r, g, b) = parse_hex(hex);
    Color::from_rgba8(r, g, b, alpha)
}

/// Linear interpolation between two hex colors, `t` clamped to `0..=1`.
pub fn lerp(start: &str, end: &str, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (r1, g1, b1) = parse_hex(start);
    let (r2, g2, b2) = parse_hex(end);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::from_rgba8(mix(r1, r2), mix(g1, g2), mix(b1, b2), 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#FF00AA"), (255, 0, 170));
        assert_eq!(parse_hex("00d4ff"), (0, 212, 255));
    }

    #[test]
    fn malformed_hex_degrades_to_grey() {
        assert_eq!(parse_hex("#12"), (128, 128, 128));
        assert_eq!(parse_hex("zzzzzz"), (128, 128, 128));
        assert_eq!(parse_hex("音楽"), (128, 128, 128));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let start = lerp("#000000", "#FFFFFF", 0.0);
        let end = lerp("#000000", "#FFFFFF", 1.0);
        let mid = lerp("#000000", "#FFFFFF", 0.5);
        assert_eq!(start.to_color_u8().red(), 0);
        assert_eq!(end.to_color_u8().red(), 255);
        assert_eq!(mid.to_color_u8().red(), 128);
    }

    #[test]
    fn lerp_clamps_t() {
        let c = lerp("#000000", "#FFFFFF", 2.0);
        assert_eq!(c.to_color_u8().red(), 255);
    }
}

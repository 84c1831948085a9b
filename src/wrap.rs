use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::TextConfig;
use crate::fonts::FontStore;

/// Leading bracketed date/version prefix, e.g. `【2025年最新版】`.
static DATE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"【[^】]*】").expect("valid regex"));

/// Punctuation and enumeration delimiters a line may break after.
const DELIMITERS: &[char] = &[
    '：', '、', '。', '！', '？', 'ー', '・', '／', '（', '）', '「', '」', ' ', ',', '.', ':',
    '!', '?',
];

/// Particles and short function words a line may break after, provided a
/// non-trivial remainder follows. Multi-character entries first so they win
/// over their single-character prefixes.
const PARTICLES: &[&str] = &["から", "まで", "より", "の", "を", "に", "で", "と", "は", "が"];

/// How far back the script-boundary scan looks for a katakana transition.
const SCRIPT_WINDOW: usize = 10;

/// Removes bracketed date/version prefixes before layout. This is content
/// normalization, not line breaking.
pub fn strip_date_prefix(title: &str) -> String {
    DATE_PREFIX.replace_all(title, "").trim().to_string()
}

/// Wraps `text` into at most `max_lines` lines, each measuring at most
/// `max_width` pixels under `font` at `size`. Empty input yields no lines.
/// Truncation appends the configured ellipsis to the last kept line.
///
/// Break points are searched backward from the overflow position in priority
/// order: preferred separator phrase, punctuation delimiter, particle
/// boundary, katakana script boundary, then the overflow character itself.
/// The last rule guarantees forward progress on break-free input.
pub fn wrap_title(
    text: &str,
    font: &FontStore,
    size: f32,
    max_width: f32,
    max_lines: usize,
    config: &TextConfig,
) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || max_lines == 0 {
        return Vec::new();
    }
    if font.measure(text, size) <= max_width {
        return vec![text.to_string()];
    }

    // The phrase split always yields two lines, so it needs room for both.
    if max_lines >= 2
        && let Some(lines) = preferred_split(text, font, size, max_width, config)
    {
        return lines;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let mut candidate = current.clone();
        candidate.push(ch);
        // An empty line always accepts the next character, even one wider
        // than the limit; an oversized glyph is clipped, never fatal.
        if current.is_empty() || font.measure(&candidate, size) <= max_width {
            current = candidate;
            i += 1;
            continue;
        }

        let accepted: Vec<char> = current.chars().collect();
        match find_break(&accepted) {
            Some(split) if split > 0 && split < accepted.len() => {
                lines.push(accepted[..split].iter().collect());
                current = accepted[split..].iter().collect();
            }
            _ => {
                lines.push(current.clone());
                current.clear();
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    truncate_lines(lines, font, size, max_width, max_lines, &config.ellipsis)
}

/// Whole-title split at a preferred separator phrase, taken only when both
/// halves fit on their own line.
fn preferred_split(
    text: &str,
    font: &FontStore,
    size: f32,
    max_width: f32,
    config: &TextConfig,
) -> Option<Vec<String>> {
    for separator in &config.preferred_breaks {
        let Some(pos) = text.find(separator.as_str()) else {
            continue;
        };
        let kept = separator.trim_matches([' ', '-']);
        let first = format!("{}{}", &text[..pos], kept);
        let second = text[pos + separator.len()..].trim().to_string();
        if second.is_empty() {
            continue;
        }
        if font.measure(&first, size) <= max_width && font.measure(&second, size) <= max_width {
            return Some(vec![first, second]);
        }
    }
    None
}

/// Searches the accepted characters backward for the best break index
/// (a split position, counted in characters). `None` means break hard at
/// the overflow character.
fn find_break(accepted: &[char]) -> Option<usize> {
    // Rightmost punctuation delimiter, break after it.
    for j in (1..accepted.len()).rev() {
        if DELIMITERS.contains(&accepted[j]) {
            return Some(j + 1);
        }
    }

    // Rightmost particle with a non-trivial remainder after it.
    let mut best: Option<usize> = None;
    for particle in PARTICLES {
        let particle_chars: Vec<char> = particle.chars().collect();
        let len = particle_chars.len();
        if accepted.len() <= len + 1 {
            continue;
        }
        for start in (1..accepted.len() - len).rev() {
            if accepted[start..start + len] == particle_chars[..] {
                let end = start + len;
                if best.is_none_or(|current| end > current) {
                    best = Some(end);
                }
                break;
            }
        }
    }
    if best.is_some() {
        return best;
    }

    // Katakana/other script transition within a small backward window.
    let lo = accepted.len().saturating_sub(SCRIPT_WINDOW).max(1);
    for j in (lo..accepted.len()).rev() {
        if is_katakana(accepted[j - 1]) != is_katakana(accepted[j]) {
            return Some(j);
        }
    }

    None
}

fn is_katakana(ch: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&ch)
}

/// Enforces the line limit. The last kept line is shortened character by
/// character until it plus the ellipsis fits.
fn truncate_lines(
    mut lines: Vec<String>,
    font: &FontStore,
    size: f32,
    max_width: f32,
    max_lines: usize,
    ellipsis: &str,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    let mut last: Vec<char> = lines[max_lines - 1].chars().collect();
    lines.truncate(max_lines - 1);
    loop {
        let candidate: String = last.iter().collect::<String>() + ellipsis;
        if font.measure(&candidate, size) <= max_width || last.len() <= 1 {
            lines.push(candidate);
            return lines;
        }
        last.pop();
    }
}

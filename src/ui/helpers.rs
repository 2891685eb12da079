//! Shared rendering utilities and helpers.
//!
//! Components write whole lines into a `String` frame buffer. This module
//! provides the pieces they share: match highlighting, centered and padded
//! lines, and the screen-clear prefix the driver prints before each frame.
//!
//! All width arithmetic uses character counts, not byte lengths, so titles
//! with accented place names keep their alignment.
//!
//! # Example
//!
//! ```
//! use green_atlas::ui::helpers::push_highlighted_text;
//! use green_atlas::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut out = String::new();
//! push_highlighted_text(&mut out, "Coral reef survey", &[(6, 10)], &theme);
//! assert!(out.starts_with("Coral "));
//! assert!(out.ends_with(" survey"));
//! ```

use crate::ui::theme::Theme;

/// Clears the screen and moves the cursor to the top-left corner.
pub const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Number of characters `text` occupies on screen.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, ending with `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Appends one styled line, padded to `cols` so backgrounds fill the row.
pub fn push_line(out: &mut String, style: &str, text: &str, cols: usize) {
    let text = truncate(text, cols);
    out.push_str(style);
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(display_width(&text))));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends one styled line with `text` centered in `cols`.
///
/// Left padding is the larger half when the space does not divide evenly.
pub fn push_centered(out: &mut String, style: &str, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = display_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    out.push_str(style);
    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Ranges past
/// the end of the text are clipped. Does not append a newline.
pub fn push_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}

/// Removes ANSI escape sequences, leaving only what a reader would see.
#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Roseau", 10), "Roseau");
        assert_eq!(truncate("Soufrière Bay", 8), "Soufr...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn centered_line_pads_both_sides() {
        let mut out = String::new();
        push_centered(&mut out, "", "ab", 7);
        assert_eq!(strip_ansi(&out), "  ab   \n");
    }

    #[test]
    fn highlight_keeps_all_text() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted_text(&mut out, "Blue Reef Study", &[(5, 9), (40, 50)], &theme);
        assert_eq!(strip_ansi(&out), "Blue Reef Study");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }
}

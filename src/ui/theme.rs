//! Theme management and ANSI escape sequence generation.
//!
//! Supports two built-in themes and custom themes loaded from TOML files, and
//! converts hex colors to 24-bit ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `atlas-forest`: Dark green theme (default)
//! - `atlas-daylight`: Light theme for bright terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e8f5e9"
//! header_bg = "#1b5e20"          # optional
//! text_normal = "#dfe6e1"
//! text_dim = "#7f8c84"
//! border = "#2e4a36"
//! search_bar_border = "#66bb6a"
//! match_highlight_fg = "#10231a"
//! match_highlight_bg = "#c5e1a5"
//! link_fg = "#81c784"
//! empty_state_fg = "#a5d6a7"
//! error_fg = "#ef9a9a"
//! level_good = "#66bb6a"
//! level_moderate = "#ffd54f"
//! level_elevated = "#ffb74d"
//! level_severe = "#e57373"
//! level_cool = "#64b5f6"
//! user_fg = "#b3e5fc"
//! bot_fg = "#c8e6c9"
//! ```
//!
//! # Example
//!
//! ```
//! use green_atlas::ui::Theme;
//!
//! let theme = Theme::from_name("atlas-daylight").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.starts_with("\u{1b}[1m"));
//! assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
//! # drop(theme);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{AtlasError, Result};
use crate::ui::viewmodel::Tone;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#dfe6e1"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text (footer, summaries, dates).
    pub text_dim: String,
    pub border: String,

    pub search_bar_border: String,
    /// Search match highlight in article titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub link_fg: String,
    pub empty_state_fg: String,
    pub error_fg: String,

    /// Reading and ranking severity colors.
    pub level_good: String,
    pub level_moderate: String,
    pub level_elevated: String,
    pub level_severe: String,
    pub level_cool: String,

    /// Chat speaker colors.
    pub user_fg: String,
    pub bot_fg: String,
}

impl ThemeColors {
    /// Resolves a semantic tone to a color.
    #[must_use]
    pub fn tone(&self, tone: Tone) -> &str {
        match tone {
            Tone::Normal => &self.text_normal,
            Tone::Muted => &self.text_dim,
            Tone::Good => &self.level_good,
            Tone::Moderate => &self.level_moderate,
            Tone::Elevated => &self.level_elevated,
            Tone::Severe => &self.level_severe,
            Tone::Cool => &self.level_cool,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is not one of the built-in themes.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "atlas-forest" => include_str!("../../themes/atlas-forest.toml"),
            "atlas-daylight" => include_str!("../../themes/atlas-daylight.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Theme`] if the file cannot be read or the TOML
    /// content cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            AtlasError::Theme(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;

        toml::from_str(&contents).map_err(|e| AtlasError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB. Returns white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`atlas-forest`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which would be a packaging bug.
    fn default() -> Self {
        Self::from_name("atlas-forest").expect("built-in atlas-forest theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["atlas-forest", "atlas-daylight"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("catppuccin-mocha").is_none());
    }

    #[test]
    fn malformed_hex_renders_white() {
        assert_eq!(Theme::fg("#12"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("zzzzzz"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let builtin = include_str!("../../themes/atlas-daylight.toml").replace("atlas-daylight", "mine");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(builtin.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.tone(Tone::Severe), "#c62828");
    }

    #[test]
    fn incomplete_theme_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"partial\"\n[colors]\nheader_fg = \"#000000\"\n").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(AtlasError::Theme(_))));
    }
}

//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors, and optional
//! background styling.

use crate::ui::helpers::push_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the header title bar.
///
/// Displays the title centered horizontally with bold styling and theme
/// colors, padded to the full terminal width.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let mut style = String::from(Theme::bold());
    style.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }

    push_centered(out, &style, &header.title, cols);
}

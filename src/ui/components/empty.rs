//! Centered status message renderer.
//!
//! Used for the list area while it loads, when it is empty, and when the
//! request failed.

use crate::ui::helpers::push_centered;
use crate::ui::theme::Theme;

/// Blank lines above the message.
const TOP_MARGIN: usize = 2;

/// Appends a centered message in `color`.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// [left padding] MESSAGE [right padding]
/// [blank line]
/// ```
pub fn render_status_message(out: &mut String, message: &str, color: &str, cols: usize) {
    for _ in 0..TOP_MARGIN {
        out.push('\n');
    }
    push_centered(out, &Theme::fg(color), message, cols);
    out.push('\n');
}

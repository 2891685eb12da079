//! Dashboard section renderer.

use crate::ui::helpers::push_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SectionBody, SectionView};

/// Appends one titled panel per section.
///
/// A section that failed while older data stays visible gets a one-line
/// error note under its title.
pub fn render_sections(out: &mut String, sections: &[SectionView], theme: &Theme, cols: usize) {
    for section in sections {
        let mut title_style = String::from(Theme::bold());
        title_style.push_str(&Theme::fg(&theme.colors.header_fg));
        push_line(out, &title_style, &format!(" {}", section.title), cols);

        if let Some(error) = &section.stale_error {
            push_line(out, &Theme::fg(&theme.colors.error_fg), &format!("   (refresh failed: {error})"), cols);
        }

        match &section.body {
            SectionBody::Loading => {
                let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
                push_line(out, &style, "   Loading...", cols);
            }
            SectionBody::Error(message) => {
                push_line(out, &Theme::fg(&theme.colors.error_fg), &format!("   Error: {message}"), cols);
            }
            SectionBody::Lines(lines) => {
                for line in lines {
                    push_line(out, &Theme::fg(theme.colors.tone(line.tone)), &format!("   {}", line.text), cols);
                }
            }
        }
        out.push('\n');
    }
}

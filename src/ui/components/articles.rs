//! Article list and pager renderers.
//!
//! Each article takes three lines: the title (with search matches
//! highlighted), the summary, and a dim line with the publication date and
//! the article link.

use crate::ui::helpers::{display_width, push_highlighted_text, push_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, PagerInfo};

/// Left indent of every article line.
const INDENT: &str = "  ";

/// Appends all article rows, separated by blank lines.
pub fn render_article_rows(out: &mut String, items: &[DisplayItem], theme: &Theme, cols: usize) {
    for item in items {
        render_article_row(out, item, theme, cols);
    }
}

/// Appends a single article.
///
/// Titles arrive pre-truncated from the view model, with highlight ranges
/// already clipped to the visible part.
fn render_article_row(out: &mut String, item: &DisplayItem, theme: &Theme, cols: usize) {
    out.push_str(INDENT);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    push_highlighted_text(out, &item.title, &item.highlight_ranges, theme);
    out.push_str(Theme::reset());
    out.push('\n');

    push_line(out, &Theme::fg(&theme.colors.text_normal), &format!("{INDENT}{}", item.summary), cols);

    let meta = match &item.published {
        Some(date) => format!("{INDENT}{date}  {}", item.link),
        None => format!("{INDENT}{}", item.link),
    };
    push_line(out, &Theme::fg(&theme.colors.link_fg), &meta, cols);
    out.push('\n');
}

/// Appends the pager line, e.g. `< prev   Page 2 of 3   next >`.
///
/// Unavailable directions are drawn dimmed.
pub fn render_pager(out: &mut String, pager: &PagerInfo, theme: &Theme, cols: usize) {
    let control = |label: &str, enabled: bool| {
        let color = if enabled {
            &theme.colors.text_normal
        } else {
            &theme.colors.text_dim
        };
        format!("{}{label}{}", Theme::fg(color), Theme::reset())
    };

    let plain_width = display_width("< prev") + display_width(&pager.indicator) + display_width("next >") + 6;
    let padding = cols.saturating_sub(plain_width) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(&control("< prev", pager.has_previous));
    out.push_str("   ");
    push_indicator(out, &pager.indicator, theme);
    out.push_str("   ");
    out.push_str(&control("next >", pager.has_next));
    out.push('\n');
}

fn push_indicator(out: &mut String, text: &str, theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(text);
    out.push_str(Theme::reset());
}

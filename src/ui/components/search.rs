//! Search box and filter bar renderers.
//!
//! The search box shows the draft as typed and, when it differs, the term
//! actually applied to the list. The filter bar shows the current category,
//! tag and sort selections, the options on offer, then any refusal notice and
//! inline filter loading errors.

use crate::ui::helpers::{display_width, push_line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterBarInfo, SearchBarInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Appends the 3-line bordered search box.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search: reef   (showing: coral) │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');

    let mut search_text = format!(" Search: {}", search.draft);
    if let Some(applied) = search.applied.as_deref().filter(|applied| *applied != search.draft.trim()) {
        search_text.push_str(&format!("   (showing: {applied})"));
    }
    let search_text = truncate(&search_text, inner_width);
    let padding = inner_width.saturating_sub(display_width(&search_text));

    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&search_text);
    out.push_str(&" ".repeat(padding));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the filter selections, the available options and any filter messages.
pub fn render_filter_bar(out: &mut String, filters: &FilterBarInfo, errors: &[String], theme: &Theme, cols: usize) {
    let text = format!(
        "  Category: {}   Tag: {}   Sort: {}",
        filters.category, filters.tag, filters.sort
    );
    push_line(out, &Theme::fg(&theme.colors.text_normal), &text, cols);

    let dim = Theme::fg(&theme.colors.text_dim);
    for (label, names) in [("Categories", &filters.categories), ("Tags", &filters.tags)] {
        let line = format!("  {label}: {}", option_list(names, filters.options_loading));
        push_line(out, &dim, &line, cols);
    }

    if let Some(notice) = &filters.notice {
        push_line(out, &Theme::fg(&theme.colors.error_fg), &format!("  {notice}"), cols);
    }
    for error in errors {
        push_line(out, &Theme::fg(&theme.colors.error_fg), &format!("  {error}"), cols);
    }
}

fn option_list(names: &[String], loading: bool) -> String {
    if loading {
        "(loading...)".to_string()
    } else if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

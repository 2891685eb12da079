//! Composable UI component renderers.
//!
//! Each component appends complete lines to a frame buffer. The layout
//! functions here stack them for each view.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Command help line
//! - [`search`]: Search box and filter bar
//! - [`articles`]: Article rows and pager
//! - [`empty`]: Centered loading, empty and error messages
//! - [`dashboard`]: Dashboard section panels
//! - [`chat`]: Chat transcript
//! - [`map`]: Map layer summary
//!
//! # Layout Modes
//!
//! - [`render_magazine_mode`]: Header + Search + Filters + Articles + Pager + Footer
//! - [`render_dashboard_mode`]: Header + Sections + Footer
//! - [`render_chat_mode`]: Header + Transcript + Footer
//! - [`render_map_mode`]: Header + Layers + Footer

mod articles;
mod chat;
mod dashboard;
mod empty;
mod footer;
mod header;
mod map;
mod search;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ChatView, DashboardView, FooterInfo, HeaderInfo, ListBody, MagazineView, MapView};

use articles::{render_article_rows, render_pager};
use chat::render_transcript;
use dashboard::render_sections;
use empty::render_status_message;
use footer::render_footer;
use header::render_header;
use map::render_layers;
use search::{render_filter_bar, render_search_bar};

/// Appends a horizontal border line separating UI sections.
fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

fn render_top(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    out.push('\n');
    render_header(out, header, theme, cols);
    render_border(out, &theme.colors.border, cols);
}

fn render_bottom(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    render_border(out, &theme.colors.border, cols);
    render_footer(out, footer, theme, cols);
}

/// Renders the magazine layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Box - 3 lines]
/// [Filter Bar]
/// [Filter Errors]
/// [Articles | Loading | Empty | Error]
/// [Pager]
/// [Border]
/// [Footer]
/// ```
pub fn render_magazine_mode(
    out: &mut String,
    header: &HeaderInfo,
    view: &MagazineView,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) {
    render_top(out, header, theme, cols);
    render_search_bar(out, &view.search_bar, theme, cols);
    render_filter_bar(out, &view.filter_bar, &view.filter_errors, theme, cols);
    out.push('\n');

    match &view.list {
        ListBody::Loading => render_status_message(out, "Loading articles...", &theme.colors.text_dim, cols),
        ListBody::Error(message) => render_status_message(out, message, &theme.colors.error_fg, cols),
        ListBody::Empty(message) => render_status_message(out, message, &theme.colors.empty_state_fg, cols),
        ListBody::Items(items) => render_article_rows(out, items, theme, cols),
    }

    if let Some(pager) = &view.pager {
        render_pager(out, pager, theme, cols);
    }

    render_bottom(out, footer, theme, cols);
}

/// Renders the dashboard layout: Header, one panel per section, Footer.
pub fn render_dashboard_mode(
    out: &mut String,
    header: &HeaderInfo,
    view: &DashboardView,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) {
    render_top(out, header, theme, cols);
    render_sections(out, &view.sections, theme, cols);
    render_bottom(out, footer, theme, cols);
}

/// Renders the chat layout: Header, transcript, Footer.
pub fn render_chat_mode(
    out: &mut String,
    header: &HeaderInfo,
    view: &ChatView,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) {
    render_top(out, header, theme, cols);
    render_transcript(out, view, theme, cols);
    out.push('\n');
    render_bottom(out, footer, theme, cols);
}

/// Renders the map layout: Header, layer status, Footer.
pub fn render_map_mode(
    out: &mut String,
    header: &HeaderInfo,
    view: &MapView,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) {
    render_top(out, header, theme, cols);
    render_layers(out, view, theme, cols);
    out.push('\n');
    render_bottom(out, footer, theme, cols);
}

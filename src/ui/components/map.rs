//! Map layer renderer.
//!
//! A terminal cannot draw the overlays, so each loaded layer is listed with
//! its feature count.

use super::empty::render_status_message;
use crate::ui::helpers::push_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MapBody, MapView};

pub fn render_layers(out: &mut String, view: &MapView, theme: &Theme, cols: usize) {
    match &view.body {
        MapBody::Loading => render_status_message(out, "Loading map data...", &theme.colors.text_dim, cols),
        MapBody::Error(message) => render_status_message(
            out,
            &format!("Error loading map data: {message}"),
            &theme.colors.error_fg,
            cols,
        ),
        MapBody::Empty => render_status_message(out, "No map data to display.", &theme.colors.empty_state_fg, cols),
        MapBody::Layers(layers) => {
            out.push('\n');
            let style = Theme::fg(&theme.colors.text_normal);
            for layer in layers {
                let noun = if layer.features == 1 { "feature" } else { "features" };
                push_line(out, &style, &format!("  [x] {}: {} {noun}", layer.name, layer.features), cols);
            }
        }
    }
}

//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the layout for the active screen
//!
//! Frames are returned as strings. The driver decides when to print them.
//!
//! # Example
//!
//! ```
//! use green_atlas::app::AppState;
//! use green_atlas::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default());
//! let frame = render(&state, 80);
//! assert!(frame.contains("Green Atlas Magazine"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Screen, UIViewModel};

/// Narrowest layout the components are drawn for.
const MIN_COLS: usize = 40;

/// Renders the current state into an ANSI-styled frame `cols` characters wide.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let cols = cols.max(MIN_COLS);
    let viewmodel = state.compute_viewmodel(cols);

    render_viewmodel(&viewmodel, &state.theme, cols)
}

/// Renders a pre-computed view model with the layout for its screen.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    match &vm.screen {
        Screen::Magazine(view) => components::render_magazine_mode(&mut out, &vm.header, view, &vm.footer, theme, cols),
        Screen::Dashboard(view) => {
            components::render_dashboard_mode(&mut out, &vm.header, view, &vm.footer, theme, cols);
        }
        Screen::Chat(view) => components::render_chat_mode(&mut out, &vm.header, view, &vm.footer, theme, cols),
        Screen::Map(view) => components::render_map_mode(&mut out, &vm.header, view, &vm.footer, theme, cols),
    }

    out
}

//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled frames through composable
//! rendering components, with theme support and search match highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    ChatLine, ChatView, DashboardView, DisplayItem, FilterBarInfo, FooterInfo, HeaderInfo, LayerSummary, ListBody,
    MagazineView, MapBody, MapView, PagerInfo, Screen, SearchBarInfo, SectionBody, SectionView, Tone, ToneLine,
    UIViewModel,
};

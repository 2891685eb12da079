//! View and load-status state types for the application.
//!
//! # State Machine
//!
//! The application shows one of four views at a time:
//! - **Magazine**: the article list with search, filters, sort and paging
//! - **Dashboard**: live metrics, predictions, rankings and the campaign banner
//! - **Chat**: the assistant conversation
//! - **Map**: the KMZ map overlays
//!
//! The magazine list itself moves through [`ListStatus`], and its filter
//! options through [`FilterStatus`].

/// Which view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Article list. Entering mounts the list controller, leaving unmounts it.
    #[default]
    Magazine,

    /// Environmental dashboard. Live data is polled only while shown.
    Dashboard,

    /// Chat conversation. The history survives view switches.
    Chat,

    /// Map overlays, reloaded each time the view is shown.
    Map,
}

/// Lifecycle of the article list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A request is in flight, or queued behind the filter loader.
    Loading,

    /// The latest request succeeded; the page may be empty.
    Loaded,

    /// The latest request failed with this user-visible message.
    Failed(String),
}

/// Whether the category and tag lists have finished loading.
///
/// The first list fetch of a mount is held back until this is `Ready`,
/// whether the filter requests succeeded or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterStatus {
    #[default]
    Pending,
    Ready,
}

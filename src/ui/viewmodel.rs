//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready text plus the few flags the renderer
//! needs for styling.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub screen: Screen,
    pub footer: FooterInfo,
}

/// The body of the frame, one variant per view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Magazine(MagazineView),
    Dashboard(DashboardView),
    Chat(ChatView),
    Map(MapView),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}

/// Magazine list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagazineView {
    pub search_bar: SearchBarInfo,
    pub filter_bar: FilterBarInfo,

    /// Inline filter loading errors, already prefixed for display.
    pub filter_errors: Vec<String>,

    pub list: ListBody,

    /// Present only when there is more than one page.
    pub pager: Option<PagerInfo>,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed.
    pub draft: String,
    /// Term currently applied to the list, if any.
    pub applied: Option<String>,
}

/// Current selections of the category, tag and sort controls, and the
/// options a selection can be made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub category: String,
    pub tag: String,
    pub sort: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// Options have not arrived yet; both selectors are disabled.
    pub options_loading: bool,
    /// Why the last selection was refused.
    pub notice: Option<String>,
}

/// What occupies the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    /// The exact message of the failed request.
    Error(String),
    /// No results; the message depends on whether filters are active.
    Empty(String),
    Items(Vec<DisplayItem>),
}

/// Display information for a single article row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub summary: String,
    pub published: Option<String>,
    pub link: String,

    /// Character ranges of the title to highlight (search matches).
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Page navigation controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    /// e.g. `"Page 1 of 3"`.
    pub indicator: String,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Dashboard view: one panel per section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub body: SectionBody,
    /// Error from a refresh that failed while older data stays visible.
    pub stale_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Loading,
    Error(String),
    Lines(Vec<ToneLine>),
}

/// Semantic color of a line; the theme decides the actual color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Muted,
    Good,
    Moderate,
    Elevated,
    Severe,
    Cool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneLine {
    pub text: String,
    pub tone: Tone,
}

impl ToneLine {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub lines: Vec<ChatLine>,
    /// Whether a reply is still outstanding.
    pub typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub from_user: bool,
    pub text: String,
}

/// Map view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapView {
    pub body: MapBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapBody {
    Loading,
    /// Every layer failure, joined with `"; "`.
    Error(String),
    /// Loading finished without a single usable layer.
    Empty,
    Layers(Vec<LayerSummary>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSummary {
    pub name: String,
    pub features: usize,
}

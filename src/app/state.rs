//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of all view state: the magazine list
//! controller, the dashboard sections, the chat conversation, the map layers,
//! which view is on screen and the theme. The event handler mutates it; `compute_viewmodel`
//! turns a snapshot of it into something the renderer can draw.

use fuzzy_matcher::skim::SkimMatcherV2;

use super::chat::ChatState;
use super::dashboard::{DashboardState, SectionSlot};
use super::magazine::MagazineState;
use super::map::{LayerStatus, MapState};
use super::modes::{FilterStatus, ListStatus, ViewMode};
use super::pagination;
use crate::api::DashboardSection;
use crate::domain::dashboard::{Level, PredictionIcon, ScoreBand};
use crate::domain::{Article, Sender};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ChatLine, ChatView, DashboardView, DisplayItem, FilterBarInfo, FooterInfo, HeaderInfo, LayerSummary, ListBody,
    MagazineView, MapBody, MapView, PagerInfo, Screen, SearchBarInfo, SectionBody, SectionView, Tone, ToneLine,
    UIViewModel,
};

/// Shown when the list is empty and a search, category or tag is applied.
pub const NO_MATCHES_MESSAGE: &str = "No articles found matching your criteria.";

/// Shown when the list is empty and nothing is filtered.
pub const NO_ARTICLES_MESSAGE: &str = "No articles published yet. Check back soon!";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub magazine: MagazineState,
    pub dashboard: DashboardState,
    pub chat: ChatState,
    pub map: MapState,

    /// View currently on screen.
    pub view_mode: ViewMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates state with nothing mounted yet.
    ///
    /// The runtime sends `Event::ShowMagazine` at startup to mount the list.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            magazine: MagazineState::new(),
            dashboard: DashboardState::new(),
            chat: ChatState::new(),
            map: MapState::new(),
            view_mode: ViewMode::Magazine,
            theme,
        }
    }

    /// Computes a renderable view model for a terminal `cols` characters wide.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        let screen = match self.view_mode {
            ViewMode::Magazine => Screen::Magazine(self.compute_magazine(cols)),
            ViewMode::Dashboard => Screen::Dashboard(self.compute_dashboard()),
            ViewMode::Chat => Screen::Chat(self.compute_chat()),
            ViewMode::Map => Screen::Map(self.compute_map()),
        };

        UIViewModel {
            header: self.compute_header(),
            screen,
            footer: self.compute_footer(),
        }
    }

    fn compute_magazine(&self, cols: usize) -> MagazineView {
        let magazine = &self.magazine;
        let query = magazine.query();

        let list = match &magazine.list_status {
            ListStatus::Idle | ListStatus::Loading => ListBody::Loading,
            ListStatus::Failed(message) => ListBody::Error(message.clone()),
            ListStatus::Loaded if magazine.page.is_empty() => {
                let message = if query.has_active_filters() {
                    NO_MATCHES_MESSAGE
                } else {
                    NO_ARTICLES_MESSAGE
                };
                ListBody::Empty(message.to_string())
            }
            ListStatus::Loaded => {
                let matcher = (!query.search_term().is_empty()).then(SkimMatcherV2::default);
                ListBody::Items(
                    magazine
                        .page
                        .items
                        .iter()
                        .map(|article| compute_display_item(article, query.search_term(), cols, matcher.as_ref()))
                        .collect(),
                )
            }
        };

        // Controls stay hidden while a replacement page is loading or after a failure.
        let total_pages = magazine.page.total_pages;
        let pager = (matches!(magazine.list_status, ListStatus::Loaded) && pagination::is_visible(total_pages))
            .then(|| PagerInfo {
                indicator: pagination::indicator(query.page_index(), total_pages),
                has_previous: pagination::previous(query.page_index()).is_some(),
                has_next: pagination::next(query.page_index(), total_pages).is_some(),
            });

        MagazineView {
            search_bar: SearchBarInfo {
                draft: magazine.search_draft.clone(),
                applied: Some(query.search_term().to_string()).filter(|s| !s.is_empty()),
            },
            filter_bar: FilterBarInfo {
                category: query.category_name().unwrap_or("All Categories").to_string(),
                tag: query.tag_name().unwrap_or("All Tags").to_string(),
                sort: query.sort().label().to_string(),
                categories: magazine.categories.iter().map(|o| o.name.clone()).collect(),
                tags: magazine.tags.iter().map(|o| o.name.clone()).collect(),
                options_loading: magazine.filter_status == FilterStatus::Pending,
                notice: magazine.notice.clone(),
            },
            filter_errors: magazine
                .filter_errors
                .iter()
                .map(|e| format!("Error loading filters: {e}"))
                .collect(),
            list,
            pager,
        }
    }

    fn compute_dashboard(&self) -> DashboardView {
        let dashboard = &self.dashboard;
        let sections = DashboardSection::ALL
            .into_iter()
            .map(|section| {
                let title = section.title().to_string();
                match section {
                    DashboardSection::LiveData => section_view(title, &dashboard.live_data, |metrics| {
                        if metrics.is_empty() {
                            return vec![ToneLine::new("No live data available at the moment.", Tone::Muted)];
                        }
                        metrics
                            .iter()
                            .map(|m| {
                                ToneLine::new(
                                    format!("{}: {} {} ({})", m.name, m.value, m.unit, m.details),
                                    level_tone(m.level),
                                )
                            })
                            .collect()
                    }),
                    DashboardSection::Predictions => section_view(title, &dashboard.predictions, |items| {
                        if items.is_empty() {
                            return vec![ToneLine::new("No predictions available.", Tone::Muted)];
                        }
                        items
                            .iter()
                            .flat_map(|p| {
                                let marker = match p.icon {
                                    PredictionIcon::Alert => '!',
                                    PredictionIcon::Chart => '#',
                                };
                                [
                                    ToneLine::new(
                                        format!("[{marker}] {} - {} ({})", p.kind, p.location, p.timeframe),
                                        Tone::Normal,
                                    ),
                                    ToneLine::new(format!("    {}", p.prediction), Tone::Moderate),
                                    ToneLine::new(
                                        format!("    {} Confidence: {}", p.details, p.confidence),
                                        Tone::Muted,
                                    ),
                                ]
                            })
                            .collect()
                    }),
                    DashboardSection::Rankings => section_view(title, &dashboard.rankings, |rows| {
                        if rows.is_empty() {
                            return vec![ToneLine::new("No ranking data available.", Tone::Muted)];
                        }
                        rows.iter()
                            .map(|r| {
                                let tone = match r.band {
                                    ScoreBand::Poor => Tone::Severe,
                                    ScoreBand::Fair => Tone::Moderate,
                                    ScoreBand::Good => Tone::Good,
                                };
                                ToneLine::new(
                                    format!(
                                        "{}. {} {}  {}  Score: {}",
                                        r.position,
                                        r.name,
                                        r.trend.arrow(),
                                        score_bar(r.score),
                                        r.raw_score
                                    ),
                                    tone,
                                )
                            })
                            .collect()
                    }),
                    DashboardSection::Banner => section_view(title, &dashboard.banner, |banner| {
                        vec![
                            ToneLine::new(banner.headline.clone(), Tone::Good),
                            ToneLine::new(banner.description.clone(), Tone::Normal),
                            ToneLine::new(format!("{} -> {}", banner.cta_text, banner.cta_link), Tone::Muted),
                        ]
                    }),
                }
            })
            .collect();

        DashboardView { sections }
    }

    fn compute_chat(&self) -> ChatView {
        ChatView {
            lines: self
                .chat
                .messages
                .iter()
                .map(|m| ChatLine {
                    from_user: m.sender == Sender::User,
                    text: m.text.clone(),
                })
                .collect(),
            typing: self.chat.awaiting > 0,
        }
    }

    /// Any layer error replaces the whole view, even if other layers loaded.
    fn compute_map(&self) -> MapView {
        let body = match &self.map.status {
            LayerStatus::Idle | LayerStatus::Loading => MapBody::Loading,
            LayerStatus::Loaded(set) => match set.error_message() {
                Some(message) => MapBody::Error(message),
                None if set.layers.is_empty() => MapBody::Empty,
                None => MapBody::Layers(
                    set.layers
                        .iter()
                        .map(|layer| LayerSummary {
                            name: layer.name.clone(),
                            features: layer.feature_count(),
                        })
                        .collect(),
                ),
            },
        };
        MapView { body }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Magazine => {
                let elements = self.magazine.page.total_elements;
                if matches!(self.magazine.list_status, ListStatus::Loaded) {
                    format!(" Green Atlas Magazine ({elements}) ")
                } else {
                    " Green Atlas Magazine ".to_string()
                }
            }
            ViewMode::Dashboard => " Dominica: Current Environmental Snapshot ".to_string(),
            ViewMode::Chat => " Green Atlas Assistant ".to_string(),
            ViewMode::Map => " Live Environmental Data Map ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view_mode {
            ViewMode::Magazine => {
                "search <text>  clear  clear-all  category <name|->  tag <name|->  sort <field,dir>  next  prev  dashboard  chat  map  quit"
            }
            ViewMode::Dashboard => "refresh  magazine  chat  map  quit",
            ViewMode::Chat => "say <text>  magazine  dashboard  map  quit",
            ViewMode::Map => "map  magazine  dashboard  chat  quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn section_view<T, F>(title: String, slot: &SectionSlot<T>, lines: F) -> SectionView
where
    F: FnOnce(&T) -> Vec<ToneLine>,
{
    match (&slot.data, &slot.error) {
        (Some(data), error) => SectionView {
            title,
            body: SectionBody::Lines(lines(data)),
            stale_error: error.clone(),
        },
        (None, Some(error)) if !slot.loading => SectionView {
            title,
            body: SectionBody::Error(error.clone()),
            stale_error: None,
        },
        _ => SectionView {
            title,
            body: SectionBody::Loading,
            stale_error: None,
        },
    }
}

const fn level_tone(level: Level) -> Tone {
    match level {
        Level::Good => Tone::Good,
        Level::Moderate => Tone::Moderate,
        Level::Elevated => Tone::Elevated,
        Level::Severe => Tone::Severe,
        Level::Cool => Tone::Cool,
    }
}

/// Ten-cell bar for a 0..=100 score.
fn score_bar(score: f64) -> String {
    let filled = ((score / 10.0).round() as usize).min(10);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Builds one article row, truncating the title to fit and computing the
/// highlight ranges of the applied search term.
fn compute_display_item(article: &Article, search_term: &str, cols: usize, matcher: Option<&SkimMatcherV2>) -> DisplayItem {
    const MIN_TITLE_WIDTH: usize = 20;
    const ROW_MARGIN: usize = 4;

    let max_title = cols.saturating_sub(ROW_MARGIN).max(MIN_TITLE_WIDTH);
    let title_chars = article.title.chars().count();
    let (title, visible_chars) = if title_chars > max_title {
        let keep = max_title - 3;
        (format!("{}...", article.title.chars().take(keep).collect::<String>()), keep)
    } else {
        (article.title.clone(), title_chars)
    };

    let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
        compute_highlight_ranges(&article.title, search_term, m)
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect()
    });

    DisplayItem {
        title,
        summary: article.summary_or_default().to_string(),
        published: article.published_on(),
        link: article.link(),
        highlight_ranges,
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, pattern: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

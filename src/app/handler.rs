//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user commands,
//! timer ticks and API responses, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the runtime (user input, timers, finished requests)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via the view state methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Magazine**: search, filter, sort and paging commands
//! - **Navigation**: `ShowMagazine`, `ShowDashboard`, `ShowChat`, `ShowMap`, `Quit`
//! - **Dashboard**: `RefreshDashboard`, `PollLiveData`
//! - **Chat**: `SendChat`
//! - **API**: `ApiResponse` with typed response variants
//!
//! # Example
//!
//! ```
//! use green_atlas::app::{handle_event, Action, AppState, Event};
//! use green_atlas::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::ShowMagazine)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Dispatch(_)));
//! # Ok::<(), green_atlas::AtlasError>(())
//! ```

use super::modes::ViewMode;
use crate::api::{ApiRequest, ApiResponse, DashboardSection};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::SortKey;

/// Events triggered by user input, timers or completed API requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Replaces the search draft without applying it.
    SearchInput(String),
    /// Applies the search draft to the list.
    SubmitSearch,
    /// Clears the draft and the applied search.
    ClearSearch,
    /// Clears search, category and tag together.
    ClearAll,
    /// Selects a category by name, `None` for all categories.
    SelectCategory(Option<String>),
    /// Selects a tag by name, `None` for all tags.
    SelectTag(Option<String>),
    SelectSort(SortKey),
    PreviousPage,
    NextPage,

    /// Shows the article list, mounting it if needed.
    ShowMagazine,
    /// Shows the dashboard, loading every section the first time.
    ShowDashboard,
    ShowChat,
    /// Shows the map and reloads its layers.
    ShowMap,

    /// Reloads every dashboard section.
    RefreshDashboard,
    /// Timer tick for the live-data poll. Ignored unless the dashboard is shown.
    PollLiveData,

    /// Sends a chat message.
    SendChat(String),

    /// Exits the driver.
    Quit,

    /// Wraps a completed API request.
    ApiResponse(ApiResponse),
}

fn dispatch(request: Option<ApiRequest>) -> (bool, Vec<Action>) {
    (true, request.map(Action::Dispatch).into_iter().collect())
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A `(render, actions)` pair: whether the view changed and needs redrawing,
/// and the side effects to run in order.
///
/// # Errors
///
/// Reserved for state transitions that cannot be completed; none of the
/// current events fail.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchInput(text) => {
            state.magazine.set_search_draft(text);
            Ok((true, vec![]))
        }
        Event::SubmitSearch => Ok(dispatch(state.magazine.submit_search())),
        Event::ClearSearch => Ok(dispatch(state.magazine.clear_search())),
        Event::ClearAll => Ok(dispatch(state.magazine.clear_all())),
        Event::SelectCategory(name) => Ok(dispatch(state.magazine.select_category(name.as_deref()))),
        Event::SelectTag(name) => Ok(dispatch(state.magazine.select_tag(name.as_deref()))),
        Event::SelectSort(sort) => Ok(dispatch(state.magazine.select_sort(*sort))),
        Event::PreviousPage => {
            let request = state.magazine.previous_page();
            if request.is_none() {
                tracing::debug!("already on first page");
                return Ok((false, vec![]));
            }
            Ok(dispatch(request))
        }
        Event::NextPage => {
            let request = state.magazine.next_page();
            if request.is_none() {
                tracing::debug!("already on last page");
                return Ok((false, vec![]));
            }
            Ok(dispatch(request))
        }

        Event::ShowMagazine => {
            state.view_mode = ViewMode::Magazine;
            Ok(dispatch(state.magazine.mount()))
        }
        Event::ShowDashboard => {
            let mut actions = leave_magazine(state);
            state.view_mode = ViewMode::Dashboard;
            if !state.dashboard.is_started() {
                actions.extend(state.dashboard.refresh_all().into_iter().map(Action::Dispatch));
            }
            Ok((true, actions))
        }
        Event::ShowChat => {
            let actions = leave_magazine(state);
            state.view_mode = ViewMode::Chat;
            Ok((true, actions))
        }
        Event::ShowMap => {
            let mut actions = leave_magazine(state);
            state.view_mode = ViewMode::Map;
            actions.extend(state.map.load().map(Action::Dispatch));
            Ok((true, actions))
        }

        Event::RefreshDashboard => {
            if state.view_mode != ViewMode::Dashboard {
                return Ok((false, vec![]));
            }
            let actions = state.dashboard.refresh_all().into_iter().map(Action::Dispatch).collect();
            Ok((true, actions))
        }
        Event::PollLiveData => {
            if state.view_mode != ViewMode::Dashboard {
                return Ok((false, vec![]));
            }
            tracing::debug!("polling live data");
            let request = state.dashboard.refresh(DashboardSection::LiveData);
            Ok((false, vec![Action::Dispatch(request)]))
        }

        Event::SendChat(text) => {
            let Some(request) = state.chat.send(text) else {
                tracing::debug!("ignoring blank chat message");
                return Ok((false, vec![]));
            };
            Ok((state.view_mode == ViewMode::Chat, vec![Action::Dispatch(request)]))
        }

        Event::Quit => {
            state.magazine.unmount();
            Ok((false, vec![Action::CancelPending, Action::Quit]))
        }

        Event::ApiResponse(response) => Ok(handle_response(state, response)),
    }
}

/// Unmounts the list when navigating away from it.
fn leave_magazine(state: &mut AppState) -> Vec<Action> {
    if state.magazine.is_mounted() {
        state.magazine.unmount();
        vec![Action::CancelPending]
    } else {
        vec![]
    }
}

fn handle_response(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    match response {
        ApiResponse::FiltersLoaded {
            generation,
            categories,
            tags,
        } => {
            let request = state
                .magazine
                .apply_filters(*generation, categories.clone(), tags.clone());
            let visible = state.view_mode == ViewMode::Magazine;
            (visible, request.map(Action::Dispatch).into_iter().collect())
        }
        ApiResponse::ArticlesLoaded { generation, page } => {
            let applied = state.magazine.apply_page(*generation, page.clone());
            (applied && state.view_mode == ViewMode::Magazine, vec![])
        }
        ApiResponse::ArticlesFailed { generation, message } => {
            let applied = state.magazine.apply_failure(*generation, message);
            if applied {
                tracing::warn!(error = %message, "article list failed to load");
            }
            (applied && state.view_mode == ViewMode::Magazine, vec![])
        }
        ApiResponse::SectionLoaded(snapshot) => {
            state.dashboard.apply_snapshot(snapshot.clone());
            (state.view_mode == ViewMode::Dashboard, vec![])
        }
        ApiResponse::SectionFailed { section, message } => {
            tracing::warn!(section = ?section, error = %message, "dashboard section failed to load");
            state.dashboard.apply_failure(*section, message);
            (state.view_mode == ViewMode::Dashboard, vec![])
        }
        ApiResponse::ChatReplied { text } => {
            state.chat.receive_reply(text);
            (state.view_mode == ViewMode::Chat, vec![])
        }
        ApiResponse::ChatFailed { message } => {
            tracing::warn!(error = %message, "chat request failed");
            state.chat.receive_failure(message);
            (state.view_mode == ViewMode::Chat, vec![])
        }
        ApiResponse::LayersLoaded(layers) => {
            state.map.apply(layers.clone());
            (state.view_mode == ViewMode::Map, vec![])
        }
    }
}

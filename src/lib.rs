//! Green Atlas: client core for an environmental-monitoring API.
//!
//! Green Atlas browses a paginated magazine of articles (search, category and
//! tag filters, ordering), shows a dashboard of live readings, predictions,
//! regional rankings and a campaign banner, relays questions to a chat
//! assistant and loads KMZ map overlays as GeoJSON. The crate provides:
//! - A list query model whose page resets whenever any other part changes
//! - A fetcher that only ever applies the response to the latest request
//! - Independent filter option loading with inline errors
//! - Typed endpoint methods over a swappable HTTP transport
//! - A terminal renderer and a line-oriented driver

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Driver (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Stale-response guard                             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                      │
//! ┌───────────────────────┐          ┌───────────────────────┐
//! │ UI Layer (ui/)        │          │ API Layer (api/)      │
//! │ - Rendering           │          │ - Request building    │
//! │ - Theming             │          │ - Transport + client  │
//! │ - Components          │          │ - Dispatcher          │
//! └───────────────────────┘          └───────────────────────┘
//!         │                                      │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Query, page, article, dashboard, chat models     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - JSON-lines span export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Endpoint client, transport seam and request dispatcher
//! - [`domain`]: Core domain types and normalization
//! - [`infrastructure`]: Data directory and path helpers
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! From a TOML file:
//!
//! ```toml
//! api_url = "https://atlas.example.org"
//! page_size = 6
//! request_timeout_secs = 15
//! live_data_refresh_secs = 30
//! theme = "atlas-daylight"
//! trace_level = "debug"
//! ```
//!
//! or from `GREEN_ATLAS_API_URL`, `GREEN_ATLAS_PAGE_SIZE`, ... environment
//! variables (see [`Config::from_env`]).
//!
//! # Example
//!
//! ```
//! use green_atlas::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::ShowMagazine)?;
//! for action in actions {
//!     if let Action::Dispatch(request) = action {
//!         // hand `request` to an `ApiDispatcher` on a background task
//!         # drop(request);
//!     }
//! }
//! # Ok::<(), green_atlas::AtlasError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{AtlasError, Result};
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use domain::DEFAULT_PAGE_SIZE;

/// Prefix of the environment variables read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "GREEN_ATLAS_";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LIVE_REFRESH_SECS: u64 = 30;

/// Client configuration.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use green_atlas::Config;
///
/// let mut map = BTreeMap::new();
/// map.insert("api_url".to_string(), "https://atlas.example.org".to_string());
/// map.insert("page_size".to_string(), "not-a-number".to_string());
///
/// let config = Config::from_map(&map);
/// assert_eq!(config.api_url, "https://atlas.example.org");
/// assert_eq!(config.page_size, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the `/api/...` paths are joined to. Default: `http://localhost:8080`
    pub api_url: String,

    /// Articles per page. Default: 6
    pub page_size: usize,

    /// Per-request timeout. Default: 15
    pub request_timeout_secs: u64,

    /// Live-data poll period while the dashboard is shown. Default: 30
    pub live_data_refresh_secs: u64,

    /// Built-in theme name: `atlas-forest` or `atlas-daylight`.
    /// Ignored if `theme_file` is set.
    #[serde(alias = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            live_data_refresh_secs: DEFAULT_LIVE_REFRESH_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// # Parsing Rules
    ///
    /// - `api_url`: trimmed; blank falls back to the default
    /// - `page_size`, `request_timeout_secs`, `live_data_refresh_secs`:
    ///   positive integers; anything else falls back to the default
    /// - `theme` / `theme_name`, `theme_file`, `trace_level`: blank means unset
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            api_url: text("api_url").unwrap_or(defaults.api_url),
            page_size: positive(config.get("page_size")).unwrap_or(defaults.page_size),
            request_timeout_secs: positive(config.get("request_timeout_secs"))
                .unwrap_or(defaults.request_timeout_secs),
            live_data_refresh_secs: positive(config.get("live_data_refresh_secs"))
                .unwrap_or(defaults.live_data_refresh_secs),
            theme_name: text("theme").or_else(|| text("theme_name")),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Builds a configuration from `GREEN_ATLAS_*` environment variables.
    ///
    /// `GREEN_ATLAS_API_URL` maps to `api_url`, `GREEN_ATLAS_THEME` to
    /// `theme`, and so on.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let map = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Loads a configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AtlasError::Config(format!("failed to read {}: {e}", path.display())))?;
        let mut config: Self =
            toml::from_str(&contents).map_err(|e| AtlasError::Config(format!("invalid config file: {e}")))?;

        let defaults = Self::default();
        if config.page_size == 0 {
            config.page_size = defaults.page_size;
        }
        if config.request_timeout_secs == 0 {
            config.request_timeout_secs = defaults.request_timeout_secs;
        }
        if config.live_data_refresh_secs == 0 {
            config.live_data_refresh_secs = defaults.live_data_refresh_secs;
        }
        Ok(config)
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    ///
    /// Load failures are logged and fall back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn positive<T: std::str::FromStr + Default + PartialEq>(value: Option<&String>) -> Option<T> {
    value
        .and_then(|s| s.trim().parse::<T>().ok())
        .filter(|v| *v != T::default())
}

/// Creates application state for the given configuration.
///
/// Nothing is mounted yet: the driver sends `Event::ShowMagazine` to start.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "initializing green atlas");
    AppState::new(config.load_theme())
}

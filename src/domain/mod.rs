//! Domain layer for the Green Atlas client.
//!
//! Plain data types and normalization rules, independent of HTTP, terminal
//! rendering or the async runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: The list query (search, filters, sort, page)
//! - [`page`]: Paginated result envelope
//! - [`article`]: Articles and category/tag filter options
//! - [`dashboard`]: Live metrics, predictions, rankings and the campaign banner
//! - [`chat`]: Chat messages and reply normalization
//! - [`layers`]: KMZ map overlays converted to GeoJSON
//!
//! # Examples
//!
//! ```
//! use green_atlas::domain::{ListQuery, SortKey};
//!
//! let mut query = ListQuery::new();
//! query.set_page_index(2);
//! query.set_sort("title,asc".parse::<SortKey>().unwrap());
//! assert_eq!(query.page_index(), 0);
//! ```

pub mod article;
pub mod chat;
pub mod dashboard;
pub mod error;
pub mod layers;
pub mod page;
pub mod query;

pub use article::{Article, FilterOption};
pub use chat::{ChatMessage, Sender};
pub use dashboard::{CampaignBanner, LiveMetric, Prediction, RegionRanking};
pub use error::{AtlasError, Result};
pub use layers::{LayerSet, LayerSource, MapLayer, KMZ_LAYERS};
pub use page::ListPage;
pub use query::{ListQuery, SortDirection, SortField, SortKey, DEFAULT_PAGE_SIZE, SORT_OPTIONS};

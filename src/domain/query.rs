//! List query model for the magazine view.
//!
//! A [`ListQuery`] holds everything the paginated article endpoint needs: the
//! applied search term, the optional category and tag filters, the sort key and
//! the zero-based page index. Mutators enforce the one invariant that matters to
//! callers: touching any field other than the page index sends the query back to
//! the first page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AtlasError;

/// Number of articles requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Field the article list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortField {
    /// Publication timestamp.
    #[default]
    CreatedAt,
    /// Article title.
    Title,
}

impl SortField {
    /// Wire name used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Title => "title",
        }
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortDirection {
    /// Wire name used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A complete sort specification, rendered on the wire as `"<field>,<direction>"`.
///
/// There is no unsorted state: the default is newest first (`createdAt,desc`).
///
/// # Examples
///
/// ```
/// use green_atlas::domain::SortKey;
///
/// let key: SortKey = "title,asc".parse().unwrap();
/// assert_eq!(key.to_string(), "title,asc");
/// assert_eq!(SortKey::default().to_string(), "createdAt,desc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Human-readable label shown in the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::CreatedAt, SortDirection::Desc) => "Most Recent",
            (SortField::CreatedAt, SortDirection::Asc) => "Oldest",
            (SortField::Title, SortDirection::Asc) => "Title A-Z",
            (SortField::Title, SortDirection::Desc) => "Title Z-A",
        }
    }
}

/// The orderings offered by the sort selector, in display order.
pub const SORT_OPTIONS: [SortKey; 4] = [
    SortKey::new(SortField::CreatedAt, SortDirection::Desc),
    SortKey::new(SortField::CreatedAt, SortDirection::Asc),
    SortKey::new(SortField::Title, SortDirection::Asc),
    SortKey::new(SortField::Title, SortDirection::Desc),
];

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once(',')
            .ok_or_else(|| AtlasError::Config(format!("sort must look like <field>,<direction>: {s}")))?;

        let field = match field.trim() {
            "createdAt" => SortField::CreatedAt,
            "title" => SortField::Title,
            other => return Err(AtlasError::Config(format!("unknown sort field: {other}"))),
        };
        let direction = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(AtlasError::Config(format!("unknown sort direction: {other}"))),
        };

        Ok(Self { field, direction })
    }
}

/// Filter, sort and pagination state of the article list.
///
/// Fields are private so the page-reset rule cannot be bypassed. Every setter
/// other than [`ListQuery::set_page_index`] returns the query to page 0 and
/// reports whether the field value actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    search_term: String,
    category_name: Option<String>,
    tag_name: Option<String>,
    sort: SortKey,
    page_index: usize,
}

impl ListQuery {
    /// Creates the mount-time query: no search, no filters, newest first, page 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Whether a search term, category or tag is currently applied.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty() || self.category_name.is_some() || self.tag_name.is_some()
    }

    /// Applies a search term. Surrounding whitespace is dropped, so a blank
    /// term clears the search.
    pub fn set_search_term(&mut self, term: &str) -> bool {
        let term = term.trim();
        let changed = self.search_term != term;
        if changed {
            self.search_term = term.to_string();
        }
        self.page_index = 0;
        changed
    }

    /// Selects a category by name. `None` or an empty name means "All Categories".
    pub fn set_category(&mut self, name: Option<&str>) -> bool {
        let name = normalize_filter(name);
        let changed = self.category_name != name;
        self.category_name = name;
        self.page_index = 0;
        changed
    }

    /// Selects a tag by name. `None` or an empty name means "All Tags".
    pub fn set_tag(&mut self, name: Option<&str>) -> bool {
        let name = normalize_filter(name);
        let changed = self.tag_name != name;
        self.tag_name = name;
        self.page_index = 0;
        changed
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        let changed = self.sort != sort;
        self.sort = sort;
        self.page_index = 0;
        changed
    }

    /// Clears search, category and tag in one step. Sort is kept.
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.has_active_filters();
        self.search_term.clear();
        self.category_name = None;
        self.tag_name = None;
        self.page_index = 0;
        changed
    }

    /// Moves to a page without touching any other field.
    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let changed = self.page_index != page_index;
        self.page_index = page_index;
        changed
    }
}

fn normalize_filter(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
}

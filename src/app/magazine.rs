//! Magazine list controller state.
//!
//! [`MagazineState`] owns the list query, the current page of results, the
//! filter options and the bookkeeping that keeps responses in order. It never
//! performs I/O; operations that need the network return an [`ApiRequest`] for
//! the caller to dispatch.
//!
//! # Ordering
//!
//! Every list request is stamped with a generation number that increases
//! monotonically. Only a response carrying the latest generation is applied;
//! anything older is a stale answer to a query the user has already replaced.
//! Filter loads are stamped the same way with the mount they belong to.

use crate::api::{ApiRequest, OptionsOutcome};
use crate::domain::{Article, FilterOption, ListPage, ListQuery, SortKey};

use super::modes::{FilterStatus, ListStatus};
use super::pagination;

#[derive(Debug, Clone, Default)]
pub struct MagazineState {
    query: ListQuery,

    /// Search text as typed, applied only on submit.
    pub search_draft: String,

    pub page: ListPage<Article>,
    pub list_status: ListStatus,

    pub categories: Vec<FilterOption>,
    pub tags: Vec<FilterOption>,

    /// One message per filter list that failed to load.
    pub filter_errors: Vec<String>,
    pub filter_status: FilterStatus,

    /// Why the last category or tag selection was refused.
    pub notice: Option<String>,

    latest_generation: u64,
    mount_generation: u64,
    mounted: bool,
}

/// Which filter list a selection is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    Category,
    Tag,
}

impl FilterKind {
    const fn plural(self) -> &'static str {
        match self {
            Self::Category => "Categories",
            Self::Tag => "Tags",
        }
    }

    const fn singular(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
        }
    }
}

impl MagazineState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Generation of the most recently issued list request.
    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Stamp of the current mount, carried by its filter load.
    #[must_use]
    pub const fn mount_generation(&self) -> u64 {
        self.mount_generation
    }

    /// Activates the view with a fresh query and starts loading filter options.
    ///
    /// Returns `None` if the view is already mounted. The list fetch is queued
    /// until [`MagazineState::apply_filters`] runs.
    pub fn mount(&mut self) -> Option<ApiRequest> {
        if self.mounted {
            return None;
        }

        *self = Self {
            latest_generation: self.latest_generation,
            mount_generation: self.mount_generation + 1,
            mounted: true,
            list_status: ListStatus::Loading,
            ..Self::default()
        };

        tracing::debug!(mount = self.mount_generation, "magazine view mounted");
        Some(ApiRequest::load_filters(self.mount_generation))
    }

    /// Deactivates the view and drops its state.
    ///
    /// The generation counter is advanced so that any response still in
    /// flight is treated as stale if it arrives later.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        *self = Self {
            latest_generation: self.latest_generation + 1,
            mount_generation: self.mount_generation,
            ..Self::default()
        };
        tracing::debug!("magazine view unmounted");
    }

    pub fn set_search_draft(&mut self, text: &str) {
        self.search_draft = text.to_string();
    }

    /// Applies the draft as the search term.
    pub fn submit_search(&mut self) -> Option<ApiRequest> {
        let draft = self.search_draft.clone();
        self.update_query(|query| query.set_search_term(&draft))
    }

    /// Clears both the draft and the applied search.
    pub fn clear_search(&mut self) -> Option<ApiRequest> {
        self.search_draft.clear();
        self.update_query(|query| query.set_search_term(""))
    }

    /// Clears search, category and tag in one step.
    pub fn clear_all(&mut self) -> Option<ApiRequest> {
        self.search_draft.clear();
        self.update_query(ListQuery::clear_filters)
    }

    /// Selects a category by name, or all categories with `None`.
    ///
    /// A name must match a loaded option, ignoring case; the option's own
    /// spelling is sent. While options are loading, or when none loaded, only
    /// `None` is accepted. A refused selection sets [`MagazineState::notice`].
    pub fn select_category(&mut self, name: Option<&str>) -> Option<ApiRequest> {
        self.select_option(FilterKind::Category, name)
    }

    /// Selects a tag; validated like [`MagazineState::select_category`].
    pub fn select_tag(&mut self, name: Option<&str>) -> Option<ApiRequest> {
        self.select_option(FilterKind::Tag, name)
    }

    fn select_option(&mut self, kind: FilterKind, name: Option<&str>) -> Option<ApiRequest> {
        if !self.mounted {
            return None;
        }
        let name = match self.resolve_option(kind, name) {
            Ok(name) => name,
            Err(refusal) => {
                tracing::debug!(kind = kind.singular(), reason = %refusal, "filter selection refused");
                self.notice = Some(refusal);
                return None;
            }
        };
        self.update_query(|query| match kind {
            FilterKind::Category => query.set_category(name.as_deref()),
            FilterKind::Tag => query.set_tag(name.as_deref()),
        })
    }

    /// Maps a requested name to the loaded option's spelling, or the reason it is refused.
    fn resolve_option(&self, kind: FilterKind, name: Option<&str>) -> Result<Option<String>, String> {
        let Some(wanted) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        let options = match kind {
            FilterKind::Category => &self.categories,
            FilterKind::Tag => &self.tags,
        };
        if self.filter_status == FilterStatus::Pending {
            return Err(format!("{} are still loading", kind.plural()));
        }
        if options.is_empty() {
            return Err(format!("No {} available", kind.plural().to_lowercase()));
        }
        options
            .iter()
            .find(|option| option.name.eq_ignore_ascii_case(wanted))
            .map(|option| Some(option.name.clone()))
            .ok_or_else(|| format!("Unknown {}: {wanted}", kind.singular()))
    }

    pub fn select_sort(&mut self, sort: SortKey) -> Option<ApiRequest> {
        self.update_query(|query| query.set_sort(sort))
    }

    pub fn previous_page(&mut self) -> Option<ApiRequest> {
        let target = pagination::previous(self.query.page_index())?;
        self.update_query(|query| query.set_page_index(target))
    }

    pub fn next_page(&mut self) -> Option<ApiRequest> {
        let target = pagination::next(self.query.page_index(), self.page.total_pages)?;
        self.update_query(|query| query.set_page_index(target))
    }

    /// Records the filter options and releases the first list fetch.
    ///
    /// Options loaded for an earlier mount are ignored.
    pub fn apply_filters(
        &mut self,
        generation: u64,
        categories: OptionsOutcome,
        tags: OptionsOutcome,
    ) -> Option<ApiRequest> {
        if !self.mounted || generation != self.mount_generation {
            tracing::debug!(
                generation,
                mount = self.mount_generation,
                mounted = self.mounted,
                "discarding stale filter options"
            );
            return None;
        }

        self.categories = categories.options;
        self.tags = tags.options;
        self.filter_errors = [categories.error, tags.error].into_iter().flatten().collect();
        self.filter_status = FilterStatus::Ready;

        tracing::debug!(
            categories = self.categories.len(),
            tags = self.tags.len(),
            errors = self.filter_errors.len(),
            "filter options ready"
        );

        Some(self.issue_list_request())
    }

    /// Applies a page if it answers the latest request. Returns whether it did.
    pub fn apply_page(&mut self, generation: u64, page: ListPage<Article>) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.page = page;
        self.list_status = ListStatus::Loaded;
        true
    }

    /// Applies a failure if it answers the latest request. Returns whether it did.
    ///
    /// The previous page is cleared so stale rows are never shown next to an error.
    pub fn apply_failure(&mut self, generation: u64, message: &str) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.page = ListPage::empty();
        self.list_status = ListStatus::Failed(message.to_string());
        true
    }

    fn accepts(&self, generation: u64) -> bool {
        if !self.mounted || generation != self.latest_generation {
            tracing::debug!(
                generation,
                latest = self.latest_generation,
                mounted = self.mounted,
                "discarding stale list response"
            );
            return false;
        }
        true
    }

    /// Runs a query mutation and fetches if the query changed.
    ///
    /// After a failed fetch the same query is fetched again, which is how the
    /// user retries.
    fn update_query<F>(&mut self, mutate: F) -> Option<ApiRequest>
    where
        F: FnOnce(&mut ListQuery) -> bool,
    {
        if !self.mounted {
            return None;
        }

        self.notice = None;
        let before = self.query.clone();
        mutate(&mut self.query);

        let retry = matches!(self.list_status, ListStatus::Failed(_));
        if self.query == before && !retry {
            tracing::debug!("query unchanged, skipping fetch");
            return None;
        }

        if self.filter_status == FilterStatus::Pending {
            tracing::debug!("filters still loading, list fetch deferred");
            self.list_status = ListStatus::Loading;
            return None;
        }

        Some(self.issue_list_request())
    }

    fn issue_list_request(&mut self) -> ApiRequest {
        self.latest_generation += 1;
        self.list_status = ListStatus::Loading;

        tracing::debug!(
            generation = self.latest_generation,
            page = self.query.page_index(),
            sort = %self.query.sort(),
            "issuing list request"
        );

        ApiRequest::list_articles(self.latest_generation, self.query.clone())
    }
}

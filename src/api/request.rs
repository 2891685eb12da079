//! Deterministic request construction.
//!
//! [`build_request`] turns a [`ListQuery`] into a [`RequestDescriptor`] with a
//! fixed parameter order, and [`RequestDescriptor::to_url`] resolves it against
//! the configured base URL. Both are pure so they can be tested without a server.

use reqwest::Url;
use serde_json::Value;

use crate::domain::error::{AtlasError, Result};
use crate::domain::ListQuery;

pub const ARTICLES_PATH: &str = "/api/articles";
pub const CATEGORIES_PATH: &str = "/api/categories";
pub const TAGS_PATH: &str = "/api/tags";
pub const LIVE_DATA_PATH: &str = "/api/live-data";
pub const PREDICTIONS_PATH: &str = "/api/predictions";
pub const RANKINGS_PATH: &str = "/api/rankings";
pub const BANNER_PATH: &str = "/api/banner";
pub const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A transport-independent description of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: &'static str,
    /// Query parameters in the order they are sent.
    pub params: Vec<(&'static str, String)>,
    /// JSON body for `POST` requests.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// A parameterless `GET`.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            params: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(path: &'static str, body: Value) -> Self {
        Self {
            method: Method::Post,
            path,
            params: Vec::new(),
            body: Some(body),
        }
    }

    /// Looks up a query parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Resolves the descriptor against `base_url`, percent-encoding parameters.
    ///
    /// A trailing slash on the base and any path prefix it carries are kept,
    /// so `http://host/proxy/` resolves articles to `http://host/proxy/api/articles`.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Config`] if the base URL cannot be parsed.
    pub fn to_url(&self, base_url: &str) -> Result<Url> {
        let joined = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&joined)
            .map_err(|e| AtlasError::Config(format!("invalid API base URL {base_url:?}: {e}")))?;

        if !self.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

/// Serializes the list query into a request against the article endpoint.
///
/// Parameters are always emitted in the order `page`, `size`, `sort`, then the
/// optional `search`, `categoryName` and `tagName`. Optional parameters are
/// left out entirely when unset, never sent as empty strings.
///
/// # Examples
///
/// ```
/// use green_atlas::api::build_request;
/// use green_atlas::domain::ListQuery;
///
/// let mut query = ListQuery::new();
/// query.set_category(Some("Climate"));
///
/// let url = build_request(&query, 6).to_url("http://localhost:8080").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "http://localhost:8080/api/articles?page=0&size=6&sort=createdAt%2Cdesc&categoryName=Climate"
/// );
/// ```
#[must_use]
pub fn build_request(query: &ListQuery, page_size: usize) -> RequestDescriptor {
    let mut params = vec![
        ("page", query.page_index().to_string()),
        ("size", page_size.to_string()),
        ("sort", query.sort().to_string()),
    ];

    if !query.search_term().is_empty() {
        params.push(("search", query.search_term().to_string()));
    }
    if let Some(category) = query.category_name() {
        params.push(("categoryName", category.to_string()));
    }
    if let Some(tag) = query.tag_name() {
        params.push(("tagName", tag.to_string()));
    }

    RequestDescriptor {
        method: Method::Get,
        path: ARTICLES_PATH,
        params,
        body: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_PAGE_SIZE;

    fn keys(request: &RequestDescriptor) -> Vec<&str> {
        request.params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn default_query_sends_only_paging_and_sort() {
        let request = build_request(&ListQuery::new(), DEFAULT_PAGE_SIZE);
        assert_eq!(keys(&request), vec!["page", "size", "sort"]);
        assert_eq!(request.param("sort"), Some("createdAt,desc"));
        assert_eq!(request.param("size"), Some("6"));
    }

    #[test]
    fn set_filters_are_appended_in_fixed_order() {
        let mut query = ListQuery::new();
        query.set_tag(Some("rivers"));
        query.set_search_term("water quality");
        query.set_category(Some("Climate"));
        query.set_page_index(1);

        let request = build_request(&query, DEFAULT_PAGE_SIZE);
        assert_eq!(
            keys(&request),
            vec!["page", "size", "sort", "search", "categoryName", "tagName"]
        );
        assert_eq!(request.param("page"), Some("1"));
    }

    #[test]
    fn same_query_builds_same_url() {
        let mut query = ListQuery::new();
        query.set_search_term("coral & reef");
        let a = build_request(&query, 6).to_url("http://api.test").unwrap();
        let b = build_request(&query, 6).to_url("http://api.test/").unwrap();
        assert_eq!(a, b);
        assert!(a.as_str().contains("search=coral+%26+reef"));
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = RequestDescriptor::get(TAGS_PATH)
            .to_url("https://example.org/proxy/")
            .unwrap();
        assert_eq!(url.as_str(), "https://example.org/proxy/api/tags");
    }

    #[test]
    fn unparseable_base_is_a_config_error() {
        let err = RequestDescriptor::get(TAGS_PATH).to_url("not a url").unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }
}

//! Paginated result envelope.
//!
//! The list endpoint answers with `{content, totalPages, totalElements}`. Every
//! field may be missing or malformed; [`ListPage::from_json`] coalesces those
//! cases into a well-formed page so that nothing downstream has to care.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// One page of results plus the totals needed to drive pagination.
///
/// # Invariants
///
/// - `items.len()` never exceeds the page size the page was normalized with
/// - `total_pages == 0` implies `items` is empty
/// - `total_elements >= items.len()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_elements: u64,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ListPage<T> {
    /// A page with no items and zero totals.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies `f` to every item, keeping the totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ListPage<U>
    where
        F: FnMut(T) -> U,
    {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }
}

impl<T: DeserializeOwned> ListPage<T> {
    /// Builds a page from a raw response body.
    ///
    /// Missing `content` becomes an empty list, missing counts become zero.
    /// Entries of `content` that do not deserialize into `T` are skipped with a
    /// warning rather than failing the whole page. The result is then clamped
    /// to the invariants listed on the type: at most `page_size` items, at least
    /// one page when there are items, and a total no smaller than what is shown.
    ///
    /// # Examples
    ///
    /// ```
    /// use green_atlas::domain::ListPage;
    /// use serde_json::json;
    ///
    /// let body = json!({ "content": [1, 2], "totalPages": 3, "totalElements": 13 });
    /// let page: ListPage<u32> = ListPage::from_json(&body, 6);
    /// assert_eq!(page.items, vec![1, 2]);
    /// assert_eq!(page.total_pages, 3);
    ///
    /// let page: ListPage<u32> = ListPage::from_json(&json!({}), 6);
    /// assert!(page.is_empty());
    /// assert_eq!(page.total_pages, 0);
    /// ```
    #[must_use]
    pub fn from_json(body: &Value, page_size: usize) -> Self {
        let mut items: Vec<T> = body
            .get("content")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .filter_map(|(index, entry)| match T::deserialize(entry) {
                        Ok(item) => Some(item),
                        Err(e) => {
                            tracing::warn!(index, error = %e, "skipping malformed list entry");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        if items.len() > page_size {
            tracing::warn!(
                received = items.len(),
                page_size,
                "server returned more items than requested, truncating"
            );
            items.truncate(page_size);
        }

        let mut total_pages = count_field(body, "totalPages") as usize;
        if total_pages == 0 && !items.is_empty() {
            total_pages = 1;
        }
        let total_elements = count_field(body, "totalElements").max(items.len() as u64);

        Self {
            items,
            total_pages,
            total_elements,
        }
    }
}

/// Reads a non-negative count, accepting integers, floats and numeric strings.
fn count_field(body: &Value, key: &str) -> u64 {
    match body.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_empty_and_zero() {
        let page: ListPage<String> = ListPage::from_json(&json!({ "unexpected": true }), 6);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let body = json!({ "content": ["a", 7, "b"], "totalPages": 1, "totalElements": 3 });
        let page: ListPage<String> = ListPage::from_json(&body, 6);
        assert_eq!(page.items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn articles_with_odd_fields_are_kept() {
        let body = json!({
            "content": [
                { "id": 1, "title": null },
                { "id": 2, "title": "Mangroves", "summary": 5 },
                { "id": 3, "title": "fine" }
            ],
            "totalPages": 1,
            "totalElements": 3
        });
        let page: ListPage<crate::domain::Article> = ListPage::from_json(&body, 6);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[1].summary_or_default(), "5");
        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn oversize_pages_are_truncated() {
        let body = json!({ "content": [1, 2, 3, 4, 5, 6, 7, 8], "totalPages": 2, "totalElements": 8 });
        let page: ListPage<u8> = ListPage::from_json(&body, 6);
        assert_eq!(page.items.len(), 6);
    }

    #[test]
    fn items_without_page_count_imply_one_page() {
        let body = json!({ "content": [1, 2] });
        let page: ListPage<u8> = ListPage::from_json(&body, 6);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_elements, 2);
    }

    #[test]
    fn counts_accept_numeric_strings() {
        let body = json!({ "content": [], "totalPages": "4", "totalElements": 19.0 });
        let page: ListPage<u8> = ListPage::from_json(&body, 6);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_elements, 19);
    }

    #[test]
    fn negative_counts_become_zero() {
        let body = json!({ "totalPages": -2, "totalElements": -1 });
        let page: ListPage<u8> = ListPage::from_json(&body, 6);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }
}

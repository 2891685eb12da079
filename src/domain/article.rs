//! Magazine article and filter option models.
//!
//! Both types deserialize leniently from the API's JSON. Identifiers may arrive
//! as numbers or strings and are always held as strings; optional text fields
//! that are blank are treated as absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Shown when an article carries no summary.
pub const DEFAULT_SUMMARY: &str = "No summary available.";

/// A published magazine article as shown in the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Blank when the API sends no usable title.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub created_at: Option<String>,
}

impl Article {
    /// The summary, or the placeholder text when the article has none.
    #[must_use]
    pub fn summary_or_default(&self) -> &str {
        self.summary.as_deref().unwrap_or(DEFAULT_SUMMARY)
    }

    /// Relative link to the article detail page.
    #[must_use]
    pub fn link(&self) -> String {
        format!("/magazine/article/{}", self.id)
    }

    /// Publication date formatted for display, e.g. `"March 4, 2025"`.
    ///
    /// Accepts RFC 3339 timestamps, naive ISO-8601 date-times and plain dates.
    /// Returns `None` when the timestamp is absent or unparseable.
    ///
    /// # Examples
    ///
    /// ```
    /// use green_atlas::domain::Article;
    ///
    /// let article: Article = serde_json::from_value(serde_json::json!({
    ///     "id": 7,
    ///     "title": "Reef Survey",
    ///     "createdAt": "2025-03-04T10:15:00"
    /// })).unwrap();
    /// assert_eq!(article.published_on().as_deref(), Some("March 4, 2025"));
    /// ```
    #[must_use]
    pub fn published_on(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?;
        let date = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()?;
        Some(date.format("%B %-d, %Y").to_string())
    }
}

/// A selectable category or tag.
///
/// The API sends `{id?, name}`. The `key` is the id when present and the name
/// otherwise; queries always filter by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub key: String,
    pub name: String,
}

impl FilterOption {
    /// Normalizes a raw JSON array of options, dropping entries without a name.
    ///
    /// A body that is not an array yields no options.
    #[must_use]
    pub fn list_from_json(body: &Value) -> Vec<Self> {
        let Some(entries) = body.as_array() else {
            tracing::warn!("filter option response is not an array");
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| {
                let name = entry.get("name").and_then(Value::as_str).map(str::trim)?;
                if name.is_empty() {
                    return None;
                }
                let key = entry
                    .get("id")
                    .and_then(scalar_to_string)
                    .unwrap_or_else(|| name.to_string());
                Some(Self {
                    key,
                    name: name.to_string(),
                })
            })
            .collect()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value).ok_or_else(|| serde::de::Error::custom("expected a string or numeric id"))
}

/// Any JSON value; strings and numbers become text, everything else is absent.
fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn article_accepts_numeric_and_string_ids() {
        let a: Article = serde_json::from_value(json!({ "id": 12, "title": "A" })).unwrap();
        let b: Article = serde_json::from_value(json!({ "id": "abc", "title": "B" })).unwrap();
        assert_eq!(a.id, "12");
        assert_eq!(b.link(), "/magazine/article/abc");
    }

    #[test]
    fn article_without_id_is_rejected() {
        assert!(serde_json::from_value::<Article>(json!({ "title": "orphan" })).is_err());
    }

    #[test]
    fn blank_summary_falls_back_to_placeholder() {
        let article: Article =
            serde_json::from_value(json!({ "id": 1, "title": "T", "summary": "  " })).unwrap();
        assert_eq!(article.summary_or_default(), DEFAULT_SUMMARY);
    }

    #[test]
    fn badly_shaped_text_fields_are_coalesced() {
        let article: Article = serde_json::from_value(json!({
            "id": 4,
            "title": null,
            "summary": 5,
            "imageUrl": { "src": "x.png" },
            "createdAt": false
        }))
        .unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.summary_or_default(), "5");
        assert_eq!(article.image_url, None);
        assert_eq!(article.published_on(), None);
    }

    #[test]
    fn published_on_handles_offsets_and_plain_dates() {
        let mut article: Article = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(article.published_on(), None);

        article.created_at = Some("2024-12-31T23:00:00Z".to_string());
        assert_eq!(article.published_on().as_deref(), Some("December 31, 2024"));

        article.created_at = Some("2024-01-09".to_string());
        assert_eq!(article.published_on().as_deref(), Some("January 9, 2024"));

        article.created_at = Some("last tuesday".to_string());
        assert_eq!(article.published_on(), None);
    }

    #[test]
    fn filter_options_key_by_id_then_name() {
        let body = json!([
            { "id": 3, "name": "Climate" },
            { "name": "Forests" },
            { "id": 9 },
            { "id": 10, "name": "" }
        ]);
        let options = FilterOption::list_from_json(&body);
        assert_eq!(
            options,
            vec![
                FilterOption { key: "3".into(), name: "Climate".into() },
                FilterOption { key: "Forests".into(), name: "Forests".into() },
            ]
        );
    }

    #[test]
    fn non_array_filter_body_yields_nothing() {
        assert!(FilterOption::list_from_json(&json!({ "message": "oops" })).is_empty());
    }
}

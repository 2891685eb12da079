//! Typed API client.
//!
//! [`ApiClient`] owns the base URL, the page size and a shared [`Transport`].
//! Each public method issues one request, maps non-success statuses through
//! [`error_from_response`] and normalizes the body into domain types.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::Instrument;

use super::request::{
    build_request, RequestDescriptor, BANNER_PATH, CATEGORIES_PATH, CHAT_PATH, LIVE_DATA_PATH,
    PREDICTIONS_PATH, RANKINGS_PATH, TAGS_PATH,
};
use super::transport::{HttpTransport, RawResponse, Transport};
use crate::domain::chat::reply_text;
use crate::domain::error::{AtlasError, Result};
use crate::domain::{
    Article, CampaignBanner, FilterOption, ListPage, ListQuery, LiveMetric, Prediction, RegionRanking,
};
use crate::Config;

/// Client for the Green Atlas REST API.
///
/// Cloning is cheap; clones share the underlying transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    page_size: usize,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client that talks HTTP using the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over an arbitrary transport.
    #[must_use]
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.api_url.clone(),
            page_size: config.page_size,
            transport,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetches one page of articles for `query`.
    ///
    /// # Errors
    ///
    /// [`AtlasError::Api`] or [`AtlasError::Transport`] on a failed request,
    /// [`AtlasError::Decode`] if a success body is not JSON.
    pub async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<Article>> {
        let request = build_request(query, self.page_size);
        let body = self.send_json(request).await?;
        let page = ListPage::from_json(&body, self.page_size);
        tracing::debug!(
            items = page.items.len(),
            total_pages = page.total_pages,
            total_elements = page.total_elements,
            "article page received"
        );
        Ok(page)
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`].
    pub async fn fetch_categories(&self) -> Result<Vec<FilterOption>> {
        let body = self.send_json(RequestDescriptor::get(CATEGORIES_PATH)).await?;
        Ok(FilterOption::list_from_json(&body))
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`].
    pub async fn fetch_tags(&self) -> Result<Vec<FilterOption>> {
        let body = self.send_json(RequestDescriptor::get(TAGS_PATH)).await?;
        Ok(FilterOption::list_from_json(&body))
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`].
    pub async fn fetch_live_data(&self) -> Result<Vec<LiveMetric>> {
        let body = self.send_json(RequestDescriptor::get(LIVE_DATA_PATH)).await?;
        Ok(LiveMetric::list_from_json(&body))
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`].
    pub async fn fetch_predictions(&self) -> Result<Vec<Prediction>> {
        let body = self.send_json(RequestDescriptor::get(PREDICTIONS_PATH)).await?;
        Ok(Prediction::list_from_json(&body))
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`].
    pub async fn fetch_rankings(&self) -> Result<Vec<RegionRanking>> {
        let body = self.send_json(RequestDescriptor::get(RANKINGS_PATH)).await?;
        Ok(RegionRanking::list_from_json(&body))
    }

    /// Fetches the campaign banner.
    ///
    /// This is the one endpoint where an empty success (typically `204 No
    /// Content`) is meaningful: it yields the default banner.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`], except that an empty body is not an error.
    pub async fn fetch_banner(&self) -> Result<CampaignBanner> {
        let response = self.send(RequestDescriptor::get(BANNER_PATH)).await?;
        if !response.has_body() {
            tracing::debug!(status = response.status, "banner endpoint returned no content");
            return Ok(CampaignBanner::default());
        }
        Ok(CampaignBanner::from_json(&parse_body(&response)?))
    }

    /// Sends a chat message and returns the text the bot should display.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch_page`], with rejections mapped through
    /// [`chat_error_from_response`].
    pub async fn send_chat(&self, message: &str) -> Result<String> {
        let request = RequestDescriptor::post(CHAT_PATH, json!({ "message": message }));
        let response = self.send_with(request, chat_error_from_response).await?;
        if !response.has_body() {
            return Err(AtlasError::Decode("empty response body".to_string()));
        }
        Ok(reply_text(&parse_body(&response)?))
    }

    /// Downloads a map layer archive as raw bytes.
    ///
    /// # Errors
    ///
    /// [`AtlasError::Transport`] carrying the status text when the file is
    /// rejected, or the transport failure itself.
    pub async fn fetch_layer(&self, path: &'static str) -> Result<Vec<u8>> {
        let response = self.send_with(RequestDescriptor::get(path), status_text_error).await?;
        tracing::debug!(path, bytes = response.body.len(), "layer archive received");
        Ok(response.body)
    }

    async fn send_json(&self, request: RequestDescriptor) -> Result<Value> {
        let response = self.send(request).await?;
        if !response.has_body() {
            return Err(AtlasError::Decode("empty response body".to_string()));
        }
        parse_body(&response)
    }

    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse> {
        self.send_with(request, error_from_response).await
    }

    async fn send_with(
        &self,
        request: RequestDescriptor,
        map_error: fn(&RawResponse) -> AtlasError,
    ) -> Result<RawResponse> {
        let url = request.to_url(&self.base_url)?;
        let span = tracing::debug_span!("api_request", method = ?request.method, path = request.path);

        async move {
            tracing::debug!(url = %url, "sending request");
            let response = self.transport.execute(url, request).await.map_err(|e| {
                tracing::warn!(error = %e, "request did not complete");
                e
            })?;

            if response.is_success() {
                tracing::debug!(status = response.status, "request succeeded");
                Ok(response)
            } else {
                let err = map_error(&response);
                tracing::warn!(status = response.status, error = %err, "request rejected");
                Err(err)
            }
        }
        .instrument(span)
        .await
    }
}

fn parse_body(response: &RawResponse) -> Result<Value> {
    serde_json::from_slice(&response.body).map_err(|e| AtlasError::Decode(e.to_string()))
}

/// Maps a non-success response to the single message the user sees.
///
/// A JSON body's `message` field wins, then its `error` field, both as
/// [`AtlasError::Api`]. Anything else falls back to the status text as
/// [`AtlasError::Transport`].
///
/// # Examples
///
/// ```
/// use green_atlas::api::{error_from_response, RawResponse};
///
/// let resp = RawResponse {
///     status: 404,
///     status_text: "Not Found".to_string(),
///     body: br#"{"message":"not found"}"#.to_vec(),
/// };
/// assert_eq!(error_from_response(&resp).to_string(), "not found");
/// ```
#[must_use]
pub fn error_from_response(response: &RawResponse) -> AtlasError {
    let structured = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["message", "error"].into_iter().find_map(|key| {
                body.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
            })
        });

    match structured {
        Some(message) => AtlasError::Api {
            status: response.status,
            message,
        },
        None if response.status_text.trim().is_empty() => {
            AtlasError::Transport(format!("Request failed with status {}", response.status))
        }
        None => AtlasError::Transport(response.status_text.clone()),
    }
}

/// Static files carry no error body; only the status text is reported.
fn status_text_error(response: &RawResponse) -> AtlasError {
    if response.status_text.trim().is_empty() {
        AtlasError::Transport(format!("Request failed with status {}", response.status))
    } else {
        AtlasError::Transport(response.status_text.clone())
    }
}

/// Maps a rejected chat request to the message shown in the conversation.
///
/// A JSON body yields its `error` field, or a generic failure when it has
/// none. A body that is not JSON names the status text.
#[must_use]
pub fn chat_error_from_response(response: &RawResponse) -> AtlasError {
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(body) => AtlasError::Api {
            status: response.status,
            message: body
                .get("error")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(CHAT_FAILURE_MESSAGE)
                .to_string(),
        },
        Err(_) => AtlasError::Transport(format!(
            "Network response was not ok: {}",
            response.status_text
        )),
    }
}

/// Shown when a rejected chat response carries no `error` field.
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get response from AI";

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, status_text: &str, body: &str) -> RawResponse {
        RawResponse {
            status,
            status_text: status_text.to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn structured_message_is_used_verbatim() {
        let err = error_from_response(&response(404, "Not Found", r#"{"message":"not found"}"#));
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn error_field_is_second_choice() {
        let err = error_from_response(&response(400, "Bad Request", r#"{"error":"bad sort"}"#));
        assert_eq!(err.to_string(), "bad sort");
    }

    #[test]
    fn non_json_body_falls_back_to_status_text() {
        let err = error_from_response(&response(500, "Internal Server Error", "<html>boom</html>"));
        assert!(matches!(err, AtlasError::Transport(_)));
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn json_without_known_fields_falls_back_to_status_text() {
        let err = error_from_response(&response(503, "Service Unavailable", r#"{"detail":"x"}"#));
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[test]
    fn missing_status_text_names_the_status() {
        let err = error_from_response(&response(599, "", ""));
        assert_eq!(err.to_string(), "Request failed with status 599");
    }

    #[test]
    fn chat_rejection_uses_the_error_field() {
        let err = chat_error_from_response(&response(429, "Too Many Requests", r#"{"error":"slow down"}"#));
        assert_eq!(err.to_string(), "slow down");
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn chat_rejection_ignores_the_message_field() {
        let err = chat_error_from_response(&response(500, "Internal Server Error", r#"{"message":"boom"}"#));
        assert_eq!(err.to_string(), CHAT_FAILURE_MESSAGE);
    }

    #[test]
    fn chat_rejection_without_json_names_the_status_text() {
        let err = chat_error_from_response(&response(502, "Bad Gateway", "<html></html>"));
        assert!(matches!(err, AtlasError::Transport(_)));
        assert_eq!(err.to_string(), "Network response was not ok: Bad Gateway");
    }
}

//! Executes [`ApiRequest`]s against the [`ApiClient`].
//!
//! Every fetch site catches its own failure here and turns it into a
//! response variant carrying the user-visible message. Nothing propagates past
//! the dispatcher as an `Err`.

use futures_util::future::join;
use tracing::Instrument;

use super::client::ApiClient;
use super::messages::{ApiRequest, ApiResponse, DashboardSection, OptionsOutcome, SectionSnapshot};
use crate::domain::error::Result;
use crate::domain::layers::layer_from_kmz;
use crate::domain::{FilterOption, LayerSet, ListQuery, KMZ_LAYERS};

/// Stateless executor for API requests.
#[derive(Debug, Clone)]
pub struct ApiDispatcher {
    client: ApiClient,
}

impl ApiDispatcher {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Helper for handling fetch results with consistent logging.
    fn handle_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> ApiResponse
    where
        F: FnOnce(T) -> ApiResponse,
        E: FnOnce(String) -> ApiResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "fetch successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "fetch failed");
                on_error(e.to_string())
            }
        }
    }

    fn options_outcome(operation: &str, result: Result<Vec<FilterOption>>) -> OptionsOutcome {
        match result {
            Ok(options) => {
                tracing::debug!(operation = operation, count = options.len(), "filter options loaded");
                OptionsOutcome { options, error: None }
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "filter options unavailable");
                OptionsOutcome {
                    options: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Loads categories and tags concurrently. Each list fails on its own.
    async fn handle_load_filters(&self, generation: u64) -> ApiResponse {
        let (categories, tags) = join(self.client.fetch_categories(), self.client.fetch_tags()).await;

        ApiResponse::FiltersLoaded {
            generation,
            categories: Self::options_outcome("load categories", categories),
            tags: Self::options_outcome("load tags", tags),
        }
    }

    async fn handle_list_articles(&self, generation: u64, query: &ListQuery) -> ApiResponse {
        Self::handle_result(
            "list articles",
            self.client.fetch_page(query).await,
            |page| ApiResponse::ArticlesLoaded { generation, page },
            |message| ApiResponse::ArticlesFailed { generation, message },
        )
    }

    async fn handle_load_section(&self, section: DashboardSection) -> ApiResponse {
        let result = match section {
            DashboardSection::LiveData => self.client.fetch_live_data().await.map(SectionSnapshot::LiveData),
            DashboardSection::Predictions => {
                self.client.fetch_predictions().await.map(SectionSnapshot::Predictions)
            }
            DashboardSection::Rankings => self.client.fetch_rankings().await.map(SectionSnapshot::Rankings),
            DashboardSection::Banner => self.client.fetch_banner().await.map(SectionSnapshot::Banner),
        };

        Self::handle_result(
            "load dashboard section",
            result,
            ApiResponse::SectionLoaded,
            |message| ApiResponse::SectionFailed { section, message },
        )
    }

    async fn handle_send_chat(&self, message: &str) -> ApiResponse {
        Self::handle_result(
            "send chat",
            self.client.send_chat(message).await,
            |text| ApiResponse::ChatReplied { text },
            |message| ApiResponse::ChatFailed { message },
        )
    }

    /// Loads the map layers in order. A failing layer is recorded and skipped.
    async fn handle_load_layers(&self) -> ApiResponse {
        let mut set = LayerSet::default();
        for source in KMZ_LAYERS {
            let outcome = match self.client.fetch_layer(source.path).await {
                Ok(bytes) => layer_from_kmz(source.name, &bytes).map_err(|e| format!("{}: {e}", source.name)),
                Err(e) => Err(format!("Failed to fetch {}: {e}", source.name)),
            };
            match outcome {
                Ok(Some(layer)) => {
                    tracing::debug!(layer = source.name, features = layer.feature_count(), "layer converted");
                    set.layers.push(layer);
                }
                Ok(None) => {}
                Err(message) => {
                    tracing::warn!(layer = source.name, error = %message, "layer failed to load");
                    set.errors.push(message);
                }
            }
        }
        ApiResponse::LayersLoaded(set)
    }

    /// Rebuilds the issuing span's context so the dispatcher span links to it.
    fn parent_context(request: &ApiRequest) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = request.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }

    /// Processes a request and returns the response to feed back to the app.
    ///
    /// Opens a `dispatch_request` span parented to the issuing span when the
    /// request carries a trace context.
    pub async fn handle_message(&self, request: ApiRequest) -> ApiResponse {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::debug_span!("dispatch_request", request = ?request);
        if let Some(parent) = Self::parent_context(&request) {
            span.set_parent(parent);
        }

        async move {
            match request {
                ApiRequest::LoadFilters { generation, .. } => self.handle_load_filters(generation).await,
                ApiRequest::ListArticles { generation, query, .. } => {
                    self.handle_list_articles(generation, &query).await
                }
                ApiRequest::LoadSection { section, .. } => self.handle_load_section(section).await,
                ApiRequest::SendChat { message, .. } => self.handle_send_chat(&message).await,
                ApiRequest::LoadLayers { .. } => self.handle_load_layers().await,
            }
        }
        .instrument(span)
        .await
    }
}

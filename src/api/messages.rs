//! Request and response messages between the application core and API tasks.
//!
//! The application layer never awaits anything. It emits [`ApiRequest`]s as
//! actions; the runtime executes them on spawned tasks and feeds the resulting
//! [`ApiResponse`]s back as events. Each request carries the tracing context of
//! the span that created it so work on the task is linked to its cause.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Article, CampaignBanner, FilterOption, LayerSet, ListPage, ListQuery, LiveMetric, Prediction,
    RegionRanking,
};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so the span
/// opened by the dispatcher becomes a child of the span that issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when there is no valid OpenTelemetry span, which is the
    /// case whenever tracing has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// The dashboard sections, each fetched and tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardSection {
    LiveData,
    Predictions,
    Rankings,
    Banner,
}

impl DashboardSection {
    pub const ALL: [Self; 4] = [Self::LiveData, Self::Predictions, Self::Rankings, Self::Banner];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::LiveData => "Current Environmental Snapshot",
            Self::Predictions => "Environmental Predictions",
            Self::Rankings => "Regional Rankings",
            Self::Banner => "Campaign",
        }
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

api_request_builders! {
    load_filters(LoadFilters { generation: u64 }),
    list_articles(ListArticles { generation: u64, query: ListQuery }),
    load_section(LoadSection { section: DashboardSection }),
    send_chat(SendChat { message: String }),
    load_layers(LoadLayers {}),
}

/// Work the application asks the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Load categories and tags in parallel.
    LoadFilters {
        /// Mount stamp echoed back in the response.
        generation: u64,

        trace_context: Option<TraceContext>,
    },

    /// Fetch one page of articles.
    ListArticles {
        /// Generation stamp echoed back in the response.
        generation: u64,

        /// Snapshot of the query at the time the request was issued.
        query: ListQuery,

        trace_context: Option<TraceContext>,
    },

    /// Fetch one dashboard section.
    LoadSection {
        section: DashboardSection,
        trace_context: Option<TraceContext>,
    },

    /// Post a chat message.
    SendChat {
        message: String,
        trace_context: Option<TraceContext>,
    },

    /// Download and convert every map layer, one after another.
    LoadLayers {
        trace_context: Option<TraceContext>,
    },
}

impl ApiRequest {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadFilters { trace_context, .. }
            | Self::ListArticles { trace_context, .. }
            | Self::LoadSection { trace_context, .. }
            | Self::SendChat { trace_context, .. }
            | Self::LoadLayers { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Result of loading one filter option list.
///
/// A failure degrades to an empty option list plus the error message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsOutcome {
    pub options: Vec<FilterOption>,
    pub error: Option<String>,
}

/// A successfully loaded dashboard section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionSnapshot {
    LiveData(Vec<LiveMetric>),
    Predictions(Vec<Prediction>),
    Rankings(Vec<RegionRanking>),
    Banner(CampaignBanner),
}

impl SectionSnapshot {
    #[must_use]
    pub const fn section(&self) -> DashboardSection {
        match self {
            Self::LiveData(_) => DashboardSection::LiveData,
            Self::Predictions(_) => DashboardSection::Predictions,
            Self::Rankings(_) => DashboardSection::Rankings,
            Self::Banner(_) => DashboardSection::Banner,
        }
    }
}

/// Completed work, fed back into the application as an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Both filter lists finished, each independently successful or not.
    FiltersLoaded {
        generation: u64,
        categories: OptionsOutcome,
        tags: OptionsOutcome,
    },

    ArticlesLoaded {
        generation: u64,
        page: ListPage<Article>,
    },

    ArticlesFailed {
        generation: u64,
        message: String,
    },

    SectionLoaded(SectionSnapshot),

    SectionFailed {
        section: DashboardSection,
        message: String,
    },

    /// Text the bot should display, already normalized.
    ChatReplied {
        text: String,
    },

    ChatFailed {
        message: String,
    },

    /// Every map layer was attempted; failures are listed in the set.
    LayersLoaded(LayerSet),
}

//! Scripted transport and an inline event loop for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use reqwest::Url;
use serde_json::Value;

use green_atlas::api::{ApiClient, ApiDispatcher, ApiRequest, RawResponse, RequestDescriptor, Transport};
use green_atlas::{handle_event, Action, AppState, AtlasError, Config, Event, Theme};

pub const BASE_URL: &str = "http://atlas.test";

type Handler = dyn Fn(&Url, &RequestDescriptor) -> Result<RawResponse, AtlasError> + Send + Sync;

/// Answers every request with a closure and records what was asked.
pub struct FakeTransport {
    handler: Box<Handler>,
    seen: Mutex<Vec<(Url, RequestDescriptor)>>,
}

impl FakeTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Url, &RequestDescriptor) -> Result<RawResponse, AtlasError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Every request URL, in the order it was sent.
    pub fn urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(url, _)| url.to_string()).collect()
    }

    /// Requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RequestDescriptor> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, request)| request.path == path)
            .map(|(_, request)| request.clone())
            .collect()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, url: Url, request: RequestDescriptor) -> BoxFuture<'_, Result<RawResponse, AtlasError>> {
        let result = (self.handler)(&url, &request);
        self.seen.lock().unwrap().push((url, request));
        Box::pin(std::future::ready(result))
    }
}

pub fn json(status: u16, body: &Value) -> Result<RawResponse, AtlasError> {
    Ok(RawResponse {
        status,
        status_text: status_text(status).to_string(),
        body: body.to_string().into_bytes(),
    })
}

pub fn raw(status: u16, status_text: &str, body: &str) -> Result<RawResponse, AtlasError> {
    Ok(RawResponse {
        status,
        status_text: status_text.to_string(),
        body: body.as_bytes().to_vec(),
    })
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// A page body with `count` articles titled `"<prefix> <n>"`.
pub fn page_body(prefix: &str, count: usize, total_pages: u64, total_elements: u64) -> Value {
    let content: Vec<Value> = (1..=count)
        .map(|n| {
            serde_json::json!({
                "id": n,
                "title": format!("{prefix} {n}"),
                "summary": format!("Summary of {prefix} {n}"),
                "createdAt": "2024-05-01T08:30:00Z"
            })
        })
        .collect();
    serde_json::json!({ "content": content, "totalPages": total_pages, "totalElements": total_elements })
}

pub fn config() -> Config {
    Config {
        api_url: BASE_URL.to_string(),
        ..Config::default()
    }
}

pub fn dispatcher(transport: &Arc<FakeTransport>) -> ApiDispatcher {
    let transport: Arc<dyn Transport> = transport.clone();
    ApiDispatcher::new(ApiClient::with_transport(&config(), transport))
}

/// Runs events through the app with every dispatched request answered
/// in order, before the next event is handled.
pub struct Harness {
    pub state: AppState,
    pub dispatcher: ApiDispatcher,
    pub transport: Arc<FakeTransport>,
}

impl Harness {
    pub fn new(transport: Arc<FakeTransport>) -> Self {
        Self {
            state: AppState::new(Theme::default()),
            dispatcher: dispatcher(&transport),
            transport,
        }
    }

    /// Handles `event` and every response it leads to.
    pub async fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            for action in actions {
                if let Action::Dispatch(request) = action {
                    let response = self.dispatcher.handle_message(request).await;
                    queue.push_back(Event::ApiResponse(response));
                }
            }
        }
    }

    /// Handles `event` without answering what it dispatches.
    pub fn send_unanswered(&mut self, event: &Event) -> Vec<ApiRequest> {
        let (_, actions) = handle_event(&mut self.state, event).unwrap();
        actions
            .into_iter()
            .filter_map(|action| match action {
                Action::Dispatch(request) => Some(request),
                _ => None,
            })
            .collect()
    }
}

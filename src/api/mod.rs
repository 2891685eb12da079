//! API layer: request construction, transport, typed client and dispatch.
//!
//! - [`request`]: pure query-to-request serialization
//! - [`transport`]: the HTTP seam and its `reqwest` implementation
//! - [`client`]: typed endpoint methods and error mapping
//! - [`messages`]: request/response messages exchanged with the app layer
//! - [`dispatcher`]: executes requests and captures failures as responses

pub mod client;
pub mod dispatcher;
pub mod messages;
pub mod request;
pub mod transport;

pub use client::{chat_error_from_response, error_from_response, ApiClient, CHAT_FAILURE_MESSAGE};
pub use dispatcher::ApiDispatcher;
pub use messages::{ApiRequest, ApiResponse, DashboardSection, OptionsOutcome, SectionSnapshot, TraceContext};
pub use request::{build_request, Method, RequestDescriptor};
pub use transport::{HttpTransport, RawResponse, Transport};

//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → rotating file
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: one JSON object per finished span, written to
//!   `<data dir>/green-atlas-spans.jsonl`
//! - **Automatic Rotation**: files rotate at 10MB with 3 numbered backups
//! - **Request Correlation**: dispatcher spans are parented to the span that
//!   queued the request, so one user command forms one trace
//!
//! # Modules
//!
//! - `init`: Tracing initialization and subscriber setup
//! - `tracer`: Tracer provider and span exporter
//! - `span_formatter`: Span to JSON record conversion
//! - `file_writer`: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};

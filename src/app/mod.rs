//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (`main.rs`) and the domain and API
//! layers. It never performs I/O itself.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── API Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`commands`]: Text command parsing for the terminal driver
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`magazine`]: Article list controller (query, page, filters, ordering)
//! - [`pagination`]: Page navigation arithmetic
//! - [`dashboard`]: Dashboard section load states
//! - [`chat`]: Chat conversation
//! - [`map`]: Map overlay load state
//! - [`modes`]: View and load-status enums
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod chat;
pub mod commands;
pub mod dashboard;
pub mod handler;
pub mod magazine;
pub mod map;
pub mod modes;
pub mod pagination;
pub mod state;

pub use actions::Action;
pub use commands::{parse_command, CommandError};
pub use handler::{handle_event, Event};
pub use modes::{FilterStatus, ListStatus, ViewMode};
pub use state::AppState;

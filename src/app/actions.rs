//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after each event. Actions are the
//! boundary between pure state transitions and effectful work: network calls
//! and process lifecycle.
//!
//! # Example
//!
//! ```
//! use green_atlas::api::ApiRequest;
//! use green_atlas::app::Action;
//!
//! let actions = vec![Action::Dispatch(ApiRequest::load_filters(1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::ApiRequest;

/// Commands for the runtime to execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a request on a background task and feed the response back as an event.
    Dispatch(ApiRequest),

    /// Abort in-flight list and filter requests.
    ///
    /// Emitted when the magazine view unmounts. Any response that still
    /// arrives is discarded by the generation check.
    CancelPending,

    /// Exit the driver.
    Quit,
}

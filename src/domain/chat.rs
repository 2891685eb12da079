//! Chat widget conversation model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// First message of every conversation.
pub const GREETING: &str = "Hello! How can I help you today?";

/// Bot text used when a reply body carries neither `reply` nor `error`.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't understand that.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
}

/// Turns a chat response body into the text the bot should say.
///
/// A non-empty `reply` wins and is trimmed. Otherwise an `error` field is
/// surfaced as `Error: <error>`. A body with neither gets [`FALLBACK_REPLY`].
///
/// # Examples
///
/// ```
/// use green_atlas::domain::chat::reply_text;
/// use serde_json::json;
///
/// assert_eq!(reply_text(&json!({ "reply": "  Hi there\n" })), "Hi there");
/// assert_eq!(reply_text(&json!({ "error": "quota" })), "Error: quota");
/// ```
#[must_use]
pub fn reply_text(body: &Value) -> String {
    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    if let Some(reply) = field("reply") {
        reply.trim().to_string()
    } else if let Some(error) = field("error") {
        format!("Error: {error}")
    } else {
        FALLBACK_REPLY.to_string()
    }
}

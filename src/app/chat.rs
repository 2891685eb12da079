//! Chat conversation state.

use crate::api::ApiRequest;
use crate::domain::chat::GREETING;
use crate::domain::{ChatMessage, Sender};

#[derive(Debug, Clone)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Number of sent messages still waiting for a reply.
    pub awaiting: usize,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: 1,
                text: GREETING.to_string(),
                sender: Sender::Bot,
            }],
            awaiting: 0,
        }
    }
}

impl ChatState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the user's message and returns the request to send it.
    ///
    /// Blank input is ignored. The text is sent exactly as typed.
    pub fn send(&mut self, text: &str) -> Option<ApiRequest> {
        if text.trim().is_empty() {
            return None;
        }
        self.push(text.to_string(), Sender::User);
        self.awaiting += 1;
        Some(ApiRequest::send_chat(text.to_string()))
    }

    pub fn receive_reply(&mut self, text: &str) {
        self.awaiting = self.awaiting.saturating_sub(1);
        self.push(text.to_string(), Sender::Bot);
    }

    pub fn receive_failure(&mut self, message: &str) {
        self.awaiting = self.awaiting.saturating_sub(1);
        self.push(format!("Error: {message}"), Sender::Bot);
    }

    fn push(&mut self, text: String, sender: Sender) {
        let id = self.messages.last().map_or(1, |m| m.id + 1);
        self.messages.push(ChatMessage { id, text, sender });
    }
}

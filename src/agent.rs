use log::{ debug, info, warn };
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::config::prompt::build_prompt;
use crate::error::RelayError;
use crate::llm::chat::ChatClient;
use crate::models::chat::{ ChatRequest, ChatResponse };

const REPLY_PREVIEW_CHARS: usize = 200;

/// What the chat endpoint sends back on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentReply {
    /// The provider answered with JSON; forwarded as-is.
    Json(JsonValue),
    /// The provider answered with plain text.
    Text(ChatResponse),
}

/// Relays a chat request to the provider and shapes the reply for the front-end.
#[derive(Clone)]
pub struct AIAgent {
    chat_client: Arc<dyn ChatClient>,
}

impl AIAgent {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn model(&self) -> String {
        self.chat_client.get_model()
    }

    pub async fn respond(&self, request: &ChatRequest) -> Result<AgentReply, RelayError> {
        let prompt = build_prompt(request);
        info!(
            "Sending to {}: {} chars, {} turns",
            self.chat_client.get_model(),
            prompt.chars().count(),
            request.history.len()
        );

        let completion = self.chat_client.complete(&prompt).await?;
        let preview: String = completion.response.chars().take(REPLY_PREVIEW_CHARS).collect();
        debug!("Provider response: {}...", preview);

        Ok(normalize_reply(&completion.response))
    }
}

/// Returns the reply as decoded JSON when it parses, otherwise wraps the raw
/// text into the envelope with empty artifact and action fields.
pub fn normalize_reply(text: &str) -> AgentReply {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(value) => {
            debug!("Successfully parsed JSON response");
            AgentReply::Json(value)
        }
        Err(e) => {
            warn!("Failed to parse JSON: {}", e);
            AgentReply::Text(ChatResponse::from_text(text))
        }
    }
}

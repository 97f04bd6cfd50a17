use serde::{ Deserialize, Serialize };
use serde_json::Value as JsonValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "assistant")]
    Model,
}

impl Role {
    /// Label used for this speaker in the prompt transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Пользователь",
            Role::Model => "AI",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default, rename = "systemInstruction")]
    pub system_instruction: Option<String>,
}

/// Envelope returned to the front-end, on success and on failure alike.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub artifact_update: Option<JsonValue>,
    pub suggested_action: Option<JsonValue>,
}

impl ChatResponse {
    pub fn from_text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            artifact_update: None,
            suggested_action: None,
        }
    }
}

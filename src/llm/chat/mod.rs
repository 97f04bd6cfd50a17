pub mod gigachat;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use super::LlmConfig;
use self::gigachat::GigaChatClient;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("GigaChat credentials are not configured")]
    MissingCredentials,
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response from {url}: {message}")]
    Malformed {
        url: String,
        message: String,
    },
    #[error("completion contained no choices")]
    EmptyCompletion,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the completion text.
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ProviderError>;

    fn get_model(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ProviderError> {
    let client: Arc<dyn ChatClient> = Arc::new(GigaChatClient::from_config(config)?);
    Ok(client)
}

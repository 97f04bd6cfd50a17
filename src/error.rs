use thiserror::Error;

use crate::llm::chat::ProviderError;

/// Failures surfaced by the chat handler. All of them share one envelope.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid request body: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

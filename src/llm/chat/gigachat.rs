use async_trait::async_trait;
use base64::{ engine::general_purpose::STANDARD, Engine as _ };
use chrono::Utc;
use log::{ debug, info, warn };
use reqwest::{ header::{ ACCEPT, AUTHORIZATION }, Client as HttpClient, RequestBuilder, StatusCode };
use serde::de::DeserializeOwned;
use serde::{ Deserialize, Serialize };
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ ChatClient, CompletionResponse, ProviderError };
use crate::llm::LlmConfig;

/// Tokens this close to expiry are refreshed before use.
const TOKEN_REFRESH_MARGIN_MS: i64 = 60_000;

#[derive(Serialize, Deserialize)]
struct GigaChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct GigaChatRequest {
    model: String,
    messages: Vec<GigaChatMessage>,
}

#[derive(Deserialize)]
struct GigaChatResponse {
    choices: Vec<GigaChatChoice>,
}

#[derive(Deserialize)]
struct GigaChatChoice {
    message: GigaChatMessage,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Epoch milliseconds.
    expires_at: i64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Option<i64>,
}

impl AccessToken {
    fn is_fresh(&self, now_ms: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now_ms + TOKEN_REFRESH_MARGIN_MS < expires_at,
            None => true,
        }
    }
}

/// Resolves the Basic authorization key, either given directly or derived
/// from a client id and secret.
fn basic_auth_key(config: &LlmConfig) -> Option<String> {
    if let Some(credentials) = &config.credentials {
        return Some(credentials.clone());
    }
    match (&config.client_id, &config.client_secret) {
        (Some(id), Some(secret)) => Some(STANDARD.encode(format!("{}:{}", id, secret))),
        _ => None,
    }
}

pub struct GigaChatClient {
    http: HttpClient,
    auth_key: Option<String>,
    scope: String,
    model: String,
    base_url: String,
    auth_url: String,
    token: Mutex<Option<AccessToken>>,
}

impl GigaChatClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        if !config.verify_ssl_certs {
            warn!("TLS certificate verification toward GigaChat is disabled");
        }
        if !config.has_auth() {
            warn!("No GigaChat credentials configured; chat requests will fail");
        }

        let http = HttpClient::builder()
            .danger_accept_invalid_certs(!config.verify_ssl_certs)
            .build()
            .map_err(ProviderError::Client)?;

        let token = config.access_token.clone().map(|value| AccessToken {
            value,
            expires_at: None,
        });

        Ok(Self {
            http,
            auth_key: basic_auth_key(config),
            scope: config.scope.clone(),
            model: config.completion_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_url: config.auth_url.clone(),
            token: Mutex::new(token),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        url: &str,
        request: RequestBuilder
    ) -> Result<T, ProviderError> {
        let resp = request.send().await.map_err(|source| ProviderError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| ProviderError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(ProviderError::Status { url: url.to_string(), status, body });
        }

        serde_json::from_str::<T>(&body).map_err(|e| ProviderError::Malformed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// GigaChat hands out the Basic key already encoded, so it is sent verbatim.
    async fn fetch_token(&self, auth_key: &str) -> Result<AccessToken, ProviderError> {
        info!("Requesting GigaChat access token (scope {})", self.scope);
        let request = self.http
            .post(&self.auth_url)
            .header(ACCEPT, "application/json")
            .header("RqUID", Uuid::new_v4().to_string())
            .header(AUTHORIZATION, format!("Basic {}", auth_key))
            .form(&[("scope", self.scope.as_str())]);

        let resp: TokenResponse = Self::send_json(&self.auth_url, request).await?;
        Ok(AccessToken {
            value: resp.access_token,
            expires_at: Some(resp.expires_at),
        })
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.token.lock().await;
        let now_ms = Utc::now().timestamp_millis();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now_ms)) {
            return Ok(token.value.clone());
        }

        let auth_key = self.auth_key.as_deref().ok_or(ProviderError::MissingCredentials)?;
        let token = self.fetch_token(auth_key).await?;
        debug!("GigaChat access token refreshed, expires at {:?}", token.expires_at);
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Drops the cached token, unless another request already replaced the
    /// one that was rejected.
    async fn invalidate_token(&self, rejected: &str) {
        if self.auth_key.is_none() {
            return;
        }
        let mut cached = self.token.lock().await;
        if cached.as_ref().is_some_and(|token| token.value == rejected) {
            cached.take();
        }
    }
}

#[async_trait]
impl ChatClient for GigaChatClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ProviderError> {
        let token = self.access_token().await?;
        let url = format!("{}/chat/completions", self.base_url);
        let req = GigaChatRequest {
            model: self.model.clone(),
            messages: vec![GigaChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let request = self.http
            .post(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&token)
            .json(&req);

        let result = Self::send_json::<GigaChatResponse>(&url, request).await;
        if let Err(ProviderError::Status { status, .. }) = &result {
            if *status == StatusCode::UNAUTHORIZED {
                warn!("GigaChat rejected the access token; it will be refreshed on the next request");
                self.invalidate_token(&token).await;
            }
        }

        result?.choices
            .into_iter()
            .next()
            .map(|choice| CompletionResponse { response: choice.message.content })
            .ok_or(ProviderError::EmptyCompletion)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}

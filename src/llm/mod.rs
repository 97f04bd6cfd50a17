pub mod chat;

use crate::cli::Args;

pub const DEFAULT_MODEL: &str = "GigaChat-2";
pub const DEFAULT_SCOPE: &str = "GIGACHAT_API_PERS";
pub const DEFAULT_BASE_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
pub const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";

/// Process-wide provider settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub credentials: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub scope: String,
    pub completion_model: String,
    pub base_url: String,
    pub auth_url: String,
    pub verify_ssl_certs: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            client_id: None,
            client_secret: None,
            access_token: None,
            scope: DEFAULT_SCOPE.to_string(),
            completion_model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            verify_ssl_certs: false,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

impl LlmConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            credentials: non_empty(&args.gigachat_credentials),
            client_id: non_empty(&args.gigachat_client_id),
            client_secret: non_empty(&args.gigachat_client_secret),
            access_token: non_empty(&args.gigachat_access_token),
            scope: args.gigachat_scope.clone(),
            completion_model: args.gigachat_model.clone(),
            base_url: args.gigachat_base_url.clone(),
            auth_url: args.gigachat_auth_url.clone(),
            verify_ssl_certs: args.gigachat_verify_ssl_certs,
        }
    }

    pub fn has_auth(&self) -> bool {
        self.access_token.is_some() ||
            self.credentials.is_some() ||
            (self.client_id.is_some() && self.client_secret.is_some())
    }
}

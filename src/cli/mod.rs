use clap::Parser;

use crate::llm::{ DEFAULT_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SCOPE };

/// Origins every deployment accepts in addition to `FRONTEND_URL`.
pub const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3001", "http://localhost:3000"];

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Address the HTTP server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value = "5001")]
    pub port: u16,

    /// Deployment environment. Anything other than "production" turns on debug mode.
    #[arg(long, env = "FLASK_ENV")]
    pub flask_env: Option<String>,

    /// Production front-end origin, added to the CORS allow-list when set.
    #[arg(long, env = "FRONTEND_URL", default_value = "")]
    pub frontend_url: String,

    // --- GigaChat Provider Args ---
    /// Authorization key issued by GigaChat (base64 of client_id:client_secret).
    #[arg(long, env = "GIGACHAT_CREDENTIALS", hide_env_values = true)]
    pub gigachat_credentials: Option<String>,

    /// Client id, used together with --gigachat-client-secret when no credentials are given.
    #[arg(long, env = "GIGACHAT_CLIENT_ID")]
    pub gigachat_client_id: Option<String>,

    /// Client secret, used together with --gigachat-client-id.
    #[arg(long, env = "GIGACHAT_CLIENT_SECRET", hide_env_values = true)]
    pub gigachat_client_secret: Option<String>,

    /// Pre-issued access token. Skips the OAuth exchange.
    #[arg(long, env = "GIGACHAT_ACCESS_TOKEN", hide_env_values = true)]
    pub gigachat_access_token: Option<String>,

    /// OAuth scope (GIGACHAT_API_PERS, GIGACHAT_API_B2B, GIGACHAT_API_CORP)
    #[arg(long, env = "GIGACHAT_SCOPE", default_value = DEFAULT_SCOPE)]
    pub gigachat_scope: String,

    /// Model name for chat completion.
    #[arg(long, env = "GIGACHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub gigachat_model: String,

    /// Base URL of the GigaChat REST API.
    #[arg(long, env = "GIGACHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gigachat_base_url: String,

    /// OAuth endpoint issuing access tokens.
    #[arg(long, env = "GIGACHAT_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub gigachat_auth_url: String,

    /// Verify the provider's TLS certificates. Off by default since GigaChat is
    /// served under the Russian NUCA root, which is rarely installed.
    #[arg(long, env = "GIGACHAT_VERIFY_SSL_CERTS", default_value = "false")]
    pub gigachat_verify_ssl_certs: bool,

    // --- TLS Args ---
    /// Optional path to the TLS certificate file (PEM format) for serving HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for serving HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    pub fn is_debug(&self) -> bool {
        self.flask_env.as_deref() != Some("production")
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        LOCAL_ORIGINS
            .iter()
            .map(|origin| origin.to_string())
            .chain(Some(self.frontend_url.trim().to_string()))
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

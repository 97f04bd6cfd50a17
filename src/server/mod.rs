pub mod api;

use crate::agent::AIAgent;
use axum_server::tls_rustls::RustlsConfig;
use crate::cli::Args;
use log::{ error, info };
use std::error::Error;
use std::net::SocketAddr;

pub struct Server {
    agent: AIAgent,
    args: Args,
}

impl Server {
    pub fn new(agent: AIAgent, args: Args) -> Self {
        Self { agent, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.args.server_addr().parse::<SocketAddr>()?;
        let origins = self.args.allowed_origins();
        info!("Allowed CORS origins: {:?}", origins);
        let app = api::router(self.agent.clone(), &origins);

        if self.args.enable_tls {
            let (cert_path, key_path) = match (&self.args.tls_cert_path, &self.args.tls_key_path) {
                (Some(cert), Some(key)) => (cert, key),
                _ => {
                    error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
                    return Err("TLS enabled without cert/key".into());
                }
            };
            info!("TLS enabled. Loading certificate from '{}' and key from '{}'", cert_path, key_path);
            let tls_config = RustlsConfig::from_pem_file(cert_path, key_path).await?;

            info!("Backend will run on https://{}", addr);
            axum_server::bind_rustls(addr, tls_config).serve(app.into_make_service()).await?;
        } else {
            let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                format!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e)
            })?;
            info!("Backend will run on http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }

        Ok(())
    }
}

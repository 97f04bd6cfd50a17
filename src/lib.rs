pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod models;
pub mod server;

use agent::AIAgent;
use cli::Args;
use llm::chat::new_client as new_chat_client;
use llm::LlmConfig;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let llm_config = LlmConfig::from_args(&args);

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr());
    info!("Debug Mode: {}", args.is_debug());
    info!("Frontend URL: {}", if args.frontend_url.is_empty() { "(not set)" } else { args.frontend_url.as_str() });
    info!("GigaChat Model: {}", llm_config.completion_model);
    info!("GigaChat Scope: {}", llm_config.scope);
    info!("GigaChat Base URL: {}", llm_config.base_url);
    info!("GigaChat Auth Configured: {}", llm_config.has_auth());
    info!("GigaChat Verify SSL: {}", llm_config.verify_ssl_certs);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let chat_client = new_chat_client(&llm_config)?;
    let agent = AIAgent::new(chat_client);
    let server = Server::new(agent, args);
    server.run().await?;

    Ok(())
}

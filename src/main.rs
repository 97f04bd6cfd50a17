use clap::Parser;
use dotenv::dotenv;
use gigachat_relay::cli::Args;
use log::info;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = Args::parse();
    let default_level = if args.is_debug() { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    info!("Starting GigaChat relay backend...");
    gigachat_relay::run(args).await
}

mod agent;
mod config;
mod dispatcher;
mod error;
mod hotel_client;
mod llm_client;
mod prompt;
mod server;
mod session;
mod tool_registry;
mod types;
mod utils;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use agent::AgentOptions;
use config::Config;
use hotel_client::HotelClient;
use llm_client::LlmClient;
use server::ServerState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hotel_concierge=info,tower_http=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.port,
        model = %cfg.model,
        base_url = %cfg.openai_base_url,
        "starting hotel concierge"
    );

    let llm = LlmClient::new(
        cfg.openai_base_url.clone(),
        cfg.openai_api_key.clone(),
        cfg.model.clone(),
        cfg.llm_timeout,
    )?;
    let hotel = HotelClient::new(cfg.hotel_bearer_token.clone())?;

    let opts = AgentOptions {
        step_timeout: cfg.llm_timeout,
        ..AgentOptions::default()
    };
    let state = Arc::new(ServerState::new(Arc::new(llm), Arc::new(hotel), opts));

    server::serve(cfg.port, state, cfg.cors_allowed_origins.as_deref()).await
}

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agent::{Agent, AgentOptions, LlmClientTrait};
use crate::hotel_client::HotelApi;
use crate::tool_registry::ToolRegistry;

pub mod chat;
pub mod error;
pub mod hotel;

pub(crate) struct ServerState {
    pub(crate) agent: Agent,
    pub(crate) llm: Arc<dyn LlmClientTrait>,
    pub(crate) hotel: Arc<dyn HotelApi>,
}

impl ServerState {
    pub(crate) fn new(
        llm: Arc<dyn LlmClientTrait>,
        hotel: Arc<dyn HotelApi>,
        opts: AgentOptions,
    ) -> Self {
        let agent = Agent::new(llm.clone(), hotel.clone(), ToolRegistry::new(), opts);
        Self { agent, llm, hotel }
    }
}

pub(crate) fn router(state: Arc<ServerState>, cors_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/availability",
            get(hotel::availability_get).post(hotel::availability_post),
        )
        .route("/price", get(hotel::price_get).post(hotel::price_post))
        .route("/chat", post(chat::chat))
        .route("/chatbot", post(chat::chatbot))
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

pub(crate) async fn serve(
    port: u16,
    state: Arc<ServerState>,
    cors_origins: Option<&[String]>,
) -> anyhow::Result<()> {
    let app = router(state, cors_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;
    Ok(())
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origins {
        Some(list) if !list.is_empty() => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            cors.allow_origin(AllowOrigin::list(allowed))
        }
        _ => cors.allow_origin(Any),
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde_json::Value;
use tracing::debug;

use crate::server::ServerState;
use crate::server::error::ApiError;
use crate::tool_registry::HotelTool;
use crate::types::HotelQuery;

pub(crate) async fn availability_get(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<HotelQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    lookup(&state, HotelTool::Availability, from_query(query)).await
}

pub(crate) async fn availability_post(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    lookup(&state, HotelTool::Availability, from_body(&body)).await
}

pub(crate) async fn price_get(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<HotelQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    lookup(&state, HotelTool::Price, from_query(query)).await
}

pub(crate) async fn price_post(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    lookup(&state, HotelTool::Price, from_body(&body)).await
}

fn from_query(query: Result<Query<HotelQuery>, QueryRejection>) -> HotelQuery {
    query.map(|Query(q)| q).unwrap_or_default()
}

// Bodies that are not JSON objects count as empty.
fn from_body(body: &[u8]) -> HotelQuery {
    serde_json::from_slice(body).unwrap_or_default()
}

async fn lookup(
    state: &ServerState,
    tool: HotelTool,
    query: HotelQuery,
) -> Result<Json<Value>, ApiError> {
    let missing = query.missing_fields();
    if !missing.is_empty() {
        debug!(tool = tool.name(), ?missing, "rejecting hotel lookup");
        return Err(ApiError::missing_parameters());
    }
    let result = match tool {
        HotelTool::Availability => state.hotel.availability(&query).await,
        HotelTool::Price => state.hotel.price(&query).await,
    };
    Ok(Json(result))
}

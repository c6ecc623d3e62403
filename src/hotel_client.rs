use crate::config::SecretToken;
use crate::error::HotelApiError;
use crate::tool_registry::HotelTool;
use crate::types::HotelQuery;
use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Duration;
use tracing::{debug, info, warn};

pub const HOTEL_API_ENDPOINT: &str = "https://hotel.dev-maister.gr/hotel_Casa/mcp_server/index.php";
const USER_AGENT: &str = "hotel-concierge/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream availability/price lookups. Implementations never fail: any
/// problem is reported inside the returned JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelApi: Send + Sync {
    async fn availability(&self, query: &HotelQuery) -> Value;
    async fn price(&self, query: &HotelQuery) -> Value;
}

#[derive(Clone)]
pub struct HotelClient {
    endpoint: String,
    bearer_token: SecretToken,
    http: reqwest::Client,
}

impl HotelClient {
    pub fn new(bearer_token: SecretToken) -> anyhow::Result<Self> {
        Self::with_endpoint(HOTEL_API_ENDPOINT.to_string(), bearer_token)
    }

    /// Point the client at a different upstream (used by tests).
    pub fn with_endpoint(endpoint: String, bearer_token: SecretToken) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            endpoint,
            bearer_token,
            http,
        })
    }

    /// Both tools hit the same endpoint; `tool` only labels the logs.
    pub async fn fetch_hotel_data(&self, tool: HotelTool, query: &HotelQuery) -> Value {
        match self.try_fetch(tool, query).await {
            Ok(data) => data,
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "hotel API call failed");
                e.envelope()
            }
        }
    }

    async fn try_fetch(&self, tool: HotelTool, query: &HotelQuery) -> Result<Value, HotelApiError> {
        debug!(
            tool = tool.name(),
            endpoint = %self.endpoint,
            params = ?query,
            "calling hotel API"
        );

        let resp = self
            .http
            .get(&self.endpoint)
            .bearer_auth(self.bearer_token.expose())
            .header(reqwest::header::ACCEPT, "*/*")
            .query(query)
            .send()
            .await
            .map_err(HotelApiError::Transport)?;

        let status = resp.status();
        info!(tool = tool.name(), %status, "hotel API responded");
        if !status.is_success() {
            return Err(HotelApiError::Status(status));
        }

        resp.json::<Value>().await.map_err(HotelApiError::Decode)
    }
}

#[async_trait]
impl HotelApi for HotelClient {
    async fn availability(&self, query: &HotelQuery) -> Value {
        self.fetch_hotel_data(HotelTool::Availability, query).await
    }

    async fn price(&self, query: &HotelQuery) -> Value {
        self.fetch_hotel_data(HotelTool::Price, query).await
    }
}

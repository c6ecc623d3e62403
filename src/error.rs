use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure talking to the hotel endpoint. Never surfaced as an `Err` past
/// the client; it is folded into the JSON error envelope instead.
#[derive(Debug, Error)]
pub enum HotelApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

impl HotelApiError {
    pub fn envelope(&self) -> serde_json::Value {
        serde_json::json!({
            "error": "API call failed",
            "details": self.to_string(),
        })
    }
}

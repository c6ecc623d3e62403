use crate::config::SecretToken;
use crate::types::{Message, ToolSchema};
use crate::utils::clip;
use serde_json::Value;
use tokio::time::Duration;
use tracing::debug;

const ERROR_BODY_CLIP: usize = 500;

#[derive(Clone)]
pub struct LlmClient {
    base_url: String,
    api_key: SecretToken,
    model: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(
        base_url: String,
        api_key: SecretToken,
        model: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(30))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url,
            api_key,
            model,
            http,
        })
    }

    /// One non-streaming chat completion. When `tools` is given and non-empty
    /// the model may answer with a `function_call` instead of text.
    pub async fn complete_chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<Message> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let req = build_request_body(&self.model, messages, tools);

        debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "requesting chat completion"
        );

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.api_key.expose())
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let response_text = resp.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "chat completion failed with status {}: {}",
                status,
                clip(&response_text, ERROR_BODY_CLIP)
            ));
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON response: {}", e))?;
        parse_reply(&response_json)
    }
}

pub(crate) fn build_request_body(
    model: &str,
    messages: &[Message],
    tools: Option<&[ToolSchema]>,
) -> Value {
    let mut req = serde_json::json!({
        "model": model,
        "messages": messages,
    });
    if let Some(tools) = tools.filter(|t| !t.is_empty()) {
        req["functions"] = serde_json::json!(tools);
        req["function_call"] = Value::String("auto".to_string());
    }
    req
}

pub(crate) fn parse_reply(response_json: &Value) -> anyhow::Result<Message> {
    if let Some(error) = response_json.get("error") {
        return Err(anyhow::anyhow!("API error: {}", error));
    }

    let choice = response_json["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .ok_or_else(|| anyhow::anyhow!("No choices in response"))?;

    // Some compatible servers leave out the role on replies
    let mut raw = choice["message"].clone();
    if let Some(fields) = raw.as_object_mut() {
        fields
            .entry("role")
            .or_insert_with(|| Value::String("assistant".to_string()));
    }

    serde_json::from_value(raw).map_err(|e| anyhow::anyhow!("Failed to parse message: {}", e))
}

use crate::hotel_client::HotelApi;
use crate::tool_registry::HotelTool;
use crate::types::{HotelQuery, Message};
use std::sync::Arc;
use tracing::{info, warn};

/// Routes a model-requested function call to the hotel API and wraps the
/// result as a `function` message.
#[derive(Clone)]
pub struct ToolDispatcher {
    hotel: Arc<dyn HotelApi>,
}

impl ToolDispatcher {
    pub fn new(hotel: Arc<dyn HotelApi>) -> Self {
        Self { hotel }
    }

    /// `None` when the reply carries no function call or names a tool we do
    /// not provide.
    pub async fn dispatch(&self, reply: &Message) -> Option<Message> {
        let call = reply.function_call.as_ref()?;

        let Some(tool) = HotelTool::from_name(&call.name) else {
            warn!(tool = %call.name, "model requested unknown tool; ignoring");
            return None;
        };

        let query = decode_arguments(&call.name, &call.arguments);
        info!(tool = tool.name(), "dispatching tool call");

        let result = match tool {
            HotelTool::Availability => self.hotel.availability(&query).await,
            HotelTool::Price => self.hotel.price(&query).await,
        };

        Some(Message::function(tool.name(), result.to_string()))
    }
}

/// Decode-or-default: malformed or empty argument text yields an empty
/// query, and the call goes ahead with whatever is present.
pub fn decode_arguments(tool_name: &str, raw: &str) -> HotelQuery {
    if raw.trim().is_empty() {
        return HotelQuery::default();
    }
    match serde_json::from_str::<HotelQuery>(raw) {
        Ok(query) => query,
        Err(e) => {
            warn!(
                tool = %tool_name,
                error = %e,
                "failed to parse tool arguments; continuing with none"
            );
            HotelQuery::default()
        }
    }
}

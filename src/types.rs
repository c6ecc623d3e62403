use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String, // raw JSON string
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: String, // "system" | "user" | "assistant" | "function"
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: &str) -> Self {
        Self::text("user", content)
    }

    #[cfg(test)]
    pub fn assistant(content: &str) -> Self {
        Self::text("assistant", content)
    }

    /// Result of a dispatched tool, fed back to the model.
    pub fn function(name: &str, content: String) -> Self {
        Message {
            role: "function".to_string(),
            content: Some(content),
            function_call: None,
            name: Some(name.to_string()),
        }
    }

    fn text(role: &str, content: &str) -> Self {
        Message {
            role: role.to_string(),
            content: Some(content.to_string()),
            function_call: None,
            name: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolParameters {
    #[serde(rename = "type")]
    pub kind: String, // "object"
    pub properties: BTreeMap<String, ParameterSpec>,
    pub required: Vec<String>,
}

/// Declared callable operation, sent to the model as a `functions` entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameters,
}

/// Query parameters for the hotel endpoint.
///
/// Every field is optional: tool arguments come from the model and are
/// forwarded as-is, and the HTTP front end validates presence itself.
/// Guest counts are accepted as JSON strings or numbers.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HotelQuery {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub json_key: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub adults: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub kids: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub minors: Option<String>,
}

impl HotelQuery {
    /// Names of required parameters that are absent.
    ///
    /// `json_key`, `start` and `end` must also be non-empty; guest counts
    /// only need to be present, so `"0"` and `""` both pass.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        if !non_empty(&self.json_key) {
            missing.push("json_key");
        }
        if !non_empty(&self.start) {
            missing.push("start");
        }
        if !non_empty(&self.end) {
            missing.push("end");
        }
        if self.adults.is_none() {
            missing.push("adults");
        }
        if self.kids.is_none() {
            missing.push("kids");
        }
        if self.minors.is_none() {
            missing.push("minors");
        }
        missing
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

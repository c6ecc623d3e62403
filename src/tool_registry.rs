use crate::types::{ParameterSpec, ToolParameters, ToolSchema};
use std::collections::BTreeMap;

/// Closed set of tools the model may call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotelTool {
    Availability,
    Price,
}

impl HotelTool {
    pub const ALL: [HotelTool; 2] = [HotelTool::Availability, HotelTool::Price];

    pub fn name(self) -> &'static str {
        match self {
            HotelTool::Availability => "get_hotel_availability",
            HotelTool::Price => "get_hotel_price",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

#[derive(Clone, Debug)]
pub struct ToolRegistry {
    schemas: Vec<ToolSchema>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        // Single source of truth for the "functions" list the model sees
        let schemas = vec![
            hotel_schema(
                HotelTool::Availability,
                "Get hotel room availability for a given date range.",
                "The key for the JSON response, e.g., 'availability'",
            ),
            hotel_schema(
                HotelTool::Price,
                "Get hotel room prices for a given date range.",
                "Must be 'price'",
            ),
        ];
        Self { schemas }
    }

    pub fn schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn hotel_schema(tool: HotelTool, description: &str, json_key_description: &str) -> ToolSchema {
    let params = [
        ("json_key", json_key_description),
        ("start", "Start date YYYY-MM-DD"),
        ("end", "End date YYYY-MM-DD"),
        ("adults", "The total number of adult guests"),
        (
            "kids",
            "The total number of children between 3 and 12 years old",
        ),
        (
            "minors",
            "The total number of children guests below 3 years old",
        ),
    ];

    let properties: BTreeMap<String, ParameterSpec> = params
        .iter()
        .map(|(name, desc)| {
            (
                name.to_string(),
                ParameterSpec {
                    kind: "string".to_string(),
                    description: Some(desc.to_string()),
                },
            )
        })
        .collect();

    ToolSchema {
        name: tool.name().to_string(),
        description: description.to_string(),
        parameters: ToolParameters {
            kind: "object".to_string(),
            properties,
            required: params.iter().map(|(name, _)| name.to_string()).collect(),
        },
    }
}

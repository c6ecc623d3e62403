use crate::dispatcher::{ToolDispatcher, decode_arguments};
use crate::hotel_client::MockHotelApi;
use crate::tool_registry::{HotelTool, ToolRegistry};
use crate::types::{FunctionCall, HotelQuery, Message};
use serde_json::json;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_with_call(name: &str, args: &str) -> Message {
        Message {
            role: "assistant".to_string(),
            content: None,
            function_call: Some(FunctionCall {
                name: name.to_string(),
                arguments: args.to_string(),
            }),
            name: None,
        }
    }

    fn idle_hotel() -> MockHotelApi {
        let mut hotel = MockHotelApi::new();
        hotel.expect_availability().never();
        hotel.expect_price().never();
        hotel
    }

    const FULL_ARGS: &str = r#"{"json_key":"availability","start":"2025-06-01","end":"2025-06-05","adults":"2","kids":"0","minors":"0"}"#;

    #[test]
    fn test_tool_registry_creation() {
        let tools = ToolRegistry::new();
        let names: Vec<&str> = tools.schemas().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["get_hotel_availability", "get_hotel_price"]);

        for schema in tools.schemas() {
            assert_eq!(schema.parameters.kind, "object");
            assert_eq!(
                schema.parameters.required,
                vec!["json_key", "start", "end", "adults", "kids", "minors"]
            );
            assert_eq!(schema.parameters.properties.len(), 6);
            assert!(schema.parameters.properties.values().all(|p| p.kind == "string"));
        }
    }

    #[test]
    fn test_tool_schema_wire_format() {
        let tools = ToolRegistry::new();
        let json = serde_json::to_value(&tools.schemas()[1]).unwrap();
        assert_eq!(json["name"], "get_hotel_price");
        assert_eq!(json["parameters"]["type"], "object");
        assert_eq!(json["parameters"]["properties"]["json_key"]["type"], "string");
        assert_eq!(
            json["parameters"]["properties"]["json_key"]["description"],
            "Must be 'price'"
        );
    }

    #[test]
    fn test_hotel_tool_names_round_trip() {
        for tool in HotelTool::ALL {
            assert_eq!(HotelTool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(HotelTool::from_name("getHotelPrice"), None);
    }

    #[test]
    fn test_decode_arguments_full() {
        let query = decode_arguments("get_hotel_availability", FULL_ARGS);
        assert_eq!(query.json_key.as_deref(), Some("availability"));
        assert_eq!(query.end.as_deref(), Some("2025-06-05"));
        assert!(query.missing_fields().is_empty());
    }

    #[test]
    fn test_decode_arguments_malformed_is_empty() {
        assert_eq!(decode_arguments("x", "{not json"), HotelQuery::default());
        assert_eq!(decode_arguments("x", ""), HotelQuery::default());
        assert_eq!(decode_arguments("x", "null"), HotelQuery::default());
    }

    #[test]
    fn test_decode_arguments_numeric_guest_counts() {
        let query = decode_arguments(
            "get_hotel_price",
            r#"{"json_key":"price","start":"2025-06-01","end":"2025-06-05","adults":2,"kids":0,"minors":0}"#,
        );
        assert_eq!(query.adults.as_deref(), Some("2"));
        assert_eq!(query.kids.as_deref(), Some("0"));
        assert_eq!(query.minors.as_deref(), Some("0"));
    }

    #[test]
    fn test_missing_fields() {
        let query = HotelQuery {
            json_key: Some("availability".to_string()),
            start: Some("".to_string()),
            adults: Some("".to_string()),
            ..HotelQuery::default()
        };
        assert_eq!(query.missing_fields(), vec!["start", "end", "kids", "minors"]);
    }

    #[tokio::test]
    async fn test_dispatch_without_function_call_is_none() {
        let dispatcher = ToolDispatcher::new(Arc::new(idle_hotel()));

        let result = dispatcher.dispatch(&Message::assistant("Which dates?")).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_is_none() {
        let dispatcher = ToolDispatcher::new(Arc::new(idle_hotel()));

        let result = dispatcher
            .dispatch(&reply_with_call("book_room", FULL_ARGS))
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_availability() {
        let mut hotel = MockHotelApi::new();
        hotel
            .expect_availability()
            .withf(|query| {
                query.start.as_deref() == Some("2025-06-01") && query.adults.as_deref() == Some("2")
            })
            .times(1)
            .returning(|_| json!({"rooms_available": true}));
        hotel.expect_price().never();
        let dispatcher = ToolDispatcher::new(Arc::new(hotel));

        let result = dispatcher
            .dispatch(&reply_with_call("get_hotel_availability", FULL_ARGS))
            .await
            .expect("function message");

        assert_eq!(result.role, "function");
        assert_eq!(result.name.as_deref(), Some("get_hotel_availability"));
        let content: serde_json::Value =
            serde_json::from_str(result.content.as_deref().unwrap()).unwrap();
        assert_eq!(content, json!({"rooms_available": true}));
    }

    #[tokio::test]
    async fn test_dispatch_malformed_arguments_still_calls() {
        let mut hotel = MockHotelApi::new();
        hotel
            .expect_price()
            .withf(|query| query.json_key.is_none())
            .times(1)
            .returning(|_| json!({"error": "API call failed", "details": "status 400"}));
        hotel.expect_availability().never();
        let dispatcher = ToolDispatcher::new(Arc::new(hotel));

        let result = dispatcher
            .dispatch(&reply_with_call("get_hotel_price", "{oops"))
            .await
            .expect("function message");

        assert_eq!(result.name.as_deref(), Some("get_hotel_price"));
        assert!(result.content.unwrap().contains("API call failed"));
    }
}

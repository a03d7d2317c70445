use crate::ai_types::{ChatRequest, ContentPart, Message, MessageContent, ToolDefinition};
use crate::client::truncate;

#[test]
fn test_truncate_within_limit() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exceeds_limit() {
    assert_eq!(truncate("hello world", 5), "hello");
}

#[test]
fn test_truncate_unicode_boundary() {
    let s = "привет";
    let result = truncate(s, 3);
    assert_eq!(result, "п");
}

#[test]
fn test_request_omits_unset_fields() {
    let request = ChatRequest::new("m", vec![Message::user("hi")]);
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("tools").is_none());
    assert!(json.get("temperature").is_none());
    assert_eq!(json["messages"][0], serde_json::json!({"role": "user", "content": "hi"}));
}

#[test]
fn test_named_message_serializes_name() {
    let json = serde_json::to_value(Message::user("hi").named("User_Proxy")).unwrap();
    assert_eq!(json["name"], "User_Proxy");
}

#[test]
fn test_tool_message_carries_call_id() {
    let json = serde_json::to_value(Message::tool("call_1", "shipped")).unwrap();
    assert_eq!(json, serde_json::json!({"role": "tool", "content": "shipped", "tool_call_id": "call_1"}));
}

#[test]
fn test_tool_definition_shape() {
    let tool = ToolDefinition::function(
        "get_order_status",
        "Retrieves order status based on orderid",
        serde_json::json!({"type": "object"}),
    );
    let json = serde_json::to_value(&tool).unwrap();
    assert_eq!(json["type"], "function");
    assert_eq!(json["function"]["name"], "get_order_status");
}

#[test]
fn test_parts_text_skips_images() {
    let content = MessageContent::Parts(vec![
        ContentPart::text("look"),
        ContentPart::image("https://img.example.com/a.png"),
        ContentPart::text("here"),
    ]);
    assert_eq!(content.text(), "look\nhere");
}

#[test]
fn test_message_round_trips_null_tool_calls() {
    let message: Message = serde_json::from_value(serde_json::json!({
        "role": "assistant",
        "content": "ok",
        "tool_calls": null
    }))
    .unwrap();
    assert!(message.tool_calls.is_empty());
}

#[test]
fn test_only_gateway_and_rate_limit_statuses_are_retried() {
    let status = |code| crate::LlmError::HttpStatus { code, body: String::new() };
    for code in [408, 429, 500, 502, 503, 504] {
        assert!(status(code).is_transient(), "{code} should be retried");
    }
    for code in [400, 401, 404, 422] {
        assert!(!status(code).is_transient(), "{code} should not be retried");
    }
    assert!(!crate::LlmError::EmptyResponse.is_transient());
}

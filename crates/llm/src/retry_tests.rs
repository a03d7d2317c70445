#[cfg(test)]
mod tests {
    use crate::ai_types::{ChatRequest, Message};
    use crate::client::{ChatModel, LlmClient};
    use crate::error::LlmError;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_server() -> MockServer {
        MockServer::start().await
    }

    fn create_client(server: &MockServer) -> LlmClient {
        LlmClient::new("test-key".to_owned(), server.uri()).unwrap()
    }

    fn create_test_request() -> ChatRequest {
        ChatRequest::new("test-model", vec![Message::user("hello")])
    }

    fn text_reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{
                "message": {
                    "content": content,
                    "role": "assistant"
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let server = setup_mock_server().await;
        let client = create_client(&server);
        let request = create_test_request();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("test response")))
            .mount(&server)
            .await;

        let reply = client.send(&request).await.unwrap();
        assert_eq!(reply.content.as_deref(), Some("test response"));
    }

    #[tokio::test]
    async fn test_tool_call_reply_is_parsed() {
        let server = setup_mock_server().await;
        let client = create_client(&server);
        let request = create_test_request();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "get_order_status",
                                "arguments": "{\"order_id\": 42}"
                            }
                        }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let reply = client.complete(&request).await.unwrap();
        assert!(reply.content.is_none());
        assert_eq!(reply.tool_calls.len(), 1);
        assert_eq!(reply.tool_calls[0].function.name, "get_order_status");
        assert_eq!(reply.tool_calls[0].function.arguments, "{\"order_id\": 42}");
    }

    #[tokio::test]
    async fn test_describe_image_sends_image_part() {
        let server = setup_mock_server().await;
        let client = create_client(&server).with_model("vision-model".to_owned());

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "vision-model",
                "max_tokens": 500,
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "Describe it"},
                        {"type": "image_url", "image_url": {"url": "https://img.example.com/box.jpg"}}
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("a crushed box")))
            .expect(1)
            .mount(&server)
            .await;

        let caption =
            client.describe_image("https://img.example.com/box.jpg", "Describe it").await.unwrap();
        assert_eq!(caption, "a crushed box");
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = setup_mock_server().await;
        let client = create_client(&server);

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let result = client.complete(&create_test_request()).await;
        assert!(matches!(result, Err(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_retry_on_429_then_success() {
        let server = setup_mock_server().await;
        let client = create_client(&server);
        let request = create_test_request();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("success after retry")))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let reply = client.send(&request).await.unwrap();
        assert_eq!(reply.content.as_deref(), Some("success after retry"));
    }

    #[tokio::test]
    async fn test_no_retry_on_401() {
        let server = setup_mock_server().await;
        let client = create_client(&server);
        let request = create_test_request();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.send(&request).await;
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("401"));
        assert!(err_msg.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_all_retries_exhausted() {
        let server = setup_mock_server().await;
        let client = create_client(&server);
        let request = create_test_request();

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .expect(4)
            .mount(&server)
            .await;

        let result = client.send(&request).await;
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("503"));
        assert!(err_msg.contains("Service Unavailable"));
    }
}

use std::sync::{Arc, Mutex};

use serde_json::json;
use tprovider::gemini::{
    GeminiAdapter, GeminiTransport, GenerateContentRequest, GenerateContentResponse,
};
use tprovider::openai::{OpenAiAdapter, OpenAiTransport, ResponsesRequest, ResponsesResponse};
use tprovider::{
    BodyRequest, ProviderAdapter, ProviderError, ProviderFuture, SecretString,
    SecureCredentialManager, ToolOutcome,
};

#[derive(Debug)]
struct OneShotOpenAi(Mutex<Option<ResponsesResponse>>);

impl OpenAiTransport for OneShotOpenAi {
    fn create_response<'a>(
        &'a self,
        _request: &'a ResponsesRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ResponsesResponse, ProviderError>> {
        Box::pin(async move {
            self.0
                .lock()
                .expect("lock")
                .take()
                .ok_or_else(|| ProviderError::transport("exhausted"))
        })
    }
}

#[derive(Debug)]
struct OneShotGemini(Mutex<Option<GenerateContentResponse>>);

impl GeminiTransport for OneShotGemini {
    fn generate_content<'a>(
        &'a self,
        _request: &'a GenerateContentRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<GenerateContentResponse, ProviderError>> {
        Box::pin(async move {
            self.0
                .lock()
                .expect("lock")
                .take()
                .ok_or_else(|| ProviderError::transport("exhausted"))
        })
    }
}

/// Extending a decoded state must match extending the state it came from.
async fn assert_round_trip_law<A: ProviderAdapter>(adapter: &A, model: &str)
where
    A::State: PartialEq,
{
    let mut state = adapter
        .body(BodyRequest::new(model, "double 21").with_system_prompt("use tools"))
        .expect("body");
    let turn = adapter.round_trip(&mut state).await.expect("round trip");
    let call = turn.calls.first().expect("scripted call");
    adapter
        .append_outcome(&mut state, call, &ToolOutcome::Success(b"{\"n\":42}".to_vec()))
        .expect("append");

    let encoded = adapter.encode_state(&state).expect("encode");
    let decoded = adapter.decode_state(&encoded).expect("decode");
    let re_encoded = adapter.encode_state(&decoded).expect("re-encode");
    assert_eq!(encoded, re_encoded);

    let from_original = adapter
        .body(
            BodyRequest::new(model, "and again")
                .with_system_prompt("use tools")
                .with_history(&encoded),
        )
        .expect("extend original");
    let from_decoded = adapter
        .body(
            BodyRequest::new(model, "and again")
                .with_system_prompt("use tools")
                .with_history(&re_encoded),
        )
        .expect("extend decoded");
    assert_eq!(from_original, from_decoded);
}

#[tokio::test]
async fn openai_state_survives_serialization() {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_openai_api_key("sk-test").expect("key");
    let response = serde_json::from_value(json!({
        "status": "completed",
        "output": [
            {"type": "message", "id": "msg_1", "role": "assistant", "status": "completed",
             "content": [{"type": "output_text", "text": "let me check", "annotations": []}]},
            {"type": "function_call", "id": "fc_1", "call_id": "call_1", "name": "double",
             "arguments": "{\"n\":21}", "status": "completed"}
        ]
    }))
    .expect("fixture");
    let adapter = OpenAiAdapter::new(
        credentials,
        Arc::new(OneShotOpenAi(Mutex::new(Some(response)))),
    );

    assert_round_trip_law(&adapter, "gpt-4o").await;
}

#[tokio::test]
async fn gemini_state_survives_serialization() {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_gemini_api_key("gemini-test").expect("key");
    let response = serde_json::from_value(json!({
        "candidates": [{"content": {"role": "model", "parts": [
            {"text": "let me check"},
            {"functionCall": {"name": "double", "args": {"n": 21}}, "thoughtSignature": "sig"}
        ]}, "finishReason": "STOP"}]
    }))
    .expect("fixture");
    let adapter = GeminiAdapter::new(
        credentials,
        Arc::new(OneShotGemini(Mutex::new(Some(response)))),
    );

    assert_round_trip_law(&adapter, "gemini-2.0-flash").await;
}

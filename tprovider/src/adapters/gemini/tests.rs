//! Focused unit tests for Gemini adapter internals.

#![cfg(test)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::{
    BodyRequest, ObjectSchema, PendingCall, ProviderAdapter, ProviderError, ProviderErrorKind,
    ProviderFuture, SecretString, SecureCredentialManager, ToolDefinition, ToolOutcome,
};

use super::adapter::{GeminiAdapter, fold_response};
use super::transport::GeminiTransport;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};

#[derive(Debug, Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<GenerateContentResponse>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl GeminiTransport for ScriptedTransport {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<GenerateContentResponse, ProviderError>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request.clone());
            self.responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .ok_or_else(|| ProviderError::transport("no scripted response left"))
        })
    }
}

fn adapter_with(transport: Arc<ScriptedTransport>) -> GeminiAdapter {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_gemini_api_key("gemini-test")
        .expect("key should be accepted");
    GeminiAdapter::new(credentials, transport)
}

fn response(value: serde_json::Value) -> GenerateContentResponse {
    serde_json::from_value(value).expect("response fixture")
}

#[test]
fn body_builds_wire_shape_without_model_field() {
    let adapter = adapter_with(Arc::new(ScriptedTransport::default()));
    let schema = ObjectSchema::new().with_property("answer", json!({"type": "string"}), true);

    let state = adapter
        .body(
            BodyRequest::new("gemini-2.0-flash", "hello")
                .with_system_prompt("be brief")
                .with_output_schema(Some(&schema)),
        )
        .expect("body should build");

    assert_eq!(state.model, "gemini-2.0-flash");
    assert_eq!(
        serde_json::to_value(&state).expect("serialize"),
        json!({
            "system_instruction": {"parts": [{"text": "be brief"}]},
            "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "object",
                    "properties": {"answer": {"type": "string"}},
                    "required": ["answer"]
                }
            }
        })
    );
}

#[test]
fn body_extends_decoded_history_and_restores_model() {
    let adapter = adapter_with(Arc::new(ScriptedTransport::default()));
    let first = adapter
        .body(BodyRequest::new("gemini-2.0-flash", "first"))
        .expect("first body");
    let history = adapter.encode_state(&first).expect("encode");

    let second = adapter
        .body(BodyRequest::new("gemini-2.0-flash-lite", "second").with_history(&history))
        .expect("second body");

    assert_eq!(second.model, "gemini-2.0-flash-lite");
    assert_eq!(
        second.contents,
        vec![Content::user_text("first"), Content::user_text("second")]
    );
    assert!(second.system_instruction.is_none());
}

#[test]
fn attach_tools_groups_declarations_and_omits_empty_sets() {
    let adapter = adapter_with(Arc::new(ScriptedTransport::default()));
    let mut state = GenerateContentRequest::default();
    let schema = ObjectSchema::new().with_property("n", json!({"type": "integer"}), true);

    adapter.attach_tools(
        &mut state,
        &[ToolDefinition::new("double", "doubles n", schema)],
    );
    assert_eq!(
        serde_json::to_value(&state.tools).expect("serialize"),
        json!([{"functionDeclarations": [{
            "name": "double",
            "description": "doubles n",
            "parameters": {
                "type": "object",
                "properties": {"n": {"type": "integer"}},
                "required": ["n"]
            }
        }]}])
    );

    adapter.attach_tools(&mut state, &[]);
    assert!(
        serde_json::to_value(&state)
            .expect("serialize")
            .get("tools")
            .is_none()
    );
}

#[test]
fn fold_concatenates_text_and_skips_thoughts() {
    let mut state = GenerateContentRequest::default();
    let turn = fold_response(
        &mut state,
        response(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "Hello, "},
                    {"text": "world"}
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2, "totalTokenCount": 5}
        })),
    )
    .expect("fold should succeed");

    assert!(turn.is_final());
    assert_eq!(turn.text, "Hello, world");
    assert_eq!(state.contents.len(), 1);
}

#[test]
fn fold_extracts_function_calls_and_defaults_missing_args() {
    let mut state = GenerateContentRequest::default();
    let turn = fold_response(
        &mut state,
        response(json!({
            "candidates": [{"content": {"role": "model", "parts": [
                {"functionCall": {"name": "double", "args": {"n": 21}}},
                {"functionCall": {"id": "fc_2", "name": "now"}}
            ]}}]
        })),
    )
    .expect("fold should succeed");

    assert!(!turn.completed);
    assert_eq!(turn.calls[0], PendingCall::new("double", "{\"n\":21}"));
    assert_eq!(turn.calls[1], PendingCall::new("now", "{}").with_call_id("fc_2"));
}

#[test]
fn fold_rejects_missing_candidates_and_content() {
    let cases = [
        json!({"candidates": []}),
        json!({"promptFeedback": {"blockReason": "SAFETY"}}),
        json!({"candidates": [{"finishReason": "SAFETY"}]}),
    ];

    for case in cases {
        let mut state = GenerateContentRequest::default();
        let error = fold_response(&mut state, response(case)).expect_err("fold should fail");
        assert_eq!(error.kind, ProviderErrorKind::Protocol);
        assert!(state.contents.is_empty());
    }
}

#[test]
fn fold_rejects_candidate_without_parts_and_keeps_state_clean() {
    let mut state = GenerateContentRequest::default();
    let error = fold_response(
        &mut state,
        response(json!({
            "candidates": [{"content": {"role": "model"}, "finishReason": "MAX_TOKENS"}]
        })),
    )
    .expect_err("empty candidate should fail");

    assert_eq!(error.kind, ProviderErrorKind::Protocol);
    assert!(error.message.contains("MAX_TOKENS"));
    assert!(state.contents.is_empty());
}

#[test]
fn append_outcome_groups_results_into_one_user_turn() {
    let adapter = adapter_with(Arc::new(ScriptedTransport::default()));
    let mut state = GenerateContentRequest::default();
    state.contents.push(Content {
        role: Some("model".to_string()),
        parts: vec![Part::text("calling tools")],
    });

    adapter
        .append_outcome(
            &mut state,
            &PendingCall::new("double", "{}"),
            &ToolOutcome::Success(b"{\"n\":42}".to_vec()),
        )
        .expect("append success");
    adapter
        .append_outcome(
            &mut state,
            &PendingCall::new("save", "{}"),
            &ToolOutcome::failure("disk full"),
        )
        .expect("append failure");

    assert_eq!(state.contents.len(), 2);
    assert_eq!(
        serde_json::to_value(&state.contents[1]).expect("serialize"),
        json!({"role": "user", "parts": [
            {"functionResponse": {"name": "double", "response": {"n": 42}}},
            {"functionResponse": {"name": "save", "response": {"success": false, "reason": "disk full"}}}
        ]})
    );
}

#[tokio::test]
async fn round_trip_sends_state_and_folds_reply() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .responses
        .lock()
        .expect("responses lock")
        .push_back(response(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "hi"}]}}]
        })));
    let adapter = adapter_with(transport.clone());
    let mut state = adapter
        .body(BodyRequest::new("gemini-2.0-flash", "hello"))
        .expect("body");

    let turn = adapter.round_trip(&mut state).await.expect("round trip");

    assert_eq!(turn.text, "hi");
    assert_eq!(state.contents.len(), 2);
    let requests = transport.requests.lock().expect("requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "gemini-2.0-flash");
}

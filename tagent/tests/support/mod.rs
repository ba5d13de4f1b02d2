//! Fake transports, stores, and hooks shared by the agent integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tagent::AgentHooks;
use tcommon::{BoxFuture, ConversationId};
use tmemory::{HistoryStore, MemoryError};
use tprovider::gemini::{
    GeminiAdapter, GeminiTransport, GenerateContentRequest, GenerateContentResponse,
};
use tprovider::openai::{OpenAiAdapter, OpenAiTransport, ResponsesRequest, ResponsesResponse};
use tprovider::{ProviderError, ProviderFuture, SecretString, SecureCredentialManager};

/// Replays scripted Responses API payloads and records every request.
#[derive(Debug, Default)]
pub struct ScriptedOpenAi {
    responses: Mutex<VecDeque<Value>>,
    repeat: Option<Value>,
    requests: Mutex<Vec<ResponsesRequest>>,
}

impl ScriptedOpenAi {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// Answers every request with `response`.
    pub fn repeating(response: Value) -> Self {
        Self {
            repeat: Some(response),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<ResponsesRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl OpenAiTransport for ScriptedOpenAi {
    fn create_response<'a>(
        &'a self,
        request: &'a ResponsesRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ResponsesResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push(request.clone());
            let next = self
                .responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .or_else(|| self.repeat.clone())
                .ok_or_else(|| ProviderError::transport("no scripted response left"))?;
            Ok(serde_json::from_value(next).expect("scripted response"))
        })
    }
}

/// Replays scripted generateContent payloads and records every request.
#[derive(Debug, Default)]
pub struct ScriptedGemini {
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedGemini {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl GeminiTransport for ScriptedGemini {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<GenerateContentResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push(request.clone());
            let next = self
                .responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .ok_or_else(|| ProviderError::transport("no scripted response left"))?;
            Ok(serde_json::from_value(next).expect("scripted response"))
        })
    }
}

/// Fails the test if any request reaches the network.
#[derive(Debug, Default)]
pub struct PanickingTransport;

impl OpenAiTransport for PanickingTransport {
    fn create_response<'a>(
        &'a self,
        _request: &'a ResponsesRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ResponsesResponse, ProviderError>> {
        panic!("validation must fail before any request is sent")
    }
}

pub fn openai_adapter(transport: Arc<dyn OpenAiTransport>) -> OpenAiAdapter {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_openai_api_key("sk-test")
        .expect("key should be accepted");
    OpenAiAdapter::new(credentials, transport)
}

pub fn gemini_adapter(transport: Arc<dyn GeminiTransport>) -> GeminiAdapter {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_gemini_api_key("gemini-test")
        .expect("key should be accepted");
    GeminiAdapter::new(credentials, transport)
}

pub fn openai_call(call_id: &str, name: &str, arguments: Value) -> Value {
    json!({
        "id": format!("resp_{call_id}"),
        "status": "completed",
        "output": [{
            "type": "function_call",
            "id": format!("fc_{call_id}"),
            "call_id": call_id,
            "name": name,
            "arguments": arguments.to_string(),
            "status": "completed"
        }]
    })
}

pub fn openai_answer(text: &str) -> Value {
    json!({
        "id": "resp_final",
        "status": "completed",
        "output": [{
            "type": "message",
            "id": "msg_final",
            "role": "assistant",
            "status": "completed",
            "content": [{ "type": "output_text", "text": text, "annotations": [] }]
        }]
    })
}

pub fn gemini_call(name: &str, args: Value) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "functionCall": { "name": name, "args": args } }]
            },
            "finishReason": "STOP"
        }]
    })
}

pub fn gemini_answer(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// A store whose operations always fail with a storage error.
#[derive(Debug, Default)]
pub struct BrokenStore;

impl HistoryStore for BrokenStore {
    fn save<'a>(
        &'a self,
        _id: &'a ConversationId,
        _blob: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move { Err(MemoryError::storage("disk full")) })
    }

    fn retrieve<'a>(
        &'a self,
        _id: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Vec<u8>, MemoryError>> {
        Box::pin(async move { Err(MemoryError::storage("database offline")) })
    }
}

#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub save_failures: Mutex<Vec<String>>,
    pub tool_failures: Mutex<Vec<String>>,
}

impl AgentHooks for RecordingHooks {
    fn on_tool_failure(
        &self,
        _conversation_id: &ConversationId,
        call: &tprovider::PendingCall,
        error: &ttooling::ToolError,
    ) {
        self.tool_failures
            .lock()
            .expect("tool failures lock")
            .push(format!("{}:{}", call.name, error.message));
    }

    fn on_history_save_failure(&self, conversation_id: &ConversationId, reason: &str) {
        self.save_failures
            .lock()
            .expect("save failures lock")
            .push(format!("{conversation_id}:{reason}"));
    }
}

use std::sync::Arc;

use serde_json::Value;

use crate::{
    BodyRequest, PendingCall, Provider, ProviderAdapter, ProviderError, ProviderFuture,
    SecureCredentialManager, ToolDefinition, ToolOutcome, TurnOutput,
};

use super::transport::OpenAiTransport;
use super::types::{
    ContentPart, FunctionCallOutputItem, FunctionTool, ResponseItem, ResponsesRequest,
    ResponsesResponse, TextConfig,
};

const STATUS_COMPLETED: &str = "completed";
const STATUS_FAILED: &str = "failed";

#[derive(Clone)]
pub struct OpenAiAdapter {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiAdapter {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl ProviderAdapter for OpenAiAdapter {
    type State = ResponsesRequest;

    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn body(&self, request: BodyRequest<'_>) -> Result<ResponsesRequest, ProviderError> {
        request.validate()?;

        let mut state = if request.history.is_empty() {
            ResponsesRequest::default()
        } else {
            self.decode_state(request.history)?
        };

        state.model = request.model.to_string();
        state.instructions = request.system_prompt.to_string();
        state.text = request.output_schema.map(TextConfig::json_schema);
        state.input.push(ResponseItem::user_text(request.user_input));
        Ok(state)
    }

    fn attach_tools(&self, state: &mut ResponsesRequest, tools: &[ToolDefinition]) {
        state.tools = tools.iter().map(FunctionTool::from).collect();
    }

    fn round_trip<'a>(
        &'a self,
        state: &'a mut ResponsesRequest,
    ) -> ProviderFuture<'a, Result<TurnOutput, ProviderError>> {
        Box::pin(async move {
            let api_key = self.credentials.require_api_key(Provider::OpenAi)?;
            let response = self.transport.create_response(state, &api_key).await?;
            fold_response(state, response)
        })
    }

    fn append_outcome(
        &self,
        state: &mut ResponsesRequest,
        call: &PendingCall,
        outcome: &ToolOutcome,
    ) -> Result<(), ProviderError> {
        let call_id = call.call_id.clone().ok_or_else(|| {
            ProviderError::protocol(format!("function call '{}' has no call_id", call.name))
        })?;

        state
            .input
            .push(ResponseItem::FunctionCallOutput(FunctionCallOutputItem {
                call_id,
                output: outcome.to_text(),
            }));
        Ok(())
    }
}

/// Appends every response item to the request input and classifies the turn.
pub(crate) fn fold_response(
    state: &mut ResponsesRequest,
    response: ResponsesResponse,
) -> Result<TurnOutput, ProviderError> {
    if response.status.as_deref() == Some(STATUS_FAILED) {
        let reason = response
            .error
            .map(|error| error.message)
            .unwrap_or_else(|| "no error details".to_string());
        return Err(ProviderError::protocol(format!("response failed: {reason}")));
    }

    let output = response
        .output
        .ok_or_else(|| ProviderError::protocol("response did not include output"))?;

    let mut turn = TurnOutput::default();
    for raw in output {
        let item = parse_output_item(raw)?;
        match &item {
            ResponseItem::Message(message) => {
                for part in &message.content {
                    match part {
                        ContentPart::OutputText { text, .. } => turn.text.push_str(text),
                        ContentPart::Refusal { refusal } => {
                            return Err(ProviderError::protocol(format!(
                                "model refused to answer: {refusal}"
                            )));
                        }
                        ContentPart::InputText { .. } => {
                            return Err(ProviderError::protocol(
                                "response message carried input_text content",
                            ));
                        }
                    }
                }
            }
            ResponseItem::FunctionCall(call) => {
                turn.calls.push(
                    PendingCall::new(call.name.clone(), call.arguments.clone().into_bytes())
                        .with_call_id(call.call_id.clone()),
                );
            }
            ResponseItem::Reasoning(_) => {}
            ResponseItem::FunctionCallOutput(_) => {
                return Err(ProviderError::protocol(
                    "response carried a function_call_output item",
                ));
            }
        }
        state.input.push(item);
    }

    turn.completed = response.status.as_deref() == Some(STATUS_COMPLETED);
    Ok(turn)
}

fn parse_output_item(raw: Value) -> Result<ResponseItem, ProviderError> {
    let kind = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if !ResponseItem::KNOWN_OUTPUT_TYPES.contains(&kind.as_str()) {
        return Err(ProviderError::protocol(format!(
            "unrecognized output item type '{kind}'"
        )));
    }

    serde_json::from_value(raw).map_err(|error| {
        ProviderError::protocol(format!("malformed '{kind}' output item: {error}"))
    })
}

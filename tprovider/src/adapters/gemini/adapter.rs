use std::sync::Arc;

use serde_json::Value;

use crate::{
    BodyRequest, PendingCall, Provider, ProviderAdapter, ProviderError, ProviderFuture,
    SecureCredentialManager, ToolDefinition, ToolOutcome, TurnOutput,
};

use super::transport::GeminiTransport;
use super::types::{
    Content, FunctionDeclaration, FunctionResponse, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part, ROLE_MODEL, ToolDeclarations,
};

#[derive(Clone)]
pub struct GeminiAdapter {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn GeminiTransport>,
}

impl GeminiAdapter {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn GeminiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl ProviderAdapter for GeminiAdapter {
    type State = GenerateContentRequest;

    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn body(&self, request: BodyRequest<'_>) -> Result<GenerateContentRequest, ProviderError> {
        request.validate()?;

        let mut state = if request.history.is_empty() {
            GenerateContentRequest::default()
        } else {
            self.decode_state(request.history)?
        };

        state.model = request.model.to_string();
        state.system_instruction = if request.system_prompt.is_empty() {
            None
        } else {
            Some(Content::instruction(request.system_prompt))
        };
        state.generation_config = request.output_schema.map(GenerationConfig::json_schema);
        state.contents.push(Content::user_text(request.user_input));
        Ok(state)
    }

    fn attach_tools(&self, state: &mut GenerateContentRequest, tools: &[ToolDefinition]) {
        state.tools = if tools.is_empty() {
            Vec::new()
        } else {
            vec![ToolDeclarations {
                function_declarations: tools.iter().map(FunctionDeclaration::from).collect(),
            }]
        };
    }

    fn round_trip<'a>(
        &'a self,
        state: &'a mut GenerateContentRequest,
    ) -> ProviderFuture<'a, Result<TurnOutput, ProviderError>> {
        Box::pin(async move {
            let api_key = self.credentials.require_api_key(Provider::Gemini)?;
            let response = self.transport.generate_content(state, &api_key).await?;
            fold_response(state, response)
        })
    }

    fn append_outcome(
        &self,
        state: &mut GenerateContentRequest,
        call: &PendingCall,
        outcome: &ToolOutcome,
    ) -> Result<(), ProviderError> {
        let part = Part::FunctionResponse {
            function_response: FunctionResponse {
                id: call.call_id.clone(),
                name: call.name.clone(),
                response: outcome.to_object(),
            },
        };

        // Results of one dispatch phase share a single user turn.
        match state.contents.last_mut() {
            Some(last) if last.is_function_response_turn() => last.parts.push(part),
            _ => state.contents.push(Content::user(vec![part])),
        }
        Ok(())
    }
}

/// Appends the first candidate's turn to the contents and classifies it.
pub(crate) fn fold_response(
    state: &mut GenerateContentRequest,
    response: GenerateContentResponse,
) -> Result<TurnOutput, ProviderError> {
    let block_reason = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        match block_reason {
            Some(reason) => ProviderError::protocol(format!("prompt was blocked: {reason}")),
            None => ProviderError::protocol("response did not include candidates"),
        }
    })?;

    // Gemini rejects history turns without parts, so an empty one is never kept.
    let mut content = candidate
        .content
        .filter(|content| !content.parts.is_empty())
        .ok_or_else(|| {
            ProviderError::protocol(format!(
                "candidate carried no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

    let mut turn = TurnOutput::default();
    for part in &content.parts {
        match part {
            Part::Text { text, thought } => {
                if !thought {
                    turn.text.push_str(text);
                }
            }
            Part::FunctionCall { function_call, .. } => {
                let arguments = match &function_call.args {
                    Value::Null => b"{}".to_vec(),
                    args => serde_json::to_vec(args)?,
                };
                let mut call = PendingCall::new(function_call.name.clone(), arguments);
                call.call_id = function_call.id.clone();
                turn.calls.push(call);
            }
            Part::FunctionResponse { .. } => {
                return Err(ProviderError::protocol(
                    "model turn carried a function response part",
                ));
            }
        }
    }

    if content.role.is_none() {
        content.role = Some(ROLE_MODEL.to_string());
    }
    state.contents.push(content);

    turn.completed = turn.calls.is_empty();
    Ok(turn)
}

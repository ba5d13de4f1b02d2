//! Exposes an [`Agent`] as a [`Tool`] so agents can delegate to each other.
//!
//! The nested agent keeps its own history under `"{parent id}:{tool name}"`,
//! and it is cancelled together with the parent call.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tprovider::ToolDefinition;
use ttooling::{
    Tool, ToolError, ToolExecutionContext, ToolFuture, decode_arguments, derive_schema,
    encode_output,
};

use crate::{Agent, AgentInput, CallContext};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AgentToolInput {
    /// Message forwarded to the nested agent.
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct AgentTool {
    agent: Arc<Agent>,
    definition: ToolDefinition,
}

impl AgentTool {
    pub fn new(agent: Arc<Agent>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            agent,
            definition: ToolDefinition::new(name, description, derive_schema::<AgentToolInput>()),
        }
    }

    pub fn nested_id(&self, context: &ToolExecutionContext) -> String {
        format!("{}:{}", context.conversation_id, self.definition.name)
    }
}

impl Tool for AgentTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args: &'a [u8],
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Vec<u8>, ToolError>> {
        Box::pin(async move {
            let input: AgentToolInput = decode_arguments(args)?;
            let mut call_context =
                CallContext::new().with_cancellation(context.cancellation.child_token());
            if let Some(deadline) = context.deadline {
                call_context = call_context.with_deadline(deadline);
            }
            if let Some(trace_id) = &context.trace_id {
                call_context = call_context.with_trace_id(trace_id.clone());
            }

            let output = self
                .agent
                .call(&call_context, AgentInput::new(self.nested_id(context), input.input))
                .await
                .map_err(|error| ToolError::execution(error.to_string()))?;
            encode_output(&output.text)
        })
    }
}

//! Tool runtime context and execution result types.

use std::collections::HashMap;
use std::time::Instant;

use tcommon::{ConversationId, TraceId};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct ToolExecutionContext {
    pub conversation_id: ConversationId,
    pub trace_id: Option<TraceId>,
    /// Cancellation of the call that requested this tool. Tools may observe
    /// it, but execution is never interrupted from outside.
    pub cancellation: CancellationToken,
    /// Deadline of the requesting call, for tools that start nested work.
    pub deadline: Option<Instant>,
    pub metadata: HashMap<String, String>,
}

impl ToolExecutionContext {
    pub fn new(conversation_id: impl Into<ConversationId>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            trace_id: None,
            cancellation: CancellationToken::new(),
            deadline: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionResult {
    pub tool_call_id: Option<String>,
    pub tool_name: String,
    pub output: Vec<u8>,
}

impl ToolExecutionResult {
    pub fn new(tool_name: impl Into<String>, output: impl Into<Vec<u8>>) -> Self {
        Self {
            tool_call_id: None,
            tool_name: tool_name.into(),
            output: output.into(),
        }
    }

    pub fn from_call(call: &tprovider::PendingCall, output: Vec<u8>) -> Self {
        Self {
            tool_call_id: call.call_id.clone(),
            tool_name: call.name.clone(),
            output,
        }
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

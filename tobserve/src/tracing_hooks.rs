//! Tracing-based hooks for agent calls and tool execution.
//!
//! ```rust
//! use tagent::AgentHooks;
//! use tobserve::TracingObservabilityHooks;
//!
//! fn accepts_agent_hooks(_hooks: &dyn AgentHooks) {}
//!
//! accepts_agent_hooks(&TracingObservabilityHooks);
//! ```

use std::time::Duration;

use tagent::{AgentError, AgentHooks, LoopPhase};
use tcommon::ConversationId;
use tprovider::{PendingCall, Provider, TurnOutput};
use ttooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl AgentHooks for TracingObservabilityHooks {
    fn on_call_start(&self, conversation_id: &ConversationId, provider: Provider) {
        tracing::info!(
            phase = "agent",
            event = "call_start",
            conversation_id = %conversation_id,
            provider = %provider
        );
    }

    fn on_phase(&self, conversation_id: &ConversationId, phase: LoopPhase, turn: u32) {
        tracing::debug!(
            phase = phase.as_str(),
            event = "phase_enter",
            conversation_id = %conversation_id,
            turn
        );
    }

    fn on_turn_complete(&self, conversation_id: &ConversationId, turn: u32, output: &TurnOutput) {
        tracing::debug!(
            phase = "requesting",
            event = "turn_complete",
            conversation_id = %conversation_id,
            turn,
            calls = output.calls.len(),
            completed = output.completed
        );
    }

    fn on_tool_failure(
        &self,
        conversation_id: &ConversationId,
        call: &PendingCall,
        error: &ToolError,
    ) {
        tracing::warn!(
            phase = "dispatching",
            event = "tool_failure_returned",
            conversation_id = %conversation_id,
            tool_name = %call.name,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_history_save_failure(&self, conversation_id: &ConversationId, reason: &str) {
        tracing::error!(
            phase = "history",
            event = "save_failure",
            conversation_id = %conversation_id,
            error = reason
        );
    }

    fn on_call_success(&self, conversation_id: &ConversationId, turns: u32, elapsed: Duration) {
        tracing::info!(
            phase = "agent",
            event = "call_success",
            conversation_id = %conversation_id,
            turns,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_call_failure(
        &self,
        conversation_id: &ConversationId,
        error: &AgentError,
        elapsed: Duration,
    ) {
        tracing::warn!(
            phase = "agent",
            event = "call_failure",
            conversation_id = %conversation_id,
            error_kind = ?error.kind,
            retryable = error.retryable,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, call: &PendingCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = %call.name,
            tool_call_id = ?call.call_id,
            conversation_id = %context.conversation_id,
            trace_id = ?context.trace_id
        );
    }

    fn on_execution_success(
        &self,
        call: &PendingCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = %call.name,
            tool_call_id = ?result.tool_call_id,
            conversation_id = %context.conversation_id,
            output_bytes = result.output.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        call: &PendingCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::warn!(
            phase = "tool",
            event = "execution_failure",
            tool_name = %call.name,
            tool_call_id = ?call.call_id,
            conversation_id = %context.conversation_id,
            error_kind = ?error.kind,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }
}

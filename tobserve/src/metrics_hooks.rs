//! Metrics-based hooks for agent calls and tool execution.
//!
//! ```rust
//! use tobserve::MetricsObservabilityHooks;
//! use ttooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! accepts_tool_hooks(&MetricsObservabilityHooks);
//! ```

use std::time::Duration;

use tagent::{AgentError, AgentHooks, LoopPhase};
use tcommon::ConversationId;
use tprovider::{PendingCall, Provider, TurnOutput};
use ttooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl AgentHooks for MetricsObservabilityHooks {
    fn on_call_start(&self, _conversation_id: &ConversationId, provider: Provider) {
        metrics::counter!(
            "tessera_agent_call_start_total",
            "provider" => provider.to_string()
        )
        .increment(1);
    }

    fn on_phase(&self, _conversation_id: &ConversationId, phase: LoopPhase, _turn: u32) {
        metrics::counter!(
            "tessera_loop_phase_total",
            "phase" => phase.as_str()
        )
        .increment(1);
    }

    fn on_turn_complete(&self, _conversation_id: &ConversationId, _turn: u32, output: &TurnOutput) {
        metrics::histogram!("tessera_turn_tool_calls").record(output.calls.len() as f64);
    }

    fn on_tool_failure(
        &self,
        _conversation_id: &ConversationId,
        call: &PendingCall,
        error: &ToolError,
    ) {
        metrics::counter!(
            "tessera_tool_failure_returned_total",
            "tool_name" => call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_history_save_failure(&self, _conversation_id: &ConversationId, _reason: &str) {
        metrics::counter!("tessera_history_save_failure_total").increment(1);
    }

    fn on_call_success(&self, _conversation_id: &ConversationId, turns: u32, elapsed: Duration) {
        metrics::counter!("tessera_agent_call_success_total").increment(1);
        metrics::histogram!("tessera_agent_call_turns").record(turns as f64);
        metrics::histogram!("tessera_agent_call_duration_seconds").record(elapsed.as_secs_f64());
    }

    fn on_call_failure(
        &self,
        _conversation_id: &ConversationId,
        error: &AgentError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "tessera_agent_call_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!("tessera_agent_call_duration_seconds").record(elapsed.as_secs_f64());
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, call: &PendingCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "tessera_tool_execution_start_total",
            "tool_name" => call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        call: &PendingCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "tessera_tool_execution_success_total",
            "tool_name" => call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "tessera_tool_execution_duration_seconds",
            "tool_name" => call.name.clone(),
            "outcome" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        call: &PendingCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "tessera_tool_execution_failure_total",
            "tool_name" => call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "tessera_tool_execution_duration_seconds",
            "tool_name" => call.name.clone(),
            "outcome" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

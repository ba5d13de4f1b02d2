//! Lifecycle hooks for agent calls and orchestration phases.
//!
//! ```rust
//! use tagent::{AgentHooks, NoopAgentHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn AgentHooks) {}
//!
//! assert_hooks_trait(&NoopAgentHooks);
//! ```

use std::time::Duration;

use tcommon::ConversationId;
use tprovider::{PendingCall, Provider, TurnOutput};
use ttooling::ToolError;

use crate::{AgentError, LoopPhase};

pub trait AgentHooks: Send + Sync {
    fn on_call_start(&self, _conversation_id: &ConversationId, _provider: Provider) {}

    /// Called on every state-machine transition, with the 1-based turn number.
    fn on_phase(&self, _conversation_id: &ConversationId, _phase: LoopPhase, _turn: u32) {}

    fn on_turn_complete(&self, _conversation_id: &ConversationId, _turn: u32, _output: &TurnOutput) {
    }

    /// A tool failed and its failure was handed back to the model.
    fn on_tool_failure(
        &self,
        _conversation_id: &ConversationId,
        _call: &PendingCall,
        _error: &ToolError,
    ) {
    }

    fn on_history_save_failure(&self, _conversation_id: &ConversationId, _reason: &str) {}

    fn on_call_success(&self, _conversation_id: &ConversationId, _turns: u32, _elapsed: Duration) {}

    fn on_call_failure(
        &self,
        _conversation_id: &ConversationId,
        _error: &AgentError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAgentHooks;

impl AgentHooks for NoopAgentHooks {}

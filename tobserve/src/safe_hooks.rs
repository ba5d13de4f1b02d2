//! Wrappers that keep a panicking hook from unwinding into the agent.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use tagent::{AgentError, AgentHooks, LoopPhase};
use tcommon::ConversationId;
use tprovider::{PendingCall, Provider, TurnOutput};
use ttooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

pub struct SafeAgentHooks<H> {
    inner: H,
}

impl<H> SafeAgentHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H> AgentHooks for SafeAgentHooks<H>
where
    H: AgentHooks,
{
    fn on_call_start(&self, conversation_id: &ConversationId, provider: Provider) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_start(conversation_id, provider)
        }));
    }

    fn on_phase(&self, conversation_id: &ConversationId, phase: LoopPhase, turn: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_phase(conversation_id, phase, turn)
        }));
    }

    fn on_turn_complete(&self, conversation_id: &ConversationId, turn: u32, output: &TurnOutput) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_complete(conversation_id, turn, output)
        }));
    }

    fn on_tool_failure(
        &self,
        conversation_id: &ConversationId,
        call: &PendingCall,
        error: &ToolError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_tool_failure(conversation_id, call, error)
        }));
    }

    fn on_history_save_failure(&self, conversation_id: &ConversationId, reason: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_history_save_failure(conversation_id, reason)
        }));
    }

    fn on_call_success(&self, conversation_id: &ConversationId, turns: u32, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_success(conversation_id, turns, elapsed)
        }));
    }

    fn on_call_failure(
        &self,
        conversation_id: &ConversationId,
        error: &AgentError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_failure(conversation_id, error, elapsed)
        }));
    }
}

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, call: &PendingCall, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(call, context)
        }));
    }

    fn on_execution_success(
        &self,
        call: &PendingCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        call: &PendingCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(call, context, error, elapsed)
        }));
    }
}

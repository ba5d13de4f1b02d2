//! The provider-agnostic tool-calling loop.
//!
//! Each call moves through `Requesting -> (Dispatching -> Requesting)* ->
//! Completed`, or ends in `Errored`. Cancellation and the deadline are
//! checked before every request; tools already running are never interrupted.

use std::collections::HashSet;
use std::sync::Arc;

use tcommon::ConversationId;
use tprovider::{PendingCall, ProviderAdapter, ToolOutcome};
use ttooling::{ToolExecutionContext, ToolRuntime};

use crate::{AgentError, AgentHooks, CallContext, NoopAgentHooks};

pub const DEFAULT_MAX_TURNS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Requesting,
    Dispatching,
    Completed,
    Errored,
}

impl LoopPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requesting => "requesting",
            Self::Dispatching => "dispatching",
            Self::Completed => "completed",
            Self::Errored => "errored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPolicy {
    /// Upper bound on provider round trips within one call.
    pub max_turns: u32,
}

impl Default for LoopPolicy {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoopOutcome<S> {
    /// Final provider state, ready to be persisted as history.
    pub state: S,
    pub text: String,
    pub turns: u32,
}

#[derive(Clone)]
pub struct OrchestrationLoop {
    runtime: Arc<dyn ToolRuntime>,
    policy: LoopPolicy,
    hooks: Arc<dyn AgentHooks>,
}

impl OrchestrationLoop {
    pub fn new(runtime: Arc<dyn ToolRuntime>) -> Self {
        Self {
            runtime,
            policy: LoopPolicy::default(),
            hooks: Arc::new(NoopAgentHooks),
        }
    }

    pub fn with_policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn policy(&self) -> LoopPolicy {
        self.policy
    }

    /// Drives `state` until the model produces a final answer.
    pub async fn run<A>(
        &self,
        adapter: &A,
        mut state: A::State,
        conversation_id: &ConversationId,
        context: &CallContext,
    ) -> Result<LoopOutcome<A::State>, AgentError>
    where
        A: ProviderAdapter,
    {
        let mut turns = 0;
        let result = self
            .drive(adapter, &mut state, conversation_id, context, &mut turns)
            .await;

        match result {
            Ok(text) => {
                self.enter(conversation_id, LoopPhase::Completed, turns);
                Ok(LoopOutcome { state, text, turns })
            }
            Err(error) => {
                self.enter(conversation_id, LoopPhase::Errored, turns);
                tracing::debug!(
                    phase = LoopPhase::Errored.as_str(),
                    event = "loop_failed",
                    conversation_id = %conversation_id,
                    turns,
                    error_kind = ?error.kind,
                    error = %error
                );
                Err(error)
            }
        }
    }

    async fn drive<A>(
        &self,
        adapter: &A,
        state: &mut A::State,
        conversation_id: &ConversationId,
        context: &CallContext,
        turns: &mut u32,
    ) -> Result<String, AgentError>
    where
        A: ProviderAdapter,
    {
        let definitions = self.runtime.definitions();
        let registered = definitions
            .iter()
            .map(|definition| definition.name.clone())
            .collect::<HashSet<_>>();
        adapter.attach_tools(state, &definitions);

        let mut tool_context = ToolExecutionContext::new(conversation_id.clone())
            .with_cancellation(context.cancellation().clone())
            .with_deadline(context.deadline());
        if let Some(trace_id) = context.trace_id() {
            tool_context = tool_context.with_trace_id(trace_id.clone());
        }

        loop {
            context.check()?;
            if *turns >= self.policy.max_turns {
                return Err(AgentError::turn_limit_exceeded(self.policy.max_turns));
            }
            *turns += 1;
            self.enter(conversation_id, LoopPhase::Requesting, *turns);

            let output = adapter.round_trip(state).await?;
            tracing::debug!(
                phase = LoopPhase::Requesting.as_str(),
                event = "round_trip_complete",
                provider = %adapter.provider(),
                conversation_id = %conversation_id,
                turn = *turns,
                calls = output.calls.len(),
                completed = output.completed
            );
            self.hooks.on_turn_complete(conversation_id, *turns, &output);

            if output.is_final() {
                return Ok(output.text);
            }
            if output.calls.is_empty() {
                continue;
            }

            self.enter(conversation_id, LoopPhase::Dispatching, *turns);
            if let Some(unknown) = output
                .calls
                .iter()
                .find(|call| !registered.contains(&call.name))
            {
                return Err(AgentError::protocol(format!(
                    "model requested unregistered tool '{}'",
                    unknown.name
                )));
            }

            for call in &output.calls {
                let outcome = self.dispatch(call, conversation_id, &tool_context).await;
                adapter.append_outcome(state, call, &outcome)?;
            }
        }
    }

    async fn dispatch(
        &self,
        call: &PendingCall,
        conversation_id: &ConversationId,
        tool_context: &ToolExecutionContext,
    ) -> ToolOutcome {
        match self.runtime.execute(call, tool_context).await {
            Ok(result) => ToolOutcome::Success(result.output),
            Err(error) => {
                tracing::warn!(
                    phase = LoopPhase::Dispatching.as_str(),
                    event = "tool_failed",
                    conversation_id = %conversation_id,
                    tool_name = %call.name,
                    error_kind = ?error.kind,
                    error = %error
                );
                self.hooks.on_tool_failure(conversation_id, call, &error);
                ToolOutcome::failure(error.message)
            }
        }
    }

    fn enter(&self, conversation_id: &ConversationId, phase: LoopPhase, turn: u32) {
        self.hooks.on_phase(conversation_id, phase, turn);
    }
}

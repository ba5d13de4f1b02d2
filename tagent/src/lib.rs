//! Agent facade over provider adapters, tools, and history.
//!
//! An [`Agent`] validates a call, loads the conversation's history, runs the
//! [`OrchestrationLoop`] against the adapter for its model's provider, and
//! saves the final state. Persistence is best effort: a failed save is logged
//! and reported to [`AgentHooks`], never returned.

mod agent;
mod agent_tool;
mod context;
mod error;
mod hooks;
mod orchestration;

pub mod prelude {
    pub use crate::{
        Agent, AgentBuilder, AgentError, AgentErrorKind, AgentHooks, AgentInput, AgentOutput,
        AgentTool, CallContext, LoopPhase, LoopPolicy, NoopAgentHooks,
    };
}

pub use agent::{Agent, AgentBuilder, AgentInput, AgentOutput};
pub use agent_tool::{AgentTool, AgentToolInput};
pub use context::{CallCancellationToken, CallContext};
pub use error::{AgentError, AgentErrorKind};
pub use hooks::{AgentHooks, NoopAgentHooks};
pub use orchestration::{DEFAULT_MAX_TURNS, LoopOutcome, LoopPhase, LoopPolicy, OrchestrationLoop};

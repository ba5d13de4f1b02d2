//! Common imports for most tessera applications.

pub use crate::{
    Agent, AgentConfig, AgentError, AgentErrorKind, AgentInput, AgentOutput, CallContext,
    ConversationId, FilesystemHistoryStore, HistoryStore, InMemoryHistoryStore, Model,
    NoopHistoryStore, ObjectSchema, Provider, Tool, ToolError, ToolExecutionContext,
    TracingObservabilityHooks, build_agent, build_agent_with_store, parse_model,
};

//! Unified facade over the tessera workspace crates.
//!
//! Most applications only need this crate: it re-exports the agent, tool,
//! provider, and history types, and wires a ready-to-use [`Agent`] from an
//! [`AgentConfig`].
//!
//! ```rust,no_run
//! use tessera::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::from_env(Model::Gpt4oMini)?
//!     .with_system_prompt("You are a calculator.");
//! let agent = build_agent(config)?;
//!
//! let output = agent
//!     .call(&CallContext::new(), AgentInput::new("conversation-1", "What is 21 doubled?"))
//!     .await?;
//! println!("{}", output.text);
//! # Ok(())
//! # }
//! ```

mod config;

pub mod prelude;
pub mod util;

pub use tagent;
pub use tcommon;
pub use tmemory;
pub use tobserve;
pub use tprovider;
pub use ttooling;

pub use config::{
    AgentConfig, DEFAULT_TIMEOUT, GEMINI_API_KEY_ENV, OPENAI_API_KEY_ENV, build_agent,
    build_agent_with_store,
};
pub use tagent::{
    Agent, AgentBuilder, AgentError, AgentErrorKind, AgentHooks, AgentInput, AgentOutput,
    AgentTool, CallContext, DEFAULT_MAX_TURNS, LoopPhase, LoopPolicy, NoopAgentHooks,
    OrchestrationLoop,
};
pub use tcommon::{BoxFuture, ConversationId, TraceId};
pub use tmemory::{
    FilesystemHistoryStore, HistoryStore, InMemoryHistoryStore, MemoryError, MemoryErrorKind,
    NoopHistoryStore,
};
pub use tobserve::{
    MetricsObservabilityHooks, SafeAgentHooks, SafeToolHooks, TracingObservabilityHooks,
};
pub use tprovider::{
    Model, ObjectSchema, Provider, ProviderError, ProviderErrorKind, SecretString,
    SecureCredentialManager, ToolDefinition,
};
pub use ttooling::{
    DEFAULT_MAX_TOOLS, FunctionTool, NoopToolRuntimeHooks, Tool, ToolError, ToolErrorKind,
    ToolExecutionContext, ToolFuture, ToolRegistry, ToolRuntimeHooks, TypedTool, derive_schema,
    schema_from_json,
};
pub use util::{api_key_env, parse_model, parse_provider};

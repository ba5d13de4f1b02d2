//! Observability hooks for agent calls, loop phases, and tool execution.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tagent::{Agent, AgentHooks};
//! use tobserve::{MetricsObservabilityHooks, SafeAgentHooks, TracingObservabilityHooks};
//! use tprovider::Model;
//!
//! let hooks: Arc<dyn AgentHooks> = Arc::new(SafeAgentHooks::new(TracingObservabilityHooks));
//! let _agent = Agent::builder(Model::Gpt4oMini)
//!     .hooks(hooks)
//!     .tool_hooks(Arc::new(MetricsObservabilityHooks))
//!     .build();
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeAgentHooks, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeAgentHooks, SafeToolHooks, TracingObservabilityHooks,
    };
}

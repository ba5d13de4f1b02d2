//! Tool registry for lookup by exact tool name.
//!
//! ```rust
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use ttooling::{ToolError, ToolErrorKind, ToolRegistry};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Input {
//!     n: i64,
//! }
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_fn("double", "Doubles n", |input: Input| async move {
//!         Ok::<_, ToolError>(input.n * 2)
//!     })
//!     .expect("first registration succeeds");
//!
//! let duplicate = registry
//!     .register_fn("double", "Triples n", |input: Input| async move {
//!         Ok::<_, ToolError>(input.n * 3)
//!     })
//!     .expect_err("names are unique");
//! assert_eq!(duplicate.kind, ToolErrorKind::DuplicateName);
//! assert_eq!(registry.definitions()[0].description, "Doubles n");
//! ```

use std::future::Future;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tcommon::Registry;
use tprovider::ToolDefinition;

use crate::{FunctionTool, Tool, ToolError, ToolExecutionContext, TypedTool};

pub const DEFAULT_MAX_TOOLS: usize = 10;

#[derive(Clone)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
    max_tools: usize,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: Registry::new(),
            max_tools: DEFAULT_MAX_TOOLS,
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .field("max_tools", &self.max_tools)
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tools(mut self, max_tools: usize) -> Self {
        self.max_tools = max_tools;
        self
    }

    pub fn max_tools(&self) -> usize {
        self.max_tools
    }

    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: Tool + 'static,
    {
        self.register_arc(Arc::new(tool))
    }

    /// Adds `tool` under its definition name. The first registration of a
    /// name wins; later ones are rejected without touching it.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.definition().name;
        if self.tools.contains_key(name.as_str()) {
            return Err(ToolError::duplicate_name(&name));
        }
        if self.tools.len() >= self.max_tools {
            return Err(ToolError::max_tools_exceeded(self.max_tools).with_tool_name(name));
        }

        self.tools
            .try_insert(name.clone(), tool)
            .map_err(|_| ToolError::duplicate_name(&name))
    }

    /// Registers a typed async function, deriving its schema from `In`.
    pub fn register_fn<In, Out, F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<(), ToolError>
    where
        In: DeserializeOwned + JsonSchema + Send + 'static,
        Out: Serialize + Send + 'static,
        F: Fn(In) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Out, ToolError>> + Send + 'static,
    {
        self.register(TypedTool::new(name, description, handler))
    }

    /// Registers a raw-bytes handler under an explicit definition.
    pub fn register_raw_fn<F, Fut>(
        &mut self,
        definition: ToolDefinition,
        handler: F,
    ) -> Result<(), ToolError>
    where
        F: Fn(Vec<u8>, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(definition, handler))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

//! Capability layer for registering and executing tools.
//!
//! Tools speak a raw contract (JSON bytes in, JSON bytes out). Typed async
//! functions are adapted onto it with a schema derived from their input type.

mod args;
mod error;
mod hooks;
mod registry;
mod runtime;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, FunctionTool, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime, TypedTool, derive_schema,
    };
}

pub use args::{
    decode_arguments, encode_output, parse_json_object, parse_json_value, required_string,
};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::{DEFAULT_MAX_TOOLS, ToolRegistry};
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use schema::{derive_schema, schema_from_json, try_derive_schema};
pub use tool::{FunctionTool, Tool, ToolFuture, TypedTool};
pub use types::{ToolExecutionContext, ToolExecutionResult};

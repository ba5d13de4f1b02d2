//! Tool trait contract and the function-backed implementations.
//!
//! ```rust
//! use schemars::JsonSchema;
//! use serde::{Deserialize, Serialize};
//! use ttooling::{Tool, ToolError, TypedTool};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Input {
//!     n: i64,
//! }
//!
//! #[derive(Serialize)]
//! struct Output {
//!     n: i64,
//! }
//!
//! let tool = TypedTool::new("double", "Doubles n", |input: Input| async move {
//!     Ok::<_, ToolError>(Output { n: input.n * 2 })
//! });
//!
//! assert_eq!(tool.definition().name, "double");
//! assert_eq!(tool.definition().schema.required, vec!["n".to_string()]);
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tcommon::BoxFuture;
use tprovider::{ObjectSchema, ToolDefinition};

use crate::{ToolError, ToolExecutionContext, decode_arguments, derive_schema, encode_output};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

/// A uniform executable unit: raw JSON bytes in, raw JSON bytes out.
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    fn invoke<'a>(
        &'a self,
        args: &'a [u8],
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Vec<u8>, ToolError>>;
}

type RawHandler = dyn Fn(Vec<u8>, ToolExecutionContext) -> ToolFuture<'static, Result<Vec<u8>, ToolError>>
    + Send
    + Sync;

/// A tool with an explicit schema over the raw byte contract.
pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Arc<RawHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(Vec<u8>, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, ToolError>> + Send + 'static,
    {
        let handler: Arc<RawHandler> =
            Arc::new(move |args, context| Box::pin(handler(args, context)));

        Self {
            definition,
            handler,
        }
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args: &'a [u8],
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Vec<u8>, ToolError>> {
        (self.handler)(args.to_vec(), context.clone())
    }
}

/// A tool wrapping a typed async function, with its schema derived from `In`.
pub struct TypedTool<In, Out, F> {
    definition: ToolDefinition,
    handler: F,
    _marker: PhantomData<fn(In) -> Out>,
}

impl<In, Out, F, Fut> TypedTool<In, Out, F>
where
    In: DeserializeOwned + JsonSchema + Send + 'static,
    Out: Serialize + Send + 'static,
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Out, ToolError>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self {
        Self::with_schema(name, description, derive_schema::<In>(), handler)
    }

    /// Uses `schema` as declared instead of deriving it from `In`.
    pub fn with_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ObjectSchema,
        handler: F,
    ) -> Self {
        Self {
            definition: ToolDefinition::new(name, description, schema),
            handler,
            _marker: PhantomData,
        }
    }
}

impl<In, Out, F, Fut> Tool for TypedTool<In, Out, F>
where
    In: DeserializeOwned + JsonSchema + Send + 'static,
    Out: Serialize + Send + 'static,
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Out, ToolError>> + Send + 'static,
{
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args: &'a [u8],
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Vec<u8>, ToolError>> {
        Box::pin(async move {
            let input = decode_arguments::<In>(args)?;
            let output = (self.handler)(input).await?;
            encode_output(&output)
        })
    }
}

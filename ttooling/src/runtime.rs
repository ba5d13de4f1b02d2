//! Tool runtime trait and default registry-backed executor.

use std::sync::Arc;
use std::time::Instant;

use tprovider::{PendingCall, ToolDefinition};

use crate::{
    NoopToolRuntimeHooks, ToolError, ToolExecutionContext, ToolExecutionResult, ToolFuture,
    ToolRegistry, ToolRuntimeHooks,
};

pub trait ToolRuntime: Send + Sync {
    /// Declarations to advertise to the model, in registration order.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Runs the tool whose name exactly matches `call.name`.
    ///
    /// Fails with [`crate::ToolErrorKind::NotFound`] when no tool matches.
    fn execute<'a>(
        &'a self,
        call: &'a PendingCall,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;
}

#[derive(Clone)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl Default for DefaultToolRuntime {
    fn default() -> Self {
        Self::new(Arc::new(ToolRegistry::new()))
    }
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    fn execute<'a>(
        &'a self,
        call: &'a PendingCall,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            let started = Instant::now();
            self.hooks.on_execution_start(call, context);

            let outcome = match self.registry.get(&call.name) {
                Some(tool) => tool
                    .invoke(&call.arguments, context)
                    .await
                    .map(|output| ToolExecutionResult::from_call(call, output)),
                None => Err(ToolError::not_found(format!(
                    "tool '{}' is not registered",
                    call.name
                ))),
            };

            match outcome {
                Ok(result) => {
                    self.hooks
                        .on_execution_success(call, context, &result, started.elapsed());
                    Ok(result)
                }
                Err(error) => {
                    let mut error = error.with_tool_name(call.name.clone());
                    if let Some(call_id) = &call.call_id {
                        error = error.with_tool_call_id(call_id.clone());
                    }
                    self.hooks
                        .on_execution_failure(call, context, &error, started.elapsed());
                    Err(error)
                }
            }
        })
    }
}

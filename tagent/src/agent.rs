//! The agent facade: validation, history, adapter selection, and persistence
//! around one orchestration loop per call.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use tagent::Agent;
//! use tmemory::InMemoryHistoryStore;
//! use tprovider::Model;
//! use ttooling::ToolError;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Input {
//!     n: i64,
//! }
//!
//! let mut agent = Agent::builder(Model::Gpt4oMini)
//!     .system_prompt("You are a calculator.")
//!     .history_store(Arc::new(InMemoryHistoryStore::new()))
//!     .build();
//! agent
//!     .register_fn("double", "Doubles n", |input: Input| async move {
//!         Ok::<_, ToolError>(input.n * 2)
//!     })
//!     .expect("first registration succeeds");
//!
//! assert_eq!(agent.tool_names(), ["double"]);
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tcommon::ConversationId;
use tmemory::HistoryStore;
use tprovider::gemini::GeminiAdapter;
use tprovider::openai::OpenAiAdapter;
use tprovider::{BodyRequest, Model, ObjectSchema, Provider, ProviderAdapter};
use tracing::Instrument;
use ttooling::{
    DefaultToolRuntime, NoopToolRuntimeHooks, Tool, ToolError, ToolRegistry, ToolRuntimeHooks,
    derive_schema,
};

use crate::{
    AgentError, AgentHooks, AgentTool, CallContext, LoopPolicy, NoopAgentHooks, OrchestrationLoop,
};

/// One request to [`Agent::call`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInput {
    /// Conversation id; history is loaded from and saved under it.
    pub id: String,
    pub user_input: String,
    /// Constrains the final answer to this JSON object shape.
    pub output_schema: Option<ObjectSchema>,
}

impl AgentInput {
    pub fn new(id: impl Into<String>, user_input: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_input: user_input.into(),
            output_schema: None,
        }
    }

    pub fn with_output_schema(mut self, schema: ObjectSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutput {
    pub text: String,
    /// Provider round trips this call took.
    pub turns: u32,
}

pub struct Agent {
    model: Model,
    system_prompt: String,
    openai: Option<OpenAiAdapter>,
    gemini: Option<GeminiAdapter>,
    history: Option<Arc<dyn HistoryStore>>,
    tools: Arc<ToolRegistry>,
    policy: LoopPolicy,
    hooks: Arc<dyn AgentHooks>,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.model)
            .field("openai", &self.openai.is_some())
            .field("gemini", &self.gemini.is_some())
            .field("history", &self.history.is_some())
            .field("tools", &self.tools)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Agent {
    pub fn builder(model: Model) -> AgentBuilder {
        AgentBuilder::new(model)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.names()
    }

    /// Registers a typed async function as a tool, deriving its schema from `In`.
    pub fn register_fn<In, Out, F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<(), AgentError>
    where
        In: DeserializeOwned + JsonSchema + Send + 'static,
        Out: Serialize + Send + 'static,
        F: Fn(In) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Out, ToolError>> + Send + 'static,
    {
        Arc::make_mut(&mut self.tools)
            .register_fn(name, description, handler)
            .map_err(AgentError::from)
    }

    pub fn register<T>(&mut self, tool: T) -> Result<(), AgentError>
    where
        T: Tool + 'static,
    {
        Arc::make_mut(&mut self.tools)
            .register(tool)
            .map_err(AgentError::from)
    }

    /// Wraps this agent as a tool another agent can delegate to.
    pub fn into_tool(
        self: Arc<Self>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AgentTool {
        AgentTool::new(self, name, description)
    }

    /// Runs one user turn to completion and persists the resulting history.
    ///
    /// Input is validated before any I/O, in this order: store, id, input.
    pub async fn call(
        &self,
        context: &CallContext,
        input: AgentInput,
    ) -> Result<AgentOutput, AgentError> {
        let store = self.history.as_ref().ok_or_else(AgentError::nil_store)?;
        if input.id.is_empty() {
            return Err(AgentError::invalid_id());
        }
        if input.user_input.is_empty() {
            return Err(AgentError::invalid_input());
        }

        let conversation_id = ConversationId::new(input.id.clone());
        let span = tracing::info_span!(
            "agent_call",
            conversation_id = %conversation_id,
            model = %self.model
        );

        async {
            let started = Instant::now();
            let provider = self.model.provider();
            self.hooks.on_call_start(&conversation_id, provider);

            let result = self
                .call_with_provider(provider, store.as_ref(), &conversation_id, context, &input)
                .await;

            match &result {
                Ok(output) => {
                    tracing::info!(
                        phase = "agent",
                        event = "call_completed",
                        provider = %provider,
                        turns = output.turns
                    );
                    self.hooks
                        .on_call_success(&conversation_id, output.turns, started.elapsed());
                }
                Err(error) => {
                    tracing::info!(
                        phase = "agent",
                        event = "call_failed",
                        provider = %provider,
                        error_kind = ?error.kind,
                        error = %error
                    );
                    self.hooks
                        .on_call_failure(&conversation_id, error, started.elapsed());
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Asks for an answer shaped like `T` and decodes it.
    pub async fn call_structured<T>(
        &self,
        context: &CallContext,
        id: impl Into<String>,
        user_input: impl Into<String>,
    ) -> Result<T, AgentError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let input = AgentInput::new(id, user_input).with_output_schema(derive_schema::<T>());
        let output = self.call(context, input).await?;
        serde_json::from_str(&output.text).map_err(|error| {
            AgentError::protocol(format!("final answer does not match the output schema: {error}"))
        })
    }

    async fn call_with_provider(
        &self,
        provider: Provider,
        store: &dyn HistoryStore,
        conversation_id: &ConversationId,
        context: &CallContext,
        input: &AgentInput,
    ) -> Result<AgentOutput, AgentError> {
        match provider {
            Provider::OpenAi => match &self.openai {
                Some(adapter) => {
                    self.call_with(adapter, store, conversation_id, context, input)
                        .await
                }
                None => Err(self.unmatched()),
            },
            Provider::Gemini => match &self.gemini {
                Some(adapter) => {
                    self.call_with(adapter, store, conversation_id, context, input)
                        .await
                }
                None => Err(self.unmatched()),
            },
        }
    }

    async fn call_with<A>(
        &self,
        adapter: &A,
        store: &dyn HistoryStore,
        conversation_id: &ConversationId,
        context: &CallContext,
        input: &AgentInput,
    ) -> Result<AgentOutput, AgentError>
    where
        A: ProviderAdapter,
    {
        let history = self.load_history(store, conversation_id).await;
        let request = BodyRequest::new(self.model.name(), &input.user_input)
            .with_system_prompt(&self.system_prompt)
            .with_history(&history)
            .with_output_schema(input.output_schema.as_ref());
        let state = adapter.body(request)?;

        let outcome = self
            .orchestration()
            .run(adapter, state, conversation_id, context)
            .await?;

        self.persist(adapter, store, conversation_id, &outcome.state).await;
        Ok(AgentOutput {
            text: outcome.text,
            turns: outcome.turns,
        })
    }

    /// Loads prior history; any failure degrades to an empty conversation.
    async fn load_history(
        &self,
        store: &dyn HistoryStore,
        conversation_id: &ConversationId,
    ) -> Vec<u8> {
        match store.retrieve(conversation_id).await {
            Ok(blob) => blob,
            Err(error) if error.is_not_found() => {
                tracing::debug!(
                    phase = "history",
                    event = "history_missing",
                    conversation_id = %conversation_id
                );
                Vec::new()
            }
            Err(error) => {
                tracing::warn!(
                    phase = "history",
                    event = "history_load_failed",
                    conversation_id = %conversation_id,
                    error = %error
                );
                Vec::new()
            }
        }
    }

    /// Saves the final state. Failures are logged and never fail the call.
    async fn persist<A>(
        &self,
        adapter: &A,
        store: &dyn HistoryStore,
        conversation_id: &ConversationId,
        state: &A::State,
    ) where
        A: ProviderAdapter,
    {
        let reason = match adapter.encode_state(state) {
            Ok(blob) => match store.save(conversation_id, blob).await {
                Ok(()) => return,
                Err(error) => error.to_string(),
            },
            Err(error) => error.to_string(),
        };

        tracing::error!(
            phase = "history",
            event = "history_save_failed",
            conversation_id = %conversation_id,
            error = %reason
        );
        self.hooks.on_history_save_failure(conversation_id, &reason);
    }

    fn orchestration(&self) -> OrchestrationLoop {
        let runtime = DefaultToolRuntime::new(Arc::clone(&self.tools))
            .with_hooks(Arc::clone(&self.tool_hooks));
        OrchestrationLoop::new(Arc::new(runtime))
            .with_policy(self.policy)
            .with_hooks(Arc::clone(&self.hooks))
    }

    fn unmatched(&self) -> AgentError {
        AgentError::model_unmatched(format!(
            "no {} adapter is configured for model '{}'",
            self.model.provider(),
            self.model
        ))
    }
}

pub struct AgentBuilder {
    model: Model,
    system_prompt: String,
    openai: Option<OpenAiAdapter>,
    gemini: Option<GeminiAdapter>,
    history: Option<Arc<dyn HistoryStore>>,
    max_tools: usize,
    policy: LoopPolicy,
    hooks: Arc<dyn AgentHooks>,
    tool_hooks: Arc<dyn ToolRuntimeHooks>,
}

impl AgentBuilder {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            system_prompt: String::new(),
            openai: None,
            gemini: None,
            history: None,
            max_tools: ttooling::DEFAULT_MAX_TOOLS,
            policy: LoopPolicy::default(),
            hooks: Arc::new(NoopAgentHooks),
            tool_hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn openai(mut self, adapter: OpenAiAdapter) -> Self {
        self.openai = Some(adapter);
        self
    }

    pub fn gemini(mut self, adapter: GeminiAdapter) -> Self {
        self.gemini = Some(adapter);
        self
    }

    pub fn history_store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(store);
        self
    }

    pub fn max_tools(mut self, max_tools: usize) -> Self {
        self.max_tools = max_tools;
        self
    }

    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.policy.max_turns = max_turns;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn tool_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.tool_hooks = hooks;
        self
    }

    pub fn build(self) -> Agent {
        Agent {
            model: self.model,
            system_prompt: self.system_prompt,
            openai: self.openai,
            gemini: self.gemini,
            history: self.history,
            tools: Arc::new(ToolRegistry::new().with_max_tools(self.max_tools)),
            policy: self.policy,
            hooks: self.hooks,
            tool_hooks: self.tool_hooks,
        }
    }
}

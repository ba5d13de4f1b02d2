//! Configuration and wiring for HTTP-backed agents.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tprovider::gemini::{GeminiAdapter, GeminiHttpTransport};
use tprovider::openai::{OpenAiAdapter, OpenAiHttpTransport};

use crate::{
    Agent, DEFAULT_MAX_TOOLS, DEFAULT_MAX_TURNS, HistoryStore, Model, NoopHistoryStore, Provider,
    ProviderError, SecretString, SecureCredentialManager, api_key_env,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub model: Model,
    pub api_key: SecretString,
    pub system_prompt: String,
    /// Overrides the provider's default API base URL.
    pub base_url: Option<String>,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    pub max_turns: u32,
    pub max_tools: usize,
}

impl AgentConfig {
    pub fn new(model: Model, api_key: impl Into<String>) -> Self {
        Self {
            model,
            api_key: SecretString::new(api_key),
            system_prompt: String::new(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_turns: DEFAULT_MAX_TURNS,
            max_tools: DEFAULT_MAX_TOOLS,
        }
    }

    /// Reads the API key for the model's provider from the process environment.
    pub fn from_env(model: Model) -> Result<Self, ProviderError> {
        Self::from_lookup(model, |name| std::env::var(name).ok())
    }

    /// Like [`AgentConfig::from_env`], with a caller-supplied variable lookup.
    pub fn from_lookup<F>(model: Model, lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = api_key_env(model.provider());
        match lookup(name) {
            Some(api_key) if !api_key.trim().is_empty() => Ok(Self::new(model, api_key)),
            _ => Err(ProviderError::authentication(format!("{name} is not set"))),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_max_tools(mut self, max_tools: usize) -> Self {
        self.max_tools = max_tools;
        self
    }
}

/// Builds an agent that discards history between calls.
pub fn build_agent(config: AgentConfig) -> Result<Agent, ProviderError> {
    build_agent_with_store(config, Arc::new(NoopHistoryStore))
}

pub fn build_agent_with_store(
    config: AgentConfig,
    store: Arc<dyn HistoryStore>,
) -> Result<Agent, ProviderError> {
    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;
    let credentials = Arc::new(SecureCredentialManager::new());

    let builder = Agent::builder(config.model.clone())
        .system_prompt(config.system_prompt)
        .history_store(store)
        .max_turns(config.max_turns)
        .max_tools(config.max_tools);

    let builder = match config.model.provider() {
        Provider::OpenAi => {
            credentials.set_openai_api_key(config.api_key.expose())?;
            let mut transport = OpenAiHttpTransport::new(http);
            if let Some(base_url) = config.base_url {
                transport = transport.with_base_url(base_url);
            }
            builder.openai(OpenAiAdapter::new(credentials, Arc::new(transport)))
        }
        Provider::Gemini => {
            credentials.set_gemini_api_key(config.api_key.expose())?;
            let mut transport = GeminiHttpTransport::new(http);
            if let Some(base_url) = config.base_url {
                transport = transport.with_base_url(base_url);
            }
            builder.gemini(GeminiAdapter::new(credentials, Arc::new(transport)))
        }
    };

    Ok(builder.build())
}

//! Agent-level errors surfaced to callers.
//!
//! ```rust
//! use tagent::{AgentError, AgentErrorKind};
//! use tprovider::ProviderError;
//!
//! let error = AgentError::from(ProviderError::protocol("unrecognized output item"));
//! assert_eq!(error.kind, AgentErrorKind::Protocol);
//! assert!(!error.is_validation());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use tprovider::ProviderError;
use ttooling::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    /// No history store is configured.
    NilStore,
    InvalidId,
    InvalidInput,
    /// No adapter is configured for the model's provider family.
    ModelUnmatched,
    Transport,
    Protocol,
    Cancelled,
    DeadlineExceeded,
    TurnLimitExceeded,
    Registration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentError {
    pub kind: AgentErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl AgentError {
    pub fn new(kind: AgentErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn nil_store() -> Self {
        Self::new(
            AgentErrorKind::NilStore,
            "no history store is configured",
            false,
        )
    }

    pub fn invalid_id() -> Self {
        Self::new(
            AgentErrorKind::InvalidId,
            "conversation id must not be empty",
            false,
        )
    }

    pub fn invalid_input() -> Self {
        Self::new(
            AgentErrorKind::InvalidInput,
            "user input must not be empty",
            false,
        )
    }

    pub fn model_unmatched(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::ModelUnmatched, message, false)
    }

    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self::new(AgentErrorKind::Transport, message, retryable)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Protocol, message, false)
    }

    pub fn cancelled() -> Self {
        Self::new(AgentErrorKind::Cancelled, "call was cancelled", false)
    }

    pub fn deadline_exceeded() -> Self {
        Self::new(
            AgentErrorKind::DeadlineExceeded,
            "call deadline elapsed",
            true,
        )
    }

    pub fn turn_limit_exceeded(max_turns: u32) -> Self {
        Self::new(
            AgentErrorKind::TurnLimitExceeded,
            format!("model did not finish within {max_turns} round trips"),
            false,
        )
    }

    pub fn registration(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Registration, message, false)
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            AgentErrorKind::NilStore | AgentErrorKind::InvalidId | AgentErrorKind::InvalidInput
        )
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for AgentError {}

impl From<ProviderError> for AgentError {
    fn from(value: ProviderError) -> Self {
        if value.is_protocol() {
            AgentError::protocol(value.to_string())
        } else {
            AgentError::transport(value.to_string(), value.retryable)
        }
    }
}

impl From<ToolError> for AgentError {
    fn from(value: ToolError) -> Self {
        AgentError::registration(value.to_string())
    }
}

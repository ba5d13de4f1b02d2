//! The per-provider adapter contract driven by the orchestration loop.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{
    BodyRequest, PendingCall, Provider, ProviderError, ToolDefinition, ToolOutcome, TurnOutput,
};

pub use tcommon::BoxFuture as ProviderFuture;

/// Translates between the uniform agent model and one provider's wire format.
///
/// `State` is the provider-native request body. It doubles as the persisted
/// conversation history, so it must survive a serde round trip unchanged.
pub trait ProviderAdapter: Send + Sync {
    type State: Serialize + DeserializeOwned + Clone + Debug + Send + Sync;

    fn provider(&self) -> Provider;

    /// Builds the body for a new call, extending `request.history` when present.
    fn body(&self, request: BodyRequest<'_>) -> Result<Self::State, ProviderError>;

    /// Replaces the tool declarations advertised on the outgoing request.
    fn attach_tools(&self, state: &mut Self::State, tools: &[ToolDefinition]);

    /// Sends `state` once and folds the response items back into it.
    fn round_trip<'a>(
        &'a self,
        state: &'a mut Self::State,
    ) -> ProviderFuture<'a, Result<TurnOutput, ProviderError>>;

    /// Appends the result of one executed call so the model sees it next turn.
    fn append_outcome(
        &self,
        state: &mut Self::State,
        call: &PendingCall,
        outcome: &ToolOutcome,
    ) -> Result<(), ProviderError>;

    fn encode_state(&self, state: &Self::State) -> Result<Vec<u8>, ProviderError> {
        Ok(serde_json::to_vec(state)?)
    }

    fn decode_state(&self, bytes: &[u8]) -> Result<Self::State, ProviderError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

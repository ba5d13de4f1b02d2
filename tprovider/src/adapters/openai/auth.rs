//! OpenAI-specific credential helpers.

use crate::{Provider, ProviderError, SecureCredentialManager};

impl SecureCredentialManager {
    /// Stores an OpenAI API key.
    ///
    /// OpenAI keys are expected to start with `sk-`.
    pub fn set_openai_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.starts_with("sk-") {
            return Err(ProviderError::authentication(
                "OpenAI API key must start with 'sk-'",
            ));
        }

        self.set_api_key(Provider::OpenAi, api_key)
    }
}

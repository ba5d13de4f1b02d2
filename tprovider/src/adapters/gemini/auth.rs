//! Gemini-specific credential helpers.

use crate::{Provider, ProviderError, SecureCredentialManager};

impl SecureCredentialManager {
    /// Stores a Gemini API key.
    pub fn set_gemini_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::authentication(
                "Gemini API key must not be blank",
            ));
        }

        self.set_api_key(Provider::Gemini, api_key)
    }
}

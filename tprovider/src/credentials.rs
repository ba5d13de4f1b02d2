//! Secure in-memory API key management.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{Provider, ProviderError};

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.value.as_str())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[derive(Default)]
pub struct SecureCredentialManager {
    api_keys: Mutex<HashMap<Provider, SecretString>>,
}

impl std::fmt::Debug for SecureCredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecureCredentialManager([REDACTED])")
    }
}

impl SecureCredentialManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(
        &self,
        provider: Provider,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        self.api_keys()?.insert(provider, api_key);
        Ok(())
    }

    pub fn has_api_key(&self, provider: Provider) -> Result<bool, ProviderError> {
        Ok(self.api_keys()?.contains_key(&provider))
    }

    pub fn api_key(&self, provider: Provider) -> Result<Option<SecretString>, ProviderError> {
        Ok(self.api_keys()?.get(&provider).cloned())
    }

    /// Looks up the key for `provider`, failing with an authentication error
    /// when none is configured.
    pub fn require_api_key(&self, provider: Provider) -> Result<SecretString, ProviderError> {
        self.api_key(provider)?.ok_or_else(|| {
            ProviderError::authentication(format!("no {provider} API key configured"))
        })
    }

    pub fn clear(&self, provider: Provider) -> Result<bool, ProviderError> {
        Ok(self.api_keys()?.remove(&provider).is_some())
    }

    fn api_keys(&self) -> Result<MutexGuard<'_, HashMap<Provider, SecretString>>, ProviderError> {
        self.api_keys
            .lock()
            .map_err(|_| ProviderError::other("credential manager lock poisoned"))
    }
}

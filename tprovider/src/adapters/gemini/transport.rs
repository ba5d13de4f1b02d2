use crate::{ProviderError, ProviderFuture, SecretString};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Sends one generateContent request for `request.model`.
pub trait GeminiTransport: Send + Sync + std::fmt::Debug {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<GenerateContentResponse, ProviderError>>;
}

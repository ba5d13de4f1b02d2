use crate::{ProviderError, ProviderFuture, SecretString};

use super::types::{ResponsesRequest, ResponsesResponse};

/// Sends one Responses API request.
pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn create_response<'a>(
        &'a self,
        request: &'a ResponsesRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ResponsesResponse, ProviderError>>;
}

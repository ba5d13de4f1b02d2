//! reqwest-based OpenAI transport.

use reqwest::Client;

use crate::http::{decode_body, map_send_error, parse_error};
use crate::{ProviderError, ProviderFuture, SecretString};

use super::transport::OpenAiTransport;
use super::types::{ResponsesRequest, ResponsesResponse};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn create_response<'a>(
        &'a self,
        request: &'a ResponsesRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ResponsesResponse, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint("responses"))
                .bearer_auth(api_key.expose())
                .json(request)
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(parse_error("OpenAI", response).await);
            }

            decode_body(response).await
        })
    }
}

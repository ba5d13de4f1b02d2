//! reqwest-based Gemini transport.

use reqwest::Client;

use crate::http::{decode_body, map_send_error, parse_error};
use crate::{ProviderError, ProviderFuture, SecretString};

use super::transport::GeminiTransport;
use super::types::{GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiHttpTransport {
    client: Client,
    base_url: String,
}

impl GeminiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate_content<'a>(
        &'a self,
        request: &'a GenerateContentRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<GenerateContentResponse, ProviderError>> {
        Box::pin(async move {
            if request.model.trim().is_empty() {
                return Err(ProviderError::invalid_request(
                    "Gemini request requires a model",
                ));
            }

            let response = self
                .client
                .post(self.endpoint(&request.model))
                .header("x-goog-api-key", api_key.expose())
                .json(request)
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(parse_error("Gemini", response).await);
            }

            decode_body(response).await
        })
    }
}

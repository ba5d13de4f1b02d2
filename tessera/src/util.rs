//! Small parsing helpers for configuration surfaces such as CLIs and env vars.

use crate::{GEMINI_API_KEY_ENV, Model, OPENAI_API_KEY_ENV, Provider};

pub fn parse_model(value: &str) -> Option<Model> {
    value.trim().parse().ok()
}

pub fn parse_provider(value: &str) -> Option<Provider> {
    match value.trim().to_ascii_lowercase().as_str() {
        "openai" | "gpt" => Some(Provider::OpenAi),
        "gemini" | "google" => Some(Provider::Gemini),
        _ => None,
    }
}

/// Environment variable holding the API key for `provider`.
pub fn api_key_env(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAi => OPENAI_API_KEY_ENV,
        Provider::Gemini => GEMINI_API_KEY_ENV,
    }
}

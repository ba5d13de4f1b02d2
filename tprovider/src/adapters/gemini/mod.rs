//! Gemini generateContent adapter.
//!
//! Conversation state is an ordered list of turns, each holding parts that
//! are text, a function call, or a function response.

mod adapter;
mod auth;
mod tests;
mod transport;
#[cfg(feature = "http-transport")]
mod transport_http;
mod types;

pub use adapter::GeminiAdapter;
pub use transport::GeminiTransport;
#[cfg(feature = "http-transport")]
pub use transport_http::{DEFAULT_GEMINI_BASE_URL, GeminiHttpTransport};
pub use types::{
    Candidate, Content, FunctionCall, FunctionDeclaration, FunctionResponse,
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, PromptFeedback,
    ROLE_MODEL, ROLE_USER, ToolDeclarations, UsageMetadata,
};

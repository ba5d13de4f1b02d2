//! OpenAI Responses API adapter.
//!
//! Conversation state is a flat, ordered list of typed items (`message`,
//! `function_call`, `function_call_output`) correlated by `call_id`.

mod adapter;
mod auth;
#[cfg(feature = "http-transport")]
mod transport_http;
mod transport;
mod types;

pub use adapter::OpenAiAdapter;
pub use transport::OpenAiTransport;
#[cfg(feature = "http-transport")]
pub use transport_http::{DEFAULT_OPENAI_BASE_URL, OpenAiHttpTransport};
pub use types::{
    ContentPart, FunctionCallItem, FunctionCallOutputItem, FunctionTool, FunctionToolKind,
    MessageItem, ResponseError, ResponseItem, ResponsesRequest, ResponsesResponse, TextConfig,
    TextFormat,
};

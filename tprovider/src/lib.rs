//! Provider adapters translating the uniform tool-calling model into
//! provider wire formats.
//!
//! Each adapter owns a transport trait object, so tests and alternative HTTP
//! stacks can replace the bundled `reqwest` transports.
//!
//! ```rust
//! use tprovider::{BodyRequest, Model, ProviderAdapter};
//! use tprovider::gemini::GeminiAdapter;
//!
//! fn first_body(adapter: &GeminiAdapter) {
//!     let model = Model::Gemini2Flash;
//!     let state = adapter
//!         .body(BodyRequest::new(model.name(), "What is 21 doubled?"))
//!         .expect("body should build");
//!     assert_eq!(state.contents.len(), 1);
//! }
//! ```

mod adapters;
mod credentials;
mod error;
#[cfg(feature = "http-transport")]
mod http;
mod model;
mod provider;

pub use adapters::{gemini, openai};
pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    BodyRequest, Model, ObjectSchema, PendingCall, Provider, ToolDefinition, ToolOutcome,
    TurnOutput,
};
pub use provider::{ProviderAdapter, ProviderFuture};

pub mod prelude {
    pub use crate::gemini::{GeminiAdapter, GeminiTransport};
    pub use crate::openai::{OpenAiAdapter, OpenAiTransport};
    pub use crate::{
        BodyRequest, Model, ObjectSchema, PendingCall, Provider, ProviderAdapter, ProviderError,
        ProviderErrorKind, SecureCredentialManager, ToolDefinition, ToolOutcome, TurnOutput,
    };

    #[cfg(feature = "http-transport")]
    pub use crate::gemini::GeminiHttpTransport;
    #[cfg(feature = "http-transport")]
    pub use crate::openai::OpenAiHttpTransport;
}

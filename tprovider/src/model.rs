//! Provider-agnostic model identifiers, schemas, and turn types.
//!
//! ```rust
//! use tprovider::{Model, Provider};
//!
//! let model: Model = "gemini-2.0-flash".parse().expect("known family");
//! assert_eq!(model, Model::Gemini2Flash);
//! assert_eq!(model.provider(), Provider::Gemini);
//! assert_eq!(Model::Gpt4oMini.name(), "gpt-4o-mini");
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::ProviderError;

/// Provider family tag chosen once per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// OpenAI Responses API (`message` / `function_call` items).
    OpenAi,
    /// Gemini generateContent API (`contents` / `parts`).
    Gemini,
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        };

        f.write_str(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    Gemini2Flash,
    Gemini2FlashLite,
    OpenAi(String),
    Gemini(String),
}

impl Model {
    pub fn provider(&self) -> Provider {
        match self {
            Self::Gpt4o | Self::Gpt4oMini | Self::OpenAi(_) => Provider::OpenAi,
            Self::Gemini2Flash | Self::Gemini2FlashLite | Self::Gemini(_) => Provider::Gemini,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gemini2Flash => "gemini-2.0-flash",
            Self::Gemini2FlashLite => "gemini-2.0-flash-lite",
            Self::OpenAi(name) | Self::Gemini(name) => name.as_str(),
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let known = [
            Self::Gpt4o,
            Self::Gpt4oMini,
            Self::Gemini2Flash,
            Self::Gemini2FlashLite,
        ];
        if let Some(model) = known.into_iter().find(|model| model.name() == value) {
            return Ok(model);
        }

        let openai_prefixes = ["gpt-", "chatgpt-", "o1", "o3", "o4"];
        if openai_prefixes.iter().any(|prefix| value.starts_with(prefix)) {
            return Ok(Self::OpenAi(value.to_string()));
        }
        if value.starts_with("gemini-") {
            return Ok(Self::Gemini(value.to_string()));
        }

        Err(ProviderError::invalid_request(format!(
            "model '{value}' does not belong to a supported provider family"
        )))
    }
}

/// The `{properties, required}` subset of a JSON-Schema object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: Value, required: bool) -> Self {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    /// Extracts properties and required names from a full JSON-Schema object.
    pub fn from_json_schema(schema: &Value) -> Result<Self, ProviderError> {
        let object = schema
            .as_object()
            .ok_or_else(|| ProviderError::invalid_request("schema must be a JSON object"))?;

        let properties = match object.get("properties") {
            Some(Value::Object(properties)) => properties.clone(),
            None | Some(Value::Null) => Map::new(),
            Some(_) => {
                return Err(ProviderError::invalid_request(
                    "schema properties must be a JSON object",
                ));
            }
        };

        let required = match object.get("required") {
            Some(Value::Array(names)) => names
                .iter()
                .map(|name| {
                    name.as_str().map(str::to_string).ok_or_else(|| {
                        ProviderError::invalid_request("schema required entries must be strings")
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(ProviderError::invalid_request(
                    "schema required must be an array",
                ));
            }
        };

        Ok(Self {
            properties,
            required,
        })
    }

    /// Renders the schema as a `type: object` JSON-Schema value.
    pub fn to_object_value(&self, additional_properties: Option<bool>) -> Value {
        let mut value = json!({
            "type": "object",
            "properties": self.properties,
            "required": self.required,
        });
        if let (Some(flag), Some(object)) = (additional_properties, value.as_object_mut()) {
            object.insert("additionalProperties".to_string(), Value::Bool(flag));
        }
        value
    }
}

/// Declaration of one tool as advertised to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub schema: ObjectSchema,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: ObjectSchema) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// Description sent on the wire; providers reject empty ones.
    pub fn effective_description(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// A tool invocation requested by the model and awaiting local execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    /// Provider correlation id (`call_id` for OpenAI, optional `id` for Gemini).
    pub call_id: Option<String>,
    pub name: String,
    pub arguments: Vec<u8>,
}

impl PendingCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<Vec<u8>>) -> Self {
        Self {
            call_id: None,
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }
}

/// Result of executing one pending call, as threaded back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Success(Vec<u8>),
    Failure { reason: String },
}

impl ToolOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Textual form used by providers that carry tool output as a string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Success(output) => String::from_utf8_lossy(output).into_owned(),
            Self::Failure { .. } => self.to_object().to_string(),
        }
    }

    /// JSON-object form used by providers that carry tool output as a struct.
    pub fn to_object(&self) -> Value {
        match self {
            Self::Success(output) => match serde_json::from_slice::<Value>(output) {
                Ok(Value::Object(object)) => Value::Object(object),
                Ok(other) => json!({ "result": other }),
                Err(_) => json!({ "result": String::from_utf8_lossy(output) }),
            },
            Self::Failure { reason } => json!({ "success": false, "reason": reason }),
        }
    }
}

/// What one round trip produced once folded into the conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnOutput {
    /// Text parts of this response, concatenated in response order.
    pub text: String,
    pub calls: Vec<PendingCall>,
    /// Whether the provider signalled that it is done with this exchange.
    pub completed: bool,
}

impl TurnOutput {
    pub fn is_final(&self) -> bool {
        self.calls.is_empty() && self.completed
    }
}

/// Inputs for building the request body of a new call.
#[derive(Debug, Clone, Copy)]
pub struct BodyRequest<'a> {
    pub model: &'a str,
    pub user_input: &'a str,
    pub system_prompt: &'a str,
    /// Serialized state from an earlier call; empty when there is none.
    pub history: &'a [u8],
    pub output_schema: Option<&'a ObjectSchema>,
}

impl<'a> BodyRequest<'a> {
    pub fn new(model: &'a str, user_input: &'a str) -> Self {
        Self {
            model,
            user_input,
            system_prompt: "",
            history: &[],
            output_schema: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: &'a str) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    pub fn with_history(mut self, history: &'a [u8]) -> Self {
        self.history = history;
        self
    }

    pub fn with_output_schema(mut self, schema: Option<&'a ObjectSchema>) -> Self {
        self.output_schema = schema;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }
        if self.user_input.is_empty() {
            return Err(ProviderError::invalid_request("user input must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Model, ObjectSchema, Provider, ToolOutcome, TurnOutput};

    #[test]
    fn model_parsing_infers_family() {
        assert_eq!("gpt-4o".parse::<Model>().expect("known"), Model::Gpt4o);
        assert_eq!(
            "gpt-4.1".parse::<Model>().expect("openai family"),
            Model::OpenAi("gpt-4.1".to_string())
        );
        assert_eq!(
            "o3-mini".parse::<Model>().expect("openai family").provider(),
            Provider::OpenAi
        );
        assert_eq!(
            "gemini-1.5-pro".parse::<Model>().expect("gemini family").provider(),
            Provider::Gemini
        );
        assert!("claude-3".parse::<Model>().is_err());
    }

    #[test]
    fn object_schema_extracts_properties_and_required() {
        let schema = ObjectSchema::from_json_schema(&json!({
            "type": "object",
            "properties": { "n": { "type": "integer" } },
            "required": ["n"]
        }))
        .expect("schema should parse");

        assert_eq!(schema.required, vec!["n".to_string()]);
        assert_eq!(
            schema.to_object_value(Some(false)),
            json!({
                "type": "object",
                "properties": { "n": { "type": "integer" } },
                "required": ["n"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn object_schema_rejects_non_object_input() {
        let error = ObjectSchema::from_json_schema(&json!(["n"])).expect_err("array is not a schema");
        assert_eq!(error.kind, crate::ProviderErrorKind::InvalidRequest);
    }

    #[test]
    fn tool_outcome_renders_structured_failure() {
        let failure = ToolOutcome::failure("disk full");

        assert_eq!(failure.to_object(), json!({ "success": false, "reason": "disk full" }));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&failure.to_text()).expect("json text"),
            json!({ "success": false, "reason": "disk full" })
        );
    }

    #[test]
    fn tool_outcome_wraps_non_object_success() {
        assert_eq!(
            ToolOutcome::Success(b"{\"n\":42}".to_vec()).to_object(),
            json!({ "n": 42 })
        );
        assert_eq!(
            ToolOutcome::Success(b"42".to_vec()).to_object(),
            json!({ "result": 42 })
        );
        assert_eq!(
            ToolOutcome::Success(b"plain".to_vec()).to_object(),
            json!({ "result": "plain" })
        );
    }

    #[test]
    fn turn_output_is_final_only_without_calls_and_with_completion() {
        let mut turn = TurnOutput {
            completed: true,
            ..TurnOutput::default()
        };
        assert!(turn.is_final());

        turn.calls.push(super::PendingCall::new("double", "{}"));
        assert!(!turn.is_final());
    }
}

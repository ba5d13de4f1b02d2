//! Responses API wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ObjectSchema, ToolDefinition};

/// Request body for `POST /responses`; also the persisted conversation state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponsesRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    #[serde(default)]
    pub input: Vec<ResponseItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<FunctionTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseItem {
    Message(MessageItem),
    FunctionCall(FunctionCallItem),
    FunctionCallOutput(FunctionCallOutputItem),
    /// Reasoning models emit these; they must be sent back verbatim alongside
    /// any function calls from the same response.
    Reasoning(Map<String, Value>),
}

impl ResponseItem {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::Message(MessageItem {
            id: None,
            role: "user".to_string(),
            content: vec![ContentPart::InputText { text: text.into() }],
            status: None,
        })
    }

    pub(crate) const KNOWN_OUTPUT_TYPES: [&'static str; 3] =
        ["message", "function_call", "reasoning"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    InputText {
        text: String,
    },
    OutputText {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        annotations: Vec<Value>,
    },
    Refusal {
        refusal: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub call_id: String,
    pub name: String,
    /// JSON-encoded arguments, exactly as the model produced them.
    #[serde(default)]
    pub arguments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallOutputItem {
    pub call_id: String,
    pub output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionToolKind {
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: FunctionToolKind,
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(default)]
    pub strict: bool,
}

impl From<&ToolDefinition> for FunctionTool {
    fn from(definition: &ToolDefinition) -> Self {
        Self {
            kind: FunctionToolKind::Function,
            name: definition.name.clone(),
            description: definition.effective_description().to_string(),
            parameters: definition.schema.to_object_value(Some(false)),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    pub format: TextFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextFormat {
    Text,
    JsonSchema {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        schema: Value,
        #[serde(default)]
        strict: bool,
    },
}

impl TextConfig {
    pub fn json_schema(schema: &ObjectSchema) -> Self {
        Self {
            format: TextFormat::JsonSchema {
                name: "schema".to_string(),
                description: Some("schema for all responses to correspond to".to_string()),
                schema: strict_schema(schema.to_object_value(Some(false))),
                strict: true,
            },
        }
    }
}

/// Rewrites a JSON schema into the subset strict structured outputs accept.
///
/// Every object closes over its properties and lists all of them as required;
/// optionality moves into the type as `[T, "null"]`.
pub(crate) fn strict_schema(mut schema: Value) -> Value {
    make_strict(&mut schema);
    schema
}

fn make_strict(schema: &mut Value) {
    let Some(object) = schema.as_object_mut() else {
        return;
    };

    if object.remove("nullable") == Some(Value::Bool(true)) {
        let kind = match object.remove("type") {
            Some(Value::String(kind)) => Some(Value::Array(vec![
                Value::String(kind),
                Value::from("null"),
            ])),
            Some(Value::Array(mut kinds)) => {
                if !kinds.contains(&Value::from("null")) {
                    kinds.push(Value::from("null"));
                }
                Some(Value::Array(kinds))
            }
            other => other,
        };
        if let Some(kind) = kind {
            object.insert("type".to_string(), kind);
        }
        if let Some(Value::Array(values)) = object.get_mut("enum") {
            if !values.contains(&Value::Null) {
                values.push(Value::Null);
            }
        }
    }

    if let Some(Value::Object(properties)) = object.get_mut("properties") {
        for property in properties.values_mut() {
            make_strict(property);
        }
        let names = properties.keys().cloned().map(Value::String).collect();
        object.insert("required".to_string(), Value::Array(names));
        object.insert("additionalProperties".to_string(), Value::Bool(false));
    }

    if let Some(items) = object.get_mut("items") {
        make_strict(items);
    }
    for key in ["anyOf", "oneOf", "allOf"] {
        if let Some(Value::Array(variants)) = object.get_mut(key) {
            variants.iter_mut().for_each(make_strict);
        }
    }
}

/// Response body of `POST /responses`.
///
/// Output items stay untyped until the adapter has checked their tag, so an
/// unrecognized item is reported by name instead of as a decode failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

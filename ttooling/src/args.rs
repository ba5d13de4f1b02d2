//! Raw argument decoding and result encoding for tools.
//!
//! Providers deliver arguments either as a JSON object or as a JSON string
//! holding one, so decoding unwraps a single level of string encoding.
//!
//! ```rust
//! use serde::Deserialize;
//! use ttooling::decode_arguments;
//!
//! #[derive(Deserialize)]
//! struct Input {
//!     n: i64,
//! }
//!
//! let direct: Input = decode_arguments(br#"{"n":21}"#).expect("object should decode");
//! let wrapped: Input = decode_arguments(br#""{\"n\":21}""#).expect("string should decode");
//! assert_eq!(direct.n, wrapped.n);
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ToolError;

pub fn parse_json_value(raw: &[u8]) -> Result<Value, ToolError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value = serde_json::from_slice::<Value>(raw)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))?;

    match value {
        Value::String(encoded) => serde_json::from_str(&encoded).map_err(|err| {
            ToolError::invalid_arguments(format!("invalid JSON-encoded arguments: {err}"))
        }),
        Value::Null => Ok(Value::Object(Map::new())),
        other => Ok(other),
    }
}

pub fn parse_json_object(raw: &[u8]) -> Result<Map<String, Value>, ToolError> {
    match parse_json_value(raw)? {
        Value::Object(object) => Ok(object),
        _ => Err(ToolError::invalid_arguments("expected JSON object arguments")),
    }
}

pub fn required_string(args: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required string: '{key}'")))
}

/// Decodes raw tool arguments into the tool's declared input type.
pub fn decode_arguments<T>(raw: &[u8]) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    let value = parse_json_value(raw)?;
    serde_json::from_value(value)
        .map_err(|err| ToolError::invalid_arguments(format!("arguments do not match input: {err}")))
}

pub fn encode_output<T>(output: &T) -> Result<Vec<u8>, ToolError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_vec(output)
        .map_err(|err| ToolError::serialization(format!("failed to encode tool output: {err}")))
}

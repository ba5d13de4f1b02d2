//! Input-schema derivation for typed tools.
//!
//! ```rust
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use ttooling::derive_schema;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Input {
//!     n: i64,
//!     note: Option<String>,
//! }
//!
//! let schema = derive_schema::<Input>();
//! assert!(schema.properties.contains_key("note"));
//! assert_eq!(schema.required, vec!["n".to_string()]);
//! ```

use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde_json::Value;
use tprovider::ObjectSchema;

use crate::ToolError;

/// Derives `{properties, required}` from `T`'s shape with nested types inlined.
///
/// Falls back to an empty schema, with a warning, when `T` is not an object type.
/// Use [`try_derive_schema`] to surface that as an error instead.
pub fn derive_schema<T>() -> ObjectSchema
where
    T: JsonSchema,
{
    try_derive_schema::<T>().unwrap_or_else(|error| {
        tracing::warn!(
            phase = "tooling",
            event = "schema_derivation_failed",
            schema = %T::schema_name(),
            error = %error
        );
        ObjectSchema::default()
    })
}

/// Like [`derive_schema`], but fails when `T` does not describe a JSON object.
pub fn try_derive_schema<T>() -> Result<ObjectSchema, ToolError>
where
    T: JsonSchema,
{
    let generator = SchemaSettings::draft07()
        .with(|settings| {
            settings.inline_subschemas = true;
            settings.option_add_null_type = false;
            settings.option_nullable = true;
        })
        .into_generator();
    let root = generator.into_root_schema_for::<T>();

    let value = serde_json::to_value(root)
        .map_err(|err| ToolError::serialization(format!("schema for {}: {err}", T::schema_name())))?;
    if value.get("type").and_then(Value::as_str) != Some("object") {
        return Err(ToolError::invalid_arguments(format!(
            "{} does not derive an object schema",
            T::schema_name()
        )));
    }
    ObjectSchema::from_json_schema(&value).map_err(|err| {
        ToolError::invalid_arguments(format!("schema for {}: {}", T::schema_name(), err.message))
    })
}

/// Parses an explicit JSON-Schema definition supplied alongside a tool.
pub fn schema_from_json(definition: &str) -> Result<ObjectSchema, ToolError> {
    let value = serde_json::from_str::<Value>(definition)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid tool definition: {err}")))?;
    ObjectSchema::from_json_schema(&value)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid tool definition: {}", err.message)))
}

#[cfg(test)]
mod tests {
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct Inner {
        label: String,
    }

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct Outer {
        inner: Inner,
        count: u32,
    }

    #[test]
    fn nested_types_are_inlined() {
        let schema = derive_schema::<Outer>();

        assert_eq!(schema.required, vec!["count".to_string(), "inner".to_string()]);
        assert_eq!(schema.properties["inner"]["type"], json!("object"));
        assert_eq!(
            schema.properties["inner"]["properties"]["label"]["type"],
            json!("string")
        );
    }

    #[test]
    fn non_object_types_fail_strict_derivation_and_fall_back_to_empty() {
        let error = try_derive_schema::<Vec<u32>>().expect_err("arrays are not objects");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidArguments);
        assert!(error.message.contains("does not derive an object schema"));

        assert_eq!(derive_schema::<Vec<u32>>(), ObjectSchema::default());
        assert!(try_derive_schema::<Outer>().is_ok());
    }

    #[test]
    fn explicit_definitions_are_parsed() {
        let schema = schema_from_json(
            r#"{"type":"object","properties":{"city":{"type":"string"}},"required":["city"]}"#,
        )
        .expect("definition should parse");
        assert_eq!(schema.required, vec!["city".to_string()]);

        let error = schema_from_json("[]").expect_err("array is not a definition");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidArguments);
    }
}

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_valid::Validate;
use std::fmt;

/// Root configuration describing a single node to generate.
///
/// This structure is deserialized from a JSON configuration file. It captures:
/// - identity (`name`, `displayName`, `description`, `version`)
/// - presentation (`icon`, `group`, `color`)
/// - the backing service (`api_url`, `supports_file_upload`)
/// - the property schema the node exposes (`input_schema`)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct NodeConfig {
    /// Identifier seed. Class, file and internal names are derived from it.
    #[validate(min_length = 1)]
    pub name: String,

    /// Human-facing node name.
    #[serde(rename = "displayName")]
    #[validate(min_length = 1)]
    pub display_name: String,

    /// Short description shown in the node catalog.
    #[validate(min_length = 1)]
    pub description: String,

    /// Dotted version string; only the major segment is used.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// Ordered category tags.
    #[serde(default)]
    pub group: Option<Vec<String>>,

    /// Node color, e.g. `#4CAF50`.
    #[serde(default)]
    pub color: Option<String>,

    /// Endpoint the generated node calls by default.
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub supports_file_upload: bool,

    /// Object schema whose properties become node parameters.
    pub input_schema: InputSchema,

    /// Documentation only; not used for emission.
    #[serde(default)]
    pub output_schema: Option<Value>,
}

/// Map of property key -> schema, in declaration order.
pub type PropertyMap = IndexMap<String, PropertySchema>;

/// The `input_schema` object of a node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InputSchema {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub properties: PropertyMap,

    /// Keys listed as required at the object level.
    #[serde(default)]
    pub required: Vec<String>,
}

/// Schema for a single node property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PropertySchema {
    #[serde(rename = "type", default)]
    #[schemars(with = "String")]
    pub kind: PropertyType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Explicit default. A literal `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Value>")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Element schema for arrays. An object carrying only `enum` marks a
    /// multi-select list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,

    /// Nested properties, meaningful when `type` is `object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap>,

    /// Conditional visibility rules (`show`/`hide` and any other host keys),
    /// kept as written and passed through to the generated node.
    #[serde(
        rename = "displayOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_options: Option<Value>,
}

impl PropertySchema {
    /// Convenience constructor used by tests and callers building schemas in code.
    pub fn of(kind: PropertyType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Allowed values of the array element schema, if any.
    pub fn item_enum(&self) -> Option<&[Value]> {
        self.items
            .as_deref()
            .and_then(|items| items.enum_values.as_deref())
    }

    /// Nested properties of an object property (empty maps count as absent).
    pub fn nested(&self) -> Option<&PropertyMap> {
        match (&self.kind, &self.properties) {
            (PropertyType::Object, Some(props)) if !props.is_empty() => Some(props),
            _ => None,
        }
    }
}

/// Abstract schema type of a property.
///
/// Unrecognized type names are kept verbatim in `Other` instead of failing
/// deserialization; they render as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Other(String),
}

impl Default for PropertyType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => Self::Other(value),
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize a field that is present in the input, keeping `null` as a value.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_is_preserved() {
        let prop: PropertySchema = serde_json::from_value(json!({"type": "date"})).unwrap();
        assert_eq!(prop.kind, PropertyType::Other("date".into()));
        assert_eq!(prop.kind.to_string(), "date");
    }

    #[test]
    fn explicit_null_default_is_kept() {
        let prop: PropertySchema =
            serde_json::from_value(json!({"type": "string", "default": null})).unwrap();
        assert_eq!(prop.default, Some(Value::Null));

        let prop: PropertySchema = serde_json::from_value(json!({"type": "string"})).unwrap();
        assert_eq!(prop.default, None);
    }

    #[test]
    fn items_enum_parses_as_nested_schema() {
        let prop: PropertySchema = serde_json::from_value(json!({
            "type": "array",
            "items": {"enum": ["a", "b"]}
        }))
        .unwrap();
        assert_eq!(prop.item_enum(), Some(&[json!("a"), json!("b")][..]));
    }

    #[test]
    fn property_order_follows_the_document() {
        let schema: InputSchema = serde_json::from_str(
            r#"{"type":"object","properties":{"zeta":{"type":"string"},"alpha":{"type":"number"},"mid":{"type":"boolean"}}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn display_options_are_kept_verbatim() {
        let prop: PropertySchema = serde_json::from_value(json!({
            "type": "string",
            "displayOptions": {"show": {"mode": ["x"]}, "hideOnCloud": true}
        }))
        .unwrap();
        assert_eq!(
            prop.display_options,
            Some(json!({"show": {"mode": ["x"]}, "hideOnCloud": true}))
        );
    }

    #[test]
    fn nested_requires_object_type() {
        let mut prop = PropertySchema::of(PropertyType::Array);
        prop.properties = Some(PropertyMap::from([(
            "x".to_string(),
            PropertySchema::of(PropertyType::Number),
        )]));
        assert!(prop.nested().is_none());
        prop.kind = PropertyType::Object;
        assert_eq!(prop.nested().map(|m| m.len()), Some(1));
    }
}

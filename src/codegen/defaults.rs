use serde_json::{Map, Value};

use crate::config::{PropertySchema, PropertyType};

/// Default value for a property: the explicit `default` if present, otherwise
/// one inferred from its type.
///
/// Both the UI definition and the runtime parameter read use this value, so
/// the two can never disagree.
pub fn infer_default(prop: &PropertySchema) -> Value {
    if let Some(explicit) = &prop.default {
        return explicit.clone();
    }
    match &prop.kind {
        PropertyType::String => prop
            .enum_values
            .as_ref()
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
        PropertyType::Number | PropertyType::Integer => Value::from(0),
        PropertyType::Boolean => Value::Bool(false),
        PropertyType::Array => Value::Array(Vec::new()),
        PropertyType::Object => Value::Object(Map::new()),
        PropertyType::Other(_) => Value::String(String::new()),
    }
}

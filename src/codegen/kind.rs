use std::fmt;

use crate::config::{PropertySchema, PropertyType};

/// Concrete UI control a schema property is rendered as.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    FreeText,
    Numeric,
    Toggle,
    EnumChoice,
    MultiSelect,
    NestedCollection,
}

impl PropertyKind {
    /// The host platform's name for this control type.
    pub fn host_type(self) -> &'static str {
        match self {
            Self::FreeText => "string",
            Self::Numeric => "number",
            Self::Toggle => "boolean",
            Self::EnumChoice => "options",
            Self::MultiSelect => "multiOptions",
            Self::NestedCollection => "collection",
        }
    }

    /// Whether this kind carries an options list.
    pub fn has_options(self) -> bool {
        matches!(self, Self::EnumChoice | Self::MultiSelect)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_type())
    }
}

/// Map an abstract property schema to its UI kind.
///
/// Unrecognized types fall back to free text without error.
pub fn map_type(prop: &PropertySchema) -> PropertyKind {
    match &prop.kind {
        PropertyType::String if prop.enum_values.is_some() => PropertyKind::EnumChoice,
        PropertyType::String => PropertyKind::FreeText,
        PropertyType::Number | PropertyType::Integer => PropertyKind::Numeric,
        PropertyType::Boolean => PropertyKind::Toggle,
        PropertyType::Array if prop.item_enum().is_some() => PropertyKind::MultiSelect,
        PropertyType::Array | PropertyType::Object => PropertyKind::NestedCollection,
        PropertyType::Other(_) => PropertyKind::FreeText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(v: serde_json::Value) -> PropertySchema {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn mapping_table() {
        let cases = [
            (json!({"type": "string"}), PropertyKind::FreeText),
            (json!({"type": "string", "enum": ["a"]}), PropertyKind::EnumChoice),
            (json!({"type": "number"}), PropertyKind::Numeric),
            (json!({"type": "integer"}), PropertyKind::Numeric),
            (json!({"type": "boolean"}), PropertyKind::Toggle),
            (json!({"type": "array", "items": {"enum": ["x"]}}), PropertyKind::MultiSelect),
            (json!({"type": "array", "items": {"type": "string"}}), PropertyKind::NestedCollection),
            (json!({"type": "array"}), PropertyKind::NestedCollection),
            (json!({"type": "object"}), PropertyKind::NestedCollection),
            (json!({"type": "date"}), PropertyKind::FreeText),
            (json!({}), PropertyKind::FreeText),
        ];
        for (input, expected) in cases {
            assert_eq!(map_type(&schema(input.clone())), expected, "for {input}");
        }
    }

    #[test]
    fn host_type_names() {
        assert_eq!(PropertyKind::EnumChoice.to_string(), "options");
        assert_eq!(PropertyKind::MultiSelect.host_type(), "multiOptions");
        assert!(PropertyKind::MultiSelect.has_options());
        assert!(!PropertyKind::NestedCollection.has_options());
    }
}

//! Declarative property definitions for the generated node's UI.

use serde_json::Value;
use tracing::debug;

use super::defaults::infer_default;
use super::emit::{CodeWriter, Emit, block_literal, inline_literal, string_literal};
use super::kind::{PropertyKind, map_type};
use crate::config::{PropertyMap, PropertySchema, PropertyType};
use crate::utils::case::to_capitalized_words;

/// One selectable value of an enumerated or multi-select property.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionNode {
    pub label: String,
    pub value: Value,
}

impl OptionNode {
    /// String values get a capitalized-words label; anything else is stringified.
    pub fn from_value(value: &Value) -> Self {
        let label = match value {
            Value::String(s) => to_capitalized_words(s),
            other => other.to_string(),
        };
        Self {
            label,
            value: value.clone(),
        }
    }
}

/// A single property definition in the node description.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub display_name: String,
    pub name: String,
    pub kind: PropertyKind,
    pub default: Value,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub options: Vec<OptionNode>,
    pub display_options: Option<Value>,
}

impl PropertyNode {
    pub fn from_schema(key: &str, prop: &PropertySchema) -> Self {
        let kind = map_type(prop);
        if let PropertyType::Other(name) = &prop.kind {
            debug!(
                target: "nodegen::codegen",
                %key, kind = %name,
                "Unrecognized property type; rendering as free text"
            );
        }

        let allowed = match kind {
            PropertyKind::EnumChoice => prop.enum_values.as_deref(),
            PropertyKind::MultiSelect => prop.item_enum(),
            _ => None,
        };

        Self {
            display_name: prop
                .description
                .clone()
                .unwrap_or_else(|| to_capitalized_words(key)),
            name: key.to_string(),
            kind,
            default: infer_default(prop),
            placeholder: prop.placeholder.clone(),
            description: prop.description.clone(),
            required: prop.required,
            options: allowed
                .unwrap_or_default()
                .iter()
                .map(OptionNode::from_value)
                .collect(),
            display_options: prop.display_options.clone(),
        }
    }
}

impl Emit for PropertyNode {
    fn emit(&self, out: &mut CodeWriter) {
        out.line("{");
        out.indented(|out| {
            out.line(format!("displayName: {},", string_literal(&self.display_name)));
            out.line(format!("name: {},", string_literal(&self.name)));
            out.line(format!("type: {},", string_literal(self.kind.host_type())));
            out.line(format!("default: {},", inline_literal(&self.default)));
            if let Some(placeholder) = &self.placeholder {
                out.line(format!("placeholder: {},", string_literal(placeholder)));
            }
            if let Some(description) = &self.description {
                out.line(format!("description: {},", string_literal(description)));
            }
            if self.required {
                out.line("required: true,");
            }
            if self.kind.has_options() {
                out.line("options: [");
                out.indented(|out| {
                    for option in &self.options {
                        out.line("{");
                        out.indented(|out| {
                            out.line(format!("name: {},", string_literal(&option.label)));
                            out.line(format!("value: {},", inline_literal(&option.value)));
                        });
                        out.line("},");
                    }
                });
                out.line("],");
            }
            if let Some(display_options) = &self.display_options {
                out.line("displayOptions: ");
                block_literal(display_options, out);
                out.append(",");
            }
        });
        out.line("}");
    }
}

/// Build one property definition per schema key, in schema order.
pub fn emit_properties(schema: &PropertyMap) -> Vec<PropertyNode> {
    schema
        .iter()
        .map(|(key, prop)| PropertyNode::from_schema(key, prop))
        .collect()
}

/*!
Code generation for node modules.

The pipeline from a property schema to source text:
- `kind`: schema type -> UI property kind
- `defaults`: the single default-inference policy shared by both fragments
- `properties`: schema -> `PropertyNode`s (declarative UI definition)
- `extraction`: schema -> `Statement`s (runtime parameter reads + payload)
- `emit`: fragment nodes -> indented TypeScript text via the `Emit` trait

Fragments are built as nodes first and serialized last, so their structure
can be inspected independently of formatting.
*/

pub mod defaults;
pub mod emit;
pub mod extraction;
pub mod kind;
pub mod properties;

pub use defaults::infer_default;
pub use emit::{CodeWriter, Emit, emit_all};
pub use extraction::{Expr, Statement, emit_extraction};
pub use kind::{PropertyKind, map_type};
pub use properties::{OptionNode, PropertyNode, emit_properties};

use crate::config::PropertyMap;

/// Indentation depth of the properties slot in the node template.
pub const PROPERTIES_INDENT: usize = 4;
/// Indentation depth of the parameter-extraction slot in the node template.
pub const EXTRACTION_INDENT: usize = 4;

/// Properties fragment text, one definition per schema key.
pub fn render_properties(schema: &PropertyMap) -> String {
    emit_all(&emit_properties(schema), ",", PROPERTIES_INDENT)
}

/// Parameter-extraction fragment text.
pub fn render_extraction(schema: &PropertyMap) -> String {
    emit_all(&emit_extraction(schema), "", EXTRACTION_INDENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn schema() -> PropertyMap {
        serde_json::from_value(json!({
            "text": {"type": "string"},
            "mode": {"type": "string", "enum": ["a", "b"]},
            "count": {"type": "integer"},
            "flag": {"type": "boolean"},
            "tags": {"type": "array"},
            "extra": {"type": "object"},
            "when": {"type": "date"},
            "point": {
                "type": "object",
                "properties": {"x": {"type": "number"}, "y": {"type": "string"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn ui_and_extraction_defaults_agree() {
        let schema = schema();
        let ui: Vec<(String, Value)> = emit_properties(&schema)
            .into_iter()
            .map(|p| (p.name, p.default))
            .collect();

        for (name, default) in ui {
            let read = emit_extraction(&schema).into_iter().find_map(|s| match s {
                Statement::Read { key, default: read, .. } if key == name => Some(read),
                _ => None,
            });
            assert_eq!(read, Some(default), "default mismatch for {name}");
        }
    }

    #[test]
    fn rendered_fragments_are_stable() {
        let schema = schema();
        assert_eq!(render_properties(&schema), render_properties(&schema));
        assert_eq!(render_extraction(&schema), render_extraction(&schema));
    }

    #[test]
    fn empty_schema_renders_nothing() {
        let empty = PropertyMap::new();
        assert_eq!(render_properties(&empty), "");
        assert_eq!(render_extraction(&empty), "");
    }
}

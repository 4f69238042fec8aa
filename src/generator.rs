//! End-to-end node generation.
//!
//! A [`Generator`] holds only its parsed template; every call to
//! [`Generator::generate`] derives everything else from the configuration it
//! is given, so a generator can be shared or rebuilt freely.

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::codegen::emit::escape_single_quoted;
use crate::codegen::{render_extraction, render_properties};
use crate::config::{self, NodeConfig};
use crate::error::Result;
use crate::template::manifest::{major_version, render_manifest};
use crate::template::{Placeholder, Substitutions, Template};
use crate::utils::case::{to_camel_case, to_pascal_case};

pub const DEFAULT_GROUP: &str = "transform";
pub const DEFAULT_COLOR: &str = "#4CAF50";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/execute";

/// Identifiers derived from the configured `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    /// Class, directory, file and manifest name.
    pub class_name: String,
    /// Name the node registers under.
    pub internal_name: String,
}

impl Identifiers {
    pub fn derive(name: &str) -> Self {
        Self {
            class_name: to_pascal_case(name),
            internal_name: to_camel_case(name),
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedNode {
    pub identifiers: Identifiers,
    pub module_source: String,
    pub manifest: String,
    pub property_count: usize,
}

impl GeneratedNode {
    pub fn module_file_name(&self) -> String {
        format!("{}.node.ts", self.identifiers.class_name)
    }

    pub fn manifest_file_name(&self) -> String {
        format!("{}.node.json", self.identifiers.class_name)
    }
}

/// Module version: integer value of the major segment, 1 if it is not numeric.
pub fn module_version(version: Option<&str>) -> u64 {
    let major = major_version(version);
    let digits: String = major.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(1)
}

/// Renders node modules and manifests from configurations.
#[derive(Debug, Clone)]
pub struct Generator {
    template: Template,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Template::builtin())
    }
}

impl Generator {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Build a generator from a template file.
    pub async fn from_template_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Template::load(path).await?))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Slot values for `config`.
    pub fn substitutions(&self, config: &NodeConfig, ids: &Identifiers) -> Substitutions {
        let schema = &config.input_schema.properties;
        let group = config
            .group
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_GROUP.to_string()]);

        let mut subs = Substitutions::new();
        subs.set(Placeholder::ClassName, ids.class_name.as_str())
            .set(Placeholder::InternalName, ids.internal_name.as_str())
            .set(
                Placeholder::DisplayName,
                escape_single_quoted(&config.display_name),
            )
            .set(
                Placeholder::Description,
                escape_single_quoted(&config.description),
            )
            .set(Placeholder::Group, Value::from(group))
            .set(
                Placeholder::Version,
                module_version(config.version.as_deref()).to_string(),
            )
            .set(
                Placeholder::Color,
                escape_single_quoted(config.color.as_deref().unwrap_or(DEFAULT_COLOR)),
            )
            .set(
                Placeholder::ApiUrl,
                escape_single_quoted(config.api_url.as_deref().unwrap_or(DEFAULT_API_URL)),
            )
            .set(Placeholder::Properties, render_properties(schema))
            .set(Placeholder::ParameterExtraction, render_extraction(schema));
        subs
    }

    /// Render the module source and manifest for `config`.
    #[instrument(level = "debug", skip_all, fields(name = %config.name))]
    pub fn generate(&self, config: &NodeConfig) -> Result<GeneratedNode> {
        let identifiers = Identifiers::derive(&config.name);
        debug!(
            target: "nodegen::generator",
            class_name = %identifiers.class_name,
            internal_name = %identifiers.internal_name,
            "Derived identifiers"
        );

        let module_source = self
            .template
            .render(&self.substitutions(config, &identifiers))?;
        let manifest = render_manifest(config, &identifiers.class_name)?;

        Ok(GeneratedNode {
            identifiers,
            module_source,
            manifest,
            property_count: config.input_schema.properties.len(),
        })
    }
}

/// Load the configuration, read the template (builtin when `template_path` is
/// `None`) and generate. Steps run strictly one after another.
pub async fn generate_from_paths(
    config_path: &Path,
    template_path: Option<&Path>,
) -> Result<(NodeConfig, GeneratedNode)> {
    let config = config::load(config_path).await?;
    let generator = match template_path {
        Some(path) => Generator::from_template_path(path).await?,
        None => Generator::default(),
    };
    let node = generator.generate(&config)?;
    info!(
        target: "nodegen::generator",
        class_name = %node.identifiers.class_name,
        properties = node.property_count,
        "Generated node"
    );
    Ok((config, node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_from_str;
    use serde_json::json;

    fn config() -> NodeConfig {
        load_from_str(
            &json!({
                "name": "text_tools",
                "displayName": "Text Tools",
                "description": "Transforms text",
                "version": "2.1.0",
                "group": ["transform", "text"],
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "text": {"type": "string", "description": "Text to process", "required": true},
                        "mode": {"type": "string", "enum": ["a", "b"]},
                        "point": {
                            "type": "object",
                            "properties": {
                                "x": {"type": "number"},
                                "y": {"type": "string", "default": "z"}
                            }
                        }
                    }
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn identifiers_from_name() {
        let ids = Identifiers::derive("my-custom node");
        assert_eq!(ids.class_name, "MyCustomNode");
        assert_eq!(ids.internal_name, "myCustomNode");
    }

    #[test]
    fn module_version_parsing() {
        assert_eq!(module_version(None), 1);
        assert_eq!(module_version(Some("2.1.0")), 2);
        assert_eq!(module_version(Some("10")), 10);
        assert_eq!(module_version(Some("3beta.1")), 3);
        assert_eq!(module_version(Some("v2")), 1);
    }

    #[test]
    fn generated_module_has_no_slots_left() {
        let node = Generator::default().generate(&config()).unwrap();
        for slot in Placeholder::ALL {
            assert!(
                !node.module_source.contains(&slot.marker()),
                "{slot} left in output"
            );
        }
        let src = &node.module_source;
        assert!(src.contains("export class TextTools implements INodeType"));
        assert!(src.contains("name: 'textTools',"));
        assert!(src.contains("group: [\"transform\",\"text\"],"));
        assert!(src.contains("version: 2,"));
        assert!(src.contains("color: '#4CAF50',"));
        assert!(src.contains("default: 'http://127.0.0.1:5000/api/execute',"));
        assert!(src.contains("subtitle: '={{$parameter[\"method\"] + \": \" + $parameter[\"url\"]}}',"));
    }

    #[test]
    fn generated_module_contains_both_fragments() {
        let node = Generator::default().generate(&config()).unwrap();
        let src = &node.module_source;
        assert!(src.contains("\t\t\t\t{\n\t\t\t\t\tdisplayName: 'Text to process',"));
        assert!(src.contains("\t\t\t\t\tdefault: 'a',"));
        assert!(src.contains("\t\t\t\tconst mode = this.getNodeParameter('mode', i, 'a');"));
        assert!(src.contains("const x = this.getNodeParameter('x', i, 0);"));
        assert!(src.contains("const y = this.getNodeParameter('y', i, 'z');"));
        assert!(src.contains("requestBody.point = {\n\t\t\t\t\tx: x,\n\t\t\t\t\ty: y,\n\t\t\t\t};"));
        assert_eq!(node.property_count, 3);
    }

    #[test]
    fn generation_is_idempotent() {
        let generator = Generator::default();
        let cfg = config();
        assert_eq!(generator.generate(&cfg).unwrap(), generator.generate(&cfg).unwrap());
        assert_eq!(
            Generator::default().generate(&cfg).unwrap(),
            generator.generate(&cfg).unwrap()
        );
    }

    #[test]
    fn quotes_in_metadata_are_escaped() {
        let mut cfg = config();
        cfg.display_name = "Bob's Tools".into();
        let node = Generator::default().generate(&cfg).unwrap();
        assert!(node.module_source.contains("displayName: 'Bob\\'s Tools',"));
    }

    #[test]
    fn manifest_and_file_names() {
        let node = Generator::default().generate(&config()).unwrap();
        assert_eq!(node.module_file_name(), "TextTools.node.ts");
        assert_eq!(node.manifest_file_name(), "TextTools.node.json");
        let manifest: Value = serde_json::from_str(&node.manifest).unwrap();
        assert_eq!(manifest["node"], "n8n-nodes-TextTools");
        assert_eq!(manifest["nodeVersion"], "2");
        assert_eq!(manifest["categories"], json!(["transform", "text"]));
    }

    #[test]
    fn substitutions_cover_every_slot() {
        let subs = Generator::default().substitutions(&config(), &Identifiers::derive("x"));
        for slot in Placeholder::ALL {
            assert!(subs.get(slot).is_some(), "no value for {slot}");
        }
    }

    #[test]
    fn demo_config_generates() {
        let cfg = load_from_str(include_str!("../demos/config.json")).unwrap();
        assert!(cfg.input_schema.properties["text"].required);

        let node = Generator::default().generate(&cfg).unwrap();
        let src = &node.module_source;
        assert!(src.contains("export class TextProcessor implements INodeType"));
        assert!(src.contains("type: 'multiOptions',"));
        assert!(src.contains("default: ['uppercase'],"));
        assert!(src.contains("const caseSensitive = this.getNodeParameter('case_sensitive', i, true);"));
        assert!(src.contains("requestBody.find_replace = {"));
        assert!(src.contains("enable_find_replace: [true],"));
        assert!(src.contains("version: 1,"));
        assert!(src.contains("color: '#2196F3',"));
        assert_eq!(node.property_count, 7);
    }

    #[tokio::test]
    async fn generate_from_paths_with_custom_template() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let template_path = dir.path().join("node.ts");
        std::fs::write(
            &config_path,
            json!({
                "name": "echo",
                "displayName": "Echo",
                "description": "Echoes input",
                "input_schema": {"type": "object", "properties": {"msg": {"type": "string"}}}
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(&template_path, "class {{class_name}} v{{version}} {{group}}").unwrap();

        let (cfg, node) = generate_from_paths(&config_path, Some(&template_path))
            .await
            .unwrap();
        assert_eq!(cfg.name, "echo");
        assert_eq!(node.module_source, "class Echo v1 [\"transform\"]");
    }

    #[tokio::test]
    async fn missing_input_schema_fails_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{"name": "echo", "displayName": "Echo", "description": "Echoes input"}"#,
        )
        .unwrap();
        let err = generate_from_paths(&config_path, None).await.unwrap_err();
        assert!(err.is_validation());

        let entries: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, ["config.json"]);
    }
}

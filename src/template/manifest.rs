//! Companion manifest cataloging a generated node.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::NodeConfig;
use crate::error::{GeneratorError, Result};

/// Namespace prefix of the generated node identifier.
pub const NODE_NAMESPACE: &str = "n8n-nodes-";
pub const CODEX_VERSION: &str = "1.0";
pub const DEFAULT_CATEGORIES: &[&str] = &["Development"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub node: String,
    pub node_version: String,
    pub codex_version: String,
    pub categories: Vec<String>,
    pub resources: Map<String, Value>,
}

/// First dot-segment of `version`, or `"1"` when absent or empty.
pub fn major_version(version: Option<&str>) -> String {
    version
        .and_then(|v| v.split('.').next())
        .map(str::trim)
        .filter(|major| !major.is_empty())
        .unwrap_or("1")
        .to_string()
}

pub fn build_manifest(config: &NodeConfig, normalized_name: &str) -> Manifest {
    Manifest {
        node: format!("{NODE_NAMESPACE}{normalized_name}"),
        node_version: major_version(config.version.as_deref()),
        codex_version: CODEX_VERSION.to_string(),
        categories: config
            .group
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()),
        resources: Map::new(),
    }
}

/// Tab-indented manifest JSON.
pub fn render_manifest(config: &NodeConfig, normalized_name: &str) -> Result<String> {
    let manifest = build_manifest(config, normalized_name);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest
        .serialize(&mut ser)
        .map_err(GeneratorError::ManifestSerialize)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

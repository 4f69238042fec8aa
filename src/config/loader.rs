use schemars::{Schema, schema_for};
use serde_json::Value;
use serde_valid::Validate;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

use super::models::NodeConfig;
use crate::error::{GeneratorError, Result};

/// Top-level fields that must be present and non-empty.
const REQUIRED_FIELDS: [&str; 4] = ["name", "displayName", "description", "input_schema"];

/// Load configuration from a string slice.
pub fn load_from_str(s: &str) -> Result<NodeConfig> {
    let raw: Value = serde_json::from_str(s).map_err(GeneratorError::ConfigParse)?;
    from_value(raw)
}

/// Load configuration from any reader (e.g., a file).
pub fn load_from_reader<R: Read>(reader: R) -> Result<NodeConfig> {
    let raw: Value = serde_json::from_reader(reader).map_err(GeneratorError::ConfigParse)?;
    from_value(raw)
}

/// Load configuration from a file path synchronously.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<NodeConfig> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|source| GeneratorError::ConfigRead {
        path: path_ref.to_path_buf(),
        source,
    })?;
    let cfg = load_from_reader(file)?;
    debug!(target: "nodegen::config", "Loaded config from {}", path_ref.display());
    Ok(cfg)
}

/// Load configuration from a file path asynchronously (Tokio).
pub async fn load_from_path_async<P: AsRef<Path>>(path: P) -> Result<NodeConfig> {
    use tokio::fs;
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref)
        .await
        .map_err(|source| GeneratorError::ConfigRead {
            path: path_ref.to_path_buf(),
            source,
        })?;
    let raw: Value = serde_json::from_slice(&bytes).map_err(GeneratorError::ConfigParse)?;
    let cfg = from_value(raw)?;
    debug!(
        target: "nodegen::config",
        name = %cfg.name,
        properties = cfg.input_schema.properties.len(),
        "Loaded config from {}",
        path_ref.display()
    );
    Ok(cfg)
}

/// Load and validate the configuration at `path`.
///
/// Either a fully valid configuration is returned or an error; never a partial one.
pub async fn load<P: AsRef<Path>>(path: P) -> Result<NodeConfig> {
    load_from_path_async(path).await
}

/// Generate the JSON Schema for the configuration model.
pub fn generate_schema() -> Schema {
    schema_for!(NodeConfig)
}

/// Write the JSON Schema for the configuration model to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> anyhow::Result<()> {
    use anyhow::Context;
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

/// Presence check, typed deserialization, then field rules.
fn from_value(raw: Value) -> Result<NodeConfig> {
    check_required(&raw)?;
    let mut cfg: NodeConfig = serde_json::from_value(raw)
        .map_err(|e| GeneratorError::ConfigValidation(e.to_string()))?;
    validate_config(&cfg)?;
    apply_object_required(&mut cfg);
    Ok(cfg)
}

/// Report every required top-level field that is absent, null, or empty.
fn check_required(raw: &Value) -> Result<()> {
    let Some(obj) = raw.as_object() else {
        return Err(GeneratorError::ConfigValidation(
            "configuration must be a JSON object".into(),
        ));
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| match obj.get(*field) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GeneratorError::missing_fields(&missing))
    }
}

/// Field-level rules on an already typed configuration.
pub fn validate_config(cfg: &NodeConfig) -> Result<()> {
    cfg.validate()
        .map_err(|errors| GeneratorError::ConfigValidation(errors.to_string()))
}

/// Fold the object-level `required` list into the per-property flags.
///
/// Keys that name no property are ignored with a warning.
fn apply_object_required(cfg: &mut NodeConfig) {
    let schema = &mut cfg.input_schema;
    for key in &schema.required {
        match schema.properties.get_mut(key) {
            Some(prop) => prop.required = true,
            None => warn!(
                target: "nodegen::config",
                %key,
                "input_schema.required names an unknown property"
            ),
        }
    }
}

//! Error types for the node generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::Placeholder;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while loading a configuration or generating a node.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not well-formed JSON.
    #[error("Failed to parse config JSON: {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// The configuration is well-formed JSON but does not describe a valid node.
    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    /// The template file could not be read.
    #[error("Failed to read template '{path}': {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template slot was left without a value.
    #[error("No substitution provided for template slot '{0}'")]
    MissingSubstitution(Placeholder),

    #[error("Failed to serialize manifest: {0}")]
    ManifestSerialize(#[source] serde_json::Error),

    /// The node directory already exists and overwriting was not requested.
    #[error("Output directory '{0}' already exists (use --force to overwrite)")]
    OutputExists(PathBuf),

    /// Failed to write a generated file.
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Builds a validation error listing every missing required field.
    pub fn missing_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let names: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        Self::ConfigValidation(format!("missing required fields: {}", names.join(", ")))
    }

    /// Returns true for the validation class of config errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ConfigValidation(_))
    }
}

#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! nodegen: generate workflow node modules and catalog manifests from a
//! declarative JSON property schema.
//!
//! The crate is organized as a small compiler:
//! - `config`: Configuration models, loader, and schema helpers (front end).
//! - `codegen`: Type mapping, default inference, and fragment emission (middle).
//! - `template`: Slot-based template rendering and the manifest (back end).
//! - `generator`: The end-to-end pipeline.
//! - `output`: Writing generated files to disk.
//! - `utils`: Case conversion helpers.
//!
//! Use `nodegen::prelude::*` to bring commonly used items into scope quickly.

/// Public module: code generation (type mapping, defaults, fragments).
pub mod codegen;
/// Public module: configuration (models, loader, schema helpers).
pub mod config;
/// Public module: error taxonomy.
pub mod error;
/// Public module: generation pipeline.
pub mod generator;
/// Public module: writing generated nodes.
pub mod output;
/// Public module: templates and manifests.
pub mod template;
/// Public module: utilities (case conversion).
pub mod utils;

pub use error::{GeneratorError, Result};

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Parse a simple level name (trace|debug|info|warn|error).
pub fn parse_level(s: &str) -> Option<tracing::Level> {
    use tracing::Level;
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize tracing (logging) with a reasonable default.
/// - Honors the `RUST_LOG` environment variable if set.
/// - Falls back to `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(tracing::Level::INFO);
    init_tracing_with_level(level);
}

/// Initialize tracing at a fixed level. Ignored if a subscriber is already set.
pub fn init_tracing_with_level(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use nodegen::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use crate::error::{GeneratorError, Result};

    // Serialization
    pub use serde::{Deserialize, Serialize};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use crate as nodegen;

    // Frequently used items
    pub use crate::config::{NodeConfig, PropertySchema, PropertyType};
    pub use crate::generator::{GeneratedNode, Generator, Identifiers};
    pub use crate::template::{Placeholder, Substitutions, Template};
    pub use crate::{codegen, config, generator, output, template, utils};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("DEBUG"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level("warning"), Some(tracing::Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }
}

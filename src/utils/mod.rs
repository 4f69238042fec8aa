//! Utilities for nodegen.
//!
//! Submodules:
//! - `case`: Case-convention transforms (pascal, camel, capitalized words).

pub mod case;

pub use case::{to_camel_case, to_capitalized_words, to_pascal_case};

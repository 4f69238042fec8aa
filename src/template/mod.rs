//! Node module templates.
//!
//! A template is source text with `{{slot}}` tokens. Parsing splits it once
//! into literal segments and typed slots; rendering concatenates the literals
//! with the slot values, so substituted text is never scanned again.
//!
//! Notes:
//! - Whitespace inside the braces is ignored: `{{  color  }}` == `{{color}}`.
//! - Unknown tokens are kept verbatim. The host's own `={{ ... }}` expressions
//!   therefore pass through untouched.
//! - Non-string substitution values are rendered as compact JSON
//!   (e.g. a group list as `["transform"]`).

pub mod manifest;

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{GeneratorError, Result};

pub use manifest::{Manifest, build_manifest, render_manifest};

/// Template shipped with the crate.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/node.ts");

/// Recognized template slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    ClassName,
    DisplayName,
    InternalName,
    Description,
    Group,
    Version,
    Color,
    ApiUrl,
    Properties,
    ParameterExtraction,
}

impl Placeholder {
    pub const ALL: [Placeholder; 10] = [
        Self::ClassName,
        Self::DisplayName,
        Self::InternalName,
        Self::Description,
        Self::Group,
        Self::Version,
        Self::Color,
        Self::ApiUrl,
        Self::Properties,
        Self::ParameterExtraction,
    ];

    /// Token text between the braces.
    pub fn token(self) -> &'static str {
        match self {
            Self::ClassName => "class_name",
            Self::DisplayName => "display_name",
            Self::InternalName => "internal_name",
            Self::Description => "description",
            Self::Group => "group",
            Self::Version => "version",
            Self::Color => "color",
            Self::ApiUrl => "api_url",
            Self::Properties => "properties",
            Self::ParameterExtraction => "parameter_extraction",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    /// The token as written in a template, e.g. `{{class_name}}`.
    pub fn marker(self) -> String {
        format!("{{{{{}}}}}", self.token())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Values for template slots.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: BTreeMap<Placeholder, Value>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: Placeholder, value: impl Into<Value>) -> &mut Self {
        self.values.insert(slot, value.into());
        self
    }

    pub fn get(&self, slot: Placeholder) -> Option<&Value> {
        self.values.get(&slot)
    }

    /// Text inserted for `slot`: strings verbatim, anything else as compact JSON.
    pub fn text(&self, slot: Placeholder) -> Option<String> {
        self.values.get(&slot).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Split `text` into literal segments and recognized slots.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut idx = 0;

        while let Some(offset) = text[idx..].find("{{") {
            let start = idx + offset;
            let content_start = start + 2;
            let Some(end_offset) = text[content_start..].find("}}") else {
                break;
            };
            let end = content_start + end_offset;

            match Placeholder::from_token(text[content_start..end].trim()) {
                Some(slot) => {
                    literal.push_str(&text[idx..start]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(slot));
                    idx = end + 2;
                }
                None => {
                    // Keep the first brace and rescan from the next one.
                    literal.push_str(&text[idx..=start]);
                    idx = start + 1;
                }
            }
        }

        literal.push_str(&text[idx..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Self { segments }
    }

    /// Read and parse a template file.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let text = tokio::fs::read_to_string(path_ref)
            .await
            .map_err(|source| GeneratorError::TemplateRead {
                path: path_ref.to_path_buf(),
                source,
            })?;
        let template = Self::parse(&text);
        debug!(
            target: "nodegen::template",
            path = %path_ref.display(),
            slots = template.slots().count(),
            "Loaded template"
        );
        Ok(template)
    }

    /// The template shipped with the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_TEMPLATE)
    }

    /// Slots in order of appearance (repeats included).
    pub fn slots(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }

    /// Concatenate literals and slot values.
    ///
    /// Fails if any slot present in the template has no value, so a rendered
    /// result never contains a recognized token.
    pub fn render(&self, substitutions: &Substitutions) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let text = substitutions
                        .text(*slot)
                        .ok_or(GeneratorError::MissingSubstitution(*slot))?;
                    out.push_str(&text);
                }
            }
        }
        Ok(out)
    }
}

/// Parse `template` and render it with `substitutions`.
pub fn render(template: &str, substitutions: &Substitutions) -> Result<String> {
    Template::parse(template).render(substitutions)
}

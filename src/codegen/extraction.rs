//! Runtime parameter reads that build the request payload.
//!
//! For every schema property the generated `execute` body reads the parameter
//! for the current item into a local and assigns it into `requestBody` under
//! the original key. Object properties with nested `properties` also read each
//! nested key and assign an object literal assembled from those locals; this
//! recurses to any depth.

use serde_json::Value;
use std::collections::HashSet;

use super::defaults::infer_default;
use super::emit::{CodeWriter, Emit, inline_literal, member, object_key, string_literal};
use crate::config::{PropertyMap, PropertySchema};
use crate::utils::case::to_camel_case;

/// Name of the payload object in the template.
pub const PAYLOAD: &str = "requestBody";

/// Locals already declared by the template's `execute` body.
const TEMPLATE_LOCALS: &[&str] = &[
    "items", "returnData", "i", "method", "url", "timeout", "requestBody", "response", "error",
];

/// Names a strict-mode `const` cannot bind; class bodies are always strict.
const JS_RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Right-hand side of a payload assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A local declared by an earlier `Read`.
    Var(String),
    /// Object literal mapping original keys to expressions.
    Object(Vec<(String, Expr)>),
}

/// One statement of the extraction fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `const var = this.getNodeParameter('key', i, default);`
    Read { var: String, key: String, default: Value },
    /// `requestBody.key = value;`
    Assign { key: String, value: Expr },
}

impl Emit for Statement {
    fn emit(&self, out: &mut CodeWriter) {
        match self {
            Self::Read { var, key, default } => out.line(format!(
                "const {var} = this.getNodeParameter({}, i, {});",
                string_literal(key),
                inline_literal(default)
            )),
            Self::Assign { key, value } => {
                out.line(format!("{} = ", member(PAYLOAD, key)));
                value.emit(out);
                out.append(";");
            }
        }
    }
}

impl Emit for Expr {
    fn emit(&self, out: &mut CodeWriter) {
        match self {
            Self::Var(name) => out.append(name),
            Self::Object(fields) if fields.is_empty() => out.append("{}"),
            Self::Object(fields) => {
                out.append("{");
                out.indented(|out| {
                    for (key, value) in fields {
                        out.line(format!("{}: ", object_key(key)));
                        value.emit(out);
                        out.append(",");
                    }
                });
                out.line("}");
            }
        }
    }
}

/// Hands out unique, valid local names for the `execute` body.
#[derive(Debug)]
struct VarScope {
    taken: HashSet<String>,
}

impl VarScope {
    fn new() -> Self {
        Self {
            taken: TEMPLATE_LOCALS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Camel-cased `key`, adjusted only when it would not be a usable local.
    fn declare(&mut self, key: &str) -> String {
        let mut base = to_camel_case(key);
        if base.is_empty() || base.starts_with(|c: char| c.is_numeric()) {
            base.insert(0, '_');
        }
        if JS_RESERVED.contains(&base.as_str()) || TEMPLATE_LOCALS.contains(&base.as_str()) {
            base.insert(0, '_');
        }

        let mut name = base.clone();
        let mut n = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{base}{n}");
            n += 1;
        }
        name
    }
}

/// Build the extraction statements for every schema key, in schema order.
pub fn emit_extraction(schema: &PropertyMap) -> Vec<Statement> {
    let mut scope = VarScope::new();
    let mut out = Vec::with_capacity(schema.len() * 2);
    for (key, prop) in schema {
        let value = read_property(key, prop, &mut scope, &mut out);
        out.push(Statement::Assign {
            key: key.clone(),
            value,
        });
    }
    out
}

/// Push the reads for `key` (and any nested keys) and return the expression
/// that holds its value.
fn read_property(
    key: &str,
    prop: &PropertySchema,
    scope: &mut VarScope,
    out: &mut Vec<Statement>,
) -> Expr {
    let var = scope.declare(key);
    out.push(Statement::Read {
        var: var.clone(),
        key: key.to_string(),
        default: infer_default(prop),
    });

    match prop.nested() {
        Some(nested) => Expr::Object(
            nested
                .iter()
                .map(|(sub_key, sub_prop)| {
                    (sub_key.clone(), read_property(sub_key, sub_prop, scope, out))
                })
                .collect(),
        ),
        None => Expr::Var(var),
    }
}

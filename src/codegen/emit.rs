//! Serialization of fragment nodes into TypeScript source text.
//!
//! Nodes implement [`Emit`] and write indented lines into a [`CodeWriter`].
//! The writer is positioned by the template: the first line is emitted bare
//! and every following line is indented by the slot's base depth.

use serde_json::Value;

/// A fragment node that can be serialized to source lines.
pub trait Emit {
    fn emit(&self, out: &mut CodeWriter);
}

/// Line-oriented, tab-indented source buffer.
#[derive(Debug, Default)]
pub struct CodeWriter {
    lines: Vec<(usize, String)>,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the current indentation.
    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push((self.indent, text.into()));
    }

    /// Append text to the last line (or start one).
    pub fn append(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some((_, last)) => last.push_str(text),
            None => self.line(text),
        }
    }

    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    /// Render with the first line bare and the rest indented by `base` tabs.
    pub fn finish(self, base: usize) -> String {
        let mut out = String::new();
        for (i, (indent, text)) in self.lines.into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(&"\t".repeat(base + indent));
            }
            out.push_str(&text);
        }
        out
    }
}

/// Emit every node in order, each followed by `terminator` on its last line.
pub fn emit_all<T: Emit>(nodes: &[T], terminator: &str, base: usize) -> String {
    let mut out = CodeWriter::new();
    for node in nodes {
        node.emit(&mut out);
        out.append(terminator);
    }
    out.finish(base)
}

/// Single-quoted JS string literal.
pub fn string_literal(s: &str) -> String {
    format!("'{}'", escape_single_quoted(s))
}

/// Escape `s` for use between single quotes in JS source.
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Whether `s` can be used bare as a JS identifier or property name.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Object-literal key: bare when possible, quoted otherwise.
pub fn object_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        string_literal(key)
    }
}

/// Member access on `target`: `target.key` or `target['key']`.
pub fn member(target: &str, key: &str) -> String {
    if is_identifier(key) {
        format!("{target}.{key}")
    } else {
        format!("{target}[{}]", string_literal(key))
    }
}

/// Compact single-line JS literal for a JSON value.
pub fn inline_literal(value: &Value) -> String {
    match value {
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(inline_literal).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", object_key(k), inline_literal(v)))
                .collect();
            format!("{{ {} }}", parts.join(", "))
        }
        other => other.to_string(),
    }
}

/// Multi-line JS literal: objects are expanded one entry per line, arrays of
/// scalars stay inline. The value's opening is appended to the current line.
pub fn block_literal(value: &Value, out: &mut CodeWriter) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            out.append("{");
            out.indented(|out| {
                for (k, v) in map {
                    out.line(format!("{}: ", object_key(k)));
                    block_literal(v, out);
                    out.append(",");
                }
            });
            out.line("}");
        }
        Value::Array(items) if items.iter().any(|v| v.is_object() || v.is_array()) => {
            out.append("[");
            out.indented(|out| {
                for v in items {
                    out.line("");
                    block_literal(v, out);
                    out.append(",");
                }
            });
            out.line("]");
        }
        other => out.append(&inline_literal(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(string_literal("plain"), "'plain'");
        assert_eq!(string_literal("it's"), r"'it\'s'");
        assert_eq!(string_literal("a\\b\nc"), r"'a\\b\nc'");
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("text"));
        assert!(is_identifier("_x$1"));
        assert!(!is_identifier("my-key"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
        assert_eq!(member("requestBody", "text"), "requestBody.text");
        assert_eq!(member("requestBody", "my-key"), "requestBody['my-key']");
    }

    #[test]
    fn inline_literals() {
        assert_eq!(inline_literal(&json!("a")), "'a'");
        assert_eq!(inline_literal(&json!(0)), "0");
        assert_eq!(inline_literal(&json!(false)), "false");
        assert_eq!(inline_literal(&json!([])), "[]");
        assert_eq!(inline_literal(&json!({})), "{}");
        assert_eq!(inline_literal(&json!(["x", 2])), "['x', 2]");
        assert_eq!(inline_literal(&json!({"a-b": 1, "c": null})), "{ 'a-b': 1, c: null }");
    }

    #[test]
    fn block_literal_expands_objects() {
        let mut out = CodeWriter::new();
        out.line("displayOptions: ");
        block_literal(&json!({"show": {"mode": ["advanced"]}}), &mut out);
        assert_eq!(
            out.finish(1),
            "displayOptions: {\n\t\tshow: {\n\t\t\tmode: ['advanced'],\n\t\t},\n\t}"
        );
    }

    #[test]
    fn emit_all_terminates_each_node() {
        struct Stmt(&'static str);
        impl Emit for Stmt {
            fn emit(&self, out: &mut CodeWriter) {
                out.line(self.0);
            }
        }
        assert_eq!(emit_all(&[Stmt("a"), Stmt("b")], ";", 2), "a;\n\t\tb;");
        assert_eq!(emit_all::<Stmt>(&[], ";", 2), "");
    }
}

//! Serialize values back to configuration text.
//!
//! Two layouts are supported. [`Style::Conf`] writes scalars and arrays as
//! `key = value` lines and nested objects as section headers, one more
//! bracket per level. [`Style::Json`] writes the root object as
//! `key = value` lines and every nested container inline in braces.

use crate::value::{Map, Value};

/// Output layout for [`dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Sections and key lines.
    #[default]
    Conf,
    /// Inline braces and brackets.
    Json,
}

/// Dump settings.
///
/// ```
/// use libconf::{DumpOptions, Style};
///
/// let options = DumpOptions::default().with_style(Style::Json).with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    pub style: Style,
    /// Indent width per nesting level. Zero also drops the spaces around `=`
    /// and the line breaks inside inline containers.
    pub indent: usize,
    pub indent_char: char,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            style: Style::Conf,
            indent: 0,
            indent_char: ' ',
        }
    }
}

impl DumpOptions {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_indent_char(mut self, indent_char: char) -> Self {
        self.indent_char = indent_char;
        self
    }
}

/// Dump `value` to a string. No trailing newline is written.
pub fn dump(value: &Value, options: &DumpOptions) -> String {
    let mut dumper = Dumper {
        options,
        out: String::new(),
        depth: 0,
    };
    match options.style {
        Style::Conf => dumper.conf_root(value),
        Style::Json => dumper.json_root(value),
    }
    dumper.out
}

/// Keys holding any of these must be written quoted.
fn must_quote(key: &str) -> bool {
    key.is_empty()
        || key.chars().any(|c| {
            matches!(
                c,
                ' ' | '=' | ':' | ',' | ';' | '#' | '[' | ']' | '{' | '}' | '"' | '\'' | '\\'
            ) || matches!(c, '\x07' | '\x08' | '\x0C' | '\n' | '\r' | '\t' | '\x0B')
        })
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0B' => out.push_str("\\v"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
}

struct Dumper<'o> {
    options: &'o DumpOptions,
    out: String,
    depth: usize,
}

impl Dumper<'_> {
    fn indented(&self) -> bool {
        self.options.indent > 0
    }

    fn pad(&mut self) {
        let width = self.options.indent * self.depth;
        self.out.extend(std::iter::repeat(self.options.indent_char).take(width));
    }

    /// Line break inside a non-empty inline container.
    fn break_line(&mut self) {
        if self.indented() {
            self.out.push('\n');
        }
    }

    fn assign(&mut self) {
        self.out.push_str(if self.indented() { " = " } else { "=" });
    }

    fn key(&mut self, key: &str) {
        if must_quote(key) {
            self.out.push('"');
            escape_into(&mut self.out, key);
            self.out.push('"');
        } else {
            self.out.push_str(key);
        }
    }

    /// Scalars as text, containers inline.
    fn inline(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => self.out.push_str(&n.to_string()),
            Value::String(s) => {
                self.out.push('"');
                escape_into(&mut self.out, s);
                self.out.push('"');
            }
            Value::Array(arr) => self.json_array(arr),
            Value::Object(obj) => self.json_object(obj),
        }
    }

    // =========================================================================
    // JSON style
    // =========================================================================

    fn json_root(&mut self, value: &Value) {
        match value {
            Value::Array(arr) => {
                self.key("");
                self.assign();
                self.json_array(arr);
            }
            Value::Object(obj) => {
                for (i, (key, item)) in obj.iter().enumerate() {
                    if i > 0 {
                        self.out.push('\n');
                    }
                    self.key(key);
                    self.assign();
                    self.inline(item);
                }
            }
            _ => self.inline(value),
        }
    }

    fn json_array(&mut self, arr: &[Value]) {
        if arr.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.break_line();
        self.depth += 1;
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
                self.break_line();
            }
            self.pad();
            self.inline(item);
        }
        self.depth -= 1;
        self.break_line();
        self.pad();
        self.out.push(']');
    }

    fn json_object(&mut self, obj: &Map) {
        if obj.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.break_line();
        self.depth += 1;
        for (i, (key, item)) in obj.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
                self.break_line();
            }
            self.pad();
            self.key(key);
            self.assign();
            self.inline(item);
        }
        self.depth -= 1;
        self.break_line();
        self.pad();
        self.out.push('}');
    }

    // =========================================================================
    // CONF style
    // =========================================================================

    fn conf_root(&mut self, value: &Value) {
        match value {
            Value::Array(arr) => self.conf_array("", arr),
            Value::Object(obj) => self.conf_object(obj, 1),
            _ => self.inline(value),
        }
    }

    /// One `key[] = element` line per element, or `key = []` when empty.
    fn conf_array(&mut self, key: &str, arr: &[Value]) {
        if arr.is_empty() {
            self.key(key);
            self.assign();
            self.out.push_str("[]");
            return;
        }
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.key(key);
            self.out.push_str("[]");
            self.assign();
            self.inline(item);
        }
    }

    /// Key lines first, then one section per non-empty child object.
    /// `level` is the bracket count for those sections.
    fn conf_object(&mut self, obj: &Map, level: usize) {
        let mut first = true;
        for (key, item) in obj {
            match item {
                Value::Object(child) if !child.is_empty() => continue,
                Value::Array(arr) => {
                    self.separate(&mut first);
                    self.conf_array(key, arr);
                }
                _ => {
                    self.separate(&mut first);
                    self.key(key);
                    self.assign();
                    self.inline(item);
                }
            }
        }
        for (key, item) in obj {
            if let Value::Object(child) = item {
                if child.is_empty() {
                    continue;
                }
                self.separate(&mut first);
                self.out.push_str(&"[".repeat(level));
                self.key(key);
                self.out.push_str(&"]".repeat(level));
                self.out.push('\n');
                self.conf_object(child, level + 1);
            }
        }
    }

    fn separate(&mut self, first: &mut bool) {
        if !*first {
            self.out.push('\n');
        }
        *first = false;
    }
}

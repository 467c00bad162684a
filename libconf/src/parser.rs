//! Phase 2: Structural parser
//!
//! A recursive-descent pass over the [`Scanner`] that builds one [`Value`]
//! tree. Section headers select which object subsequent key lines land in;
//! key lines, inline objects and inline arrays fill it.
//!
//! Open sections are tracked as prefix lengths into a single key path from
//! the root. The node for the innermost section is looked up again from the
//! root each time it is needed, so no reference into the growing tree is
//! ever held across a mutation.

use crate::error::{ParseContext, Reason, Result};
use crate::scalar::{decode_escapes, parse_scalar};
use crate::scanner::{is_blank, is_quote, Scanner};
use crate::value::{Map, Value};
use log::trace;

/// Deepest container nesting a document may reach, counting sections, key
/// suffixes and inline objects and arrays along one path from the root.
pub const MAX_DEPTH: usize = 512;

/// Where a value appears, which decides the bytes that end it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Within {
    Line,
    Object,
    Array,
}

impl Within {
    fn closes(self, c: u8) -> bool {
        match self {
            Within::Line => false,
            Within::Object => c == b'}' || c == b',',
            Within::Array => c == b']' || c == b',',
        }
    }
}

/// Document under construction plus the stack of open sections.
#[derive(Default)]
struct Document {
    root: Value,
    path: Vec<String>,
    sections: Vec<usize>,
}

impl Document {
    /// Path length of the innermost open section. The root is length 0.
    fn base(&self) -> usize {
        self.sections.last().copied().unwrap_or(0)
    }

    fn depth(&self) -> usize {
        self.sections.len()
    }

    /// The innermost open section, or the root when none is open.
    fn top(&mut self) -> &mut Value {
        let len = self.base();
        self.root.entry_path(&self.path[..len])
    }

    /// Open `name` inside the innermost section.
    fn push_child(&mut self, name: String) {
        let base = self.base();
        self.path.truncate(base);
        self.path.push(name);
        self.sections.push(self.path.len());
        self.top();
    }

    /// Reopen the innermost section (the root when none is open).
    fn push_current(&mut self) {
        self.sections.push(self.base());
    }

    fn truncate(&mut self, depth: usize) {
        self.sections.truncate(depth);
    }

    fn reset(&mut self) {
        self.sections.clear();
    }
}

/// Parse a whole document. The input has not been comment-stripped yet.
pub fn parse_document(input: Vec<u8>, ctx: &ParseContext) -> Result<Value> {
    let mut parser = Parser {
        scanner: Scanner::new(input),
        ctx,
        depth: 0,
    };
    let mut doc = Document::default();

    parser.scanner.skip_blank();
    while let Some(c) = parser.scanner.current() {
        match c {
            b'[' => parser.load_section(&mut doc, false)?,
            b'{' => {
                parser.depth = doc.base();
                parser.load_object(doc.top())?;
            }
            _ => {
                if doc.depth() == 0 {
                    doc.push_current();
                }
                parser.depth = doc.base();
                parser.load_key(doc.top())?;
            }
        }
    }
    Ok(doc.root)
}

struct Parser<'a> {
    scanner: Scanner,
    ctx: &'a ParseContext,
    /// Containers open above the node being filled.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn fail<T>(&self, reason: Reason) -> Result<T> {
        Err(self.scanner.error(self.ctx, reason))
    }

    /// Open one more container level.
    fn nest(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return self.fail(Reason::TooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    /// Consume `=` or `:` if present.
    fn eat_assign(&mut self) -> bool {
        self.scanner.eat(b'=') || self.scanner.eat(b':')
    }

    /// Scan an unquoted name up to a byte matching `stop`.
    ///
    /// Interior blanks are kept and trailing blanks dropped. Reaching a
    /// newline or the end of input fails with `reason`.
    fn bare_name(&mut self, stop: impl Fn(u8) -> bool, reason: Reason) -> Result<String> {
        let start = self.scanner.index();
        let mut end = start;
        loop {
            match self.scanner.current() {
                None | Some(b'\n') => return self.fail(reason),
                Some(c) if stop(c) => break,
                Some(c) if is_blank(c) => self.scanner.skip_blank_line(),
                Some(_) => {
                    self.scanner.advance();
                    end = self.scanner.index();
                }
            }
        }
        Ok(self.scanner.slice(start, end))
    }

    fn quoted(&mut self) -> Result<String> {
        let raw = self.scanner.quoted(self.ctx)?;
        Ok(decode_escapes(&raw))
    }

    fn at_quote(&self) -> bool {
        matches!(self.scanner.current(), Some(c) if is_quote(c))
    }

    // -- Sections --

    fn load_section(&mut self, doc: &mut Document, chained: bool) -> Result<()> {
        self.scanner.advance();
        self.scanner.skip_blank_line();

        if self.scanner.current() == Some(b'[') {
            let mut level = 1;
            while self.scanner.eat(b'[') {
                level += 1;
                self.scanner.skip_blank_line();
            }
            let (name, _) = self.section_name()?;
            let mut closing = 0;
            while self.scanner.eat(b']') {
                closing += 1;
                self.scanner.skip_blank_line();
            }
            if closing != level {
                return self.fail(Reason::EndOfSection);
            }
            let parent = level - 1;
            doc.truncate(parent);
            if doc.depth() != parent {
                return self.fail(Reason::SectionWithoutParent);
            }
            if doc.base() >= MAX_DEPTH {
                return self.fail(Reason::TooDeep);
            }
            trace!("section {:?} at depth {}", name, level);
            doc.push_child(name);
        } else {
            if !chained {
                doc.reset();
            }
            let (name, quoted) = self.section_name()?;
            if name.is_empty() && !quoted {
                doc.push_current();
            } else {
                if doc.base() >= MAX_DEPTH {
                    return self.fail(Reason::TooDeep);
                }
                trace!("section {:?} at depth {}", name, doc.depth() + 1);
                doc.push_child(name);
            }
            self.scanner.advance();
        }

        self.scanner.skip_blank_line();
        if self.scanner.current() == Some(b'[') {
            self.load_section(doc, true)?;
        }
        self.scanner.skip_blank();
        Ok(())
    }

    /// Section name up to, not including, the closing `]`.
    fn section_name(&mut self) -> Result<(String, bool)> {
        if self.at_quote() {
            let name = self.quoted()?;
            self.scanner.skip_blank_line();
            if self.scanner.current() != Some(b']') {
                return self.fail(Reason::EndOfSection);
            }
            Ok((name, true))
        } else {
            let name = self.bare_name(|c| c == b']', Reason::EndOfSection)?;
            Ok((name, false))
        }
    }

    // -- Key lines --

    fn load_key(&mut self, section: &mut Value) -> Result<()> {
        if matches!(self.scanner.current(), Some(b'=' | b':')) {
            return self.fail(Reason::KeyNotFound);
        }
        let name = self.key_name()?;
        let mut node = section.entry(&name);
        while self.scanner.current() == Some(b'[') {
            self.nest()?;
            node = match self.key_suffix()? {
                Some(key) => node.entry(&key),
                None => node.push(Value::Null),
            };
        }

        self.scanner.skip_blank();
        if !self.eat_assign() {
            return self.fail(Reason::AssignNotFound);
        }
        self.scanner.skip_blank_line();
        self.load_value(node, Within::Line)?;
        self.scanner.skip_blank();
        Ok(())
    }

    fn key_name(&mut self) -> Result<String> {
        if self.at_quote() {
            let name = self.quoted()?;
            self.scanner.skip_blank_line();
            if !matches!(self.scanner.current(), Some(b'=' | b':' | b'[')) {
                return self.fail(Reason::AssignNotFound);
            }
            Ok(name)
        } else {
            self.bare_name(|c| matches!(c, b'=' | b':' | b'['), Reason::AssignNotFound)
        }
    }

    /// One `[name]` suffix. `None` stands for the append form `[]`.
    fn key_suffix(&mut self) -> Result<Option<String>> {
        self.scanner.advance();
        self.scanner.skip_blank_line();
        let name = if self.at_quote() {
            let name = self.quoted()?;
            self.scanner.skip_blank_line();
            if self.scanner.current() != Some(b']') {
                return self.fail(Reason::EndOfMap);
            }
            Some(name)
        } else {
            let name = self.bare_name(|c| c == b']', Reason::EndOfMap)?;
            (!name.is_empty()).then_some(name)
        };
        self.scanner.advance();
        self.scanner.skip_blank_line();
        Ok(name)
    }

    // -- Values --

    fn load_value(&mut self, node: &mut Value, within: Within) -> Result<()> {
        match self.scanner.current() {
            Some(c) if is_quote(c) => {
                let text = self.quoted()?;
                self.scanner.skip_blank_line();
                if let Some(c) = self.scanner.current() {
                    if c != b'\n' && !within.closes(c) {
                        return self.fail(Reason::EndOfValue);
                    }
                }
                *node = Value::String(text);
            }
            Some(b'{') => self.load_object(node)?,
            Some(b'[') => self.load_array(node)?,
            _ => {
                let start = self.scanner.index();
                let mut end = start;
                while let Some(c) = self.scanner.current() {
                    if c == b'\n' || within.closes(c) {
                        break;
                    }
                    if is_blank(c) {
                        self.scanner.skip_blank_line();
                    } else {
                        self.scanner.advance();
                        end = self.scanner.index();
                    }
                }
                *node = parse_scalar(&self.scanner.slice(start, end));
            }
        }
        Ok(())
    }

    /// Inline `{ key = value, ... }`, merged into `node` when it is
    /// already an object.
    fn load_object(&mut self, node: &mut Value) -> Result<()> {
        self.nest()?;
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        self.scanner.advance();
        self.scanner.skip_blank();

        let mut next = false;
        while self.scanner.current() != Some(b'}') || next {
            match self.scanner.current() {
                None => return self.fail(Reason::EndOfObject),
                Some(b'=' | b':') => return self.fail(Reason::KeyNotFound),
                _ => {}
            }
            let key = if self.at_quote() {
                self.quoted()?
            } else {
                self.bare_name(|c| c == b'=' || c == b':', Reason::EndOfKey)?
            };

            self.scanner.skip_blank();
            if !self.eat_assign() {
                return self.fail(Reason::AssignNotFound);
            }
            self.scanner.skip_blank();
            self.load_value(node.entry(&key), Within::Object)?;
            self.scanner.skip_blank();

            next = self.scanner.eat(b',');
            if next {
                self.scanner.skip_blank();
            }
        }
        self.scanner.advance();
        self.scanner.skip_blank();
        self.depth -= 1;
        Ok(())
    }

    /// Inline `[ value, ... ]`. Always replaces `node`.
    fn load_array(&mut self, node: &mut Value) -> Result<()> {
        self.nest()?;
        *node = Value::Array(Vec::new());
        self.scanner.advance();
        self.scanner.skip_blank();

        let mut next = false;
        while self.scanner.current() != Some(b']') || next {
            if self.scanner.at_end() {
                return self.fail(Reason::EndOfArray);
            }
            self.load_value(node.push(Value::Null), Within::Array)?;
            self.scanner.skip_blank();

            next = self.scanner.eat(b',');
            if next {
                self.scanner.skip_blank();
            }
        }
        self.scanner.advance();
        self.scanner.skip_blank();
        self.depth -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Value> {
        parse_document(input.as_bytes().to_vec(), &ParseContext::new(None))
    }

    #[test]
    fn test_document_stack() {
        let mut doc = Document::default();
        doc.push_child("a".to_string());
        doc.push_child("b".to_string());
        doc.truncate(1);
        doc.push_child("c".to_string());
        *doc.top().entry("k") = Value::from(1);
        assert_eq!(doc.root["a"]["c"]["k"], Value::from(1));
        assert!(doc.root["a"]["b"].is_null());
        assert_eq!(doc.depth(), 2);
    }

    #[test]
    fn test_chained_empty_section_reopens_top() {
        let v = parse("[a][]\nk = 1").unwrap();
        assert_eq!(v["a"]["k"], Value::from(1));
    }

    #[test]
    fn test_object_merges() {
        let v = parse("a = {x = 1}\na = {y = 2}").unwrap();
        assert_eq!(v["a"]["x"], Value::from(1));
        assert_eq!(v["a"]["y"], Value::from(2));
    }

    #[test]
    fn test_bare_names_keep_backslashes() {
        let v = parse("[a\\tb]\nk\\n[x\\y] = 1").unwrap();
        assert_eq!(v["a\\tb"]["k\\n"]["x\\y"], Value::from(1));
        let v = parse("o = {k\\t = 1}").unwrap();
        assert_eq!(v["o"]["k\\t"], Value::from(1));
    }

    #[test]
    fn test_depth_resets_between_lines() {
        let deep = "[".repeat(MAX_DEPTH) + &"]".repeat(MAX_DEPTH);
        let v = parse(&format!("a = {}\nb = {}", deep, deep)).unwrap();
        assert!(v["b"].is_array());
    }

    #[test]
    fn test_array_replaces() {
        let v = parse("a = [1, 2]\na = [3]").unwrap();
        assert_eq!(v["a"], Value::from(vec![Value::from(3)]));
    }
}

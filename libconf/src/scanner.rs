//! Phase 1: Scanner
//!
//! Byte cursor over the source text.
//!
//! The scanner owns the whole input and tracks the byte offset together with
//! a 1-based line and column, so every parse error can be reported at the
//! exact point where an expectation failed. Comments are removed up front by
//! [`strip_comments`], which blanks them out in place and leaves every other
//! byte where it was.

use crate::error::{LoadError, ParseContext, Reason, Result};

/// Returns `true` for `\t`, `\n`, `\x0B`, `\x0C`, `\r` and space.
pub fn is_blank(c: u8) -> bool {
    matches!(c, b'\t'..=b'\r' | b' ')
}

/// Returns `true` for the two quote characters.
pub fn is_quote(c: u8) -> bool {
    c == b'"' || c == b'\''
}

/// Replace every unquoted, unescaped `;` or `#` and the rest of its line
/// with spaces.
///
/// A comment character counts as escaped only when an odd number of
/// backslashes precedes it.
pub fn strip_comments(input: &mut [u8]) {
    let mut i = 0;
    let mut backslashes = 0usize;
    while i < input.len() {
        let c = input[i];
        if is_quote(c) && backslashes % 2 == 0 {
            i = skip_quoted(input, i);
            backslashes = 0;
            continue;
        }
        if (c == b';' || c == b'#') && backslashes % 2 == 0 {
            while i < input.len() && input[i] != b'\n' {
                input[i] = b' ';
                i += 1;
            }
            backslashes = 0;
            continue;
        }
        if c == b'\\' {
            backslashes += 1;
        } else {
            backslashes = 0;
        }
        i += 1;
    }
}

/// Skip a quoted run starting at the opening quote. Stops after the closing
/// quote, or at the newline when the quote is unterminated.
fn skip_quoted(input: &[u8], start: usize) -> usize {
    let quote = input[start];
    let mut i = start + 1;
    while i < input.len() {
        match input[i] {
            b'\n' => return i,
            b'\\' if matches!(input.get(i + 1), Some(&n) if n == quote || n == b'\\') => {
                i += 2;
            }
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Position-tracking cursor.
pub struct Scanner {
    input: Vec<u8>,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl Scanner {
    /// Take ownership of `input` and strip its comments.
    pub fn new(mut input: Vec<u8>) -> Self {
        strip_comments(&mut input);
        Scanner {
            input,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// The byte `offset` positions past the cursor, if any.
    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    pub fn current(&self) -> Option<u8> {
        self.peek(0)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Step over one byte, keeping line and column in sync.
    pub fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += 1;
            if c == b'\n' {
                self.line += 1;
                self.line_start = self.pos;
            }
        }
    }

    /// Advance over `c` if it is the current byte.
    pub fn eat(&mut self, c: u8) -> bool {
        if self.current() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn index(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    /// Text between two byte offsets. Invalid UTF-8 is replaced.
    pub fn slice(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Skip whitespace without crossing a newline.
    pub fn skip_blank_line(&mut self) {
        while let Some(c) = self.current() {
            if c == b'\n' || !is_blank(c) {
                break;
            }
            self.advance();
        }
    }

    /// Skip all whitespace, newlines included.
    pub fn skip_blank(&mut self) {
        while matches!(self.current(), Some(c) if is_blank(c)) {
            self.advance();
        }
    }

    /// Build an error at the cursor.
    pub fn error(&self, ctx: &ParseContext, reason: Reason) -> LoadError {
        ctx.at(reason, self.line(), self.column())
    }

    /// Scan a quoted run starting at the opening quote and return the raw
    /// text between the quotes, escapes untouched. The cursor ends after the
    /// closing quote.
    pub fn quoted(&mut self, ctx: &ParseContext) -> Result<String> {
        let quote = match self.current() {
            Some(q) if is_quote(q) => q,
            _ => return Err(self.error(ctx, Reason::EndOfQuote)),
        };
        self.advance();
        let start = self.pos;
        loop {
            match self.current() {
                None | Some(b'\n') => return Err(self.error(ctx, Reason::EndOfQuote)),
                Some(b'\\') if matches!(self.peek(1), Some(n) if n == quote || n == b'\\') => {
                    self.advance();
                    self.advance();
                }
                Some(c) if c == quote => break,
                Some(_) => self.advance(),
            }
        }
        let text = self.slice(start, self.pos);
        self.advance();
        Ok(text)
    }
}

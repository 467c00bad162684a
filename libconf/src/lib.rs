//! Parser and dumper for a hybrid INI/JSON configuration language.
//!
//! A document is a sequence of key lines (`key = value`), section headers
//! (`[name]`, with `[[name]]` and deeper for nested sections, or chained as
//! `[a][b]`) and inline JSON-like objects and arrays. Keys may carry table
//! suffixes such as `key[sub] = 1` or `list[] = 2`. Bare values are typed by
//! inspection: numbers in any of four radixes, `true`/`on`/`yes`,
//! `false`/`off`/`no`, `null`/`none`, or else a string. Comments start with
//! `;` or `#` outside quotes.
//!
//! # Pipeline
//!
//! 1. **Scanner**: Blanks out comments without moving any other byte, then
//!    walks the input while tracking line and column.
//!
//! 2. **Structural parser**: Recursive descent over sections, keys, inline
//!    objects and arrays, writing into a single [`Value`] tree.
//!
//! 3. **Scalar inference**: Bare tokens become numbers, booleans, null or
//!    strings.
//!
//! [`dump`] goes the other way, in either [`Style::Conf`] or [`Style::Json`].
//!
//! # Example
//!
//! ```
//! use libconf::{dump, load_str, DumpOptions};
//!
//! let value = load_str("[server]\nport = 0x1F90\nhosts[] = alpha\nhosts[] = beta").unwrap();
//! assert_eq!(value["server"]["port"].as_f64(), Some(8080.0));
//! assert_eq!(value["server"]["hosts"][1].as_str(), Some("beta"));
//!
//! let text = dump(&value, &DumpOptions::default().with_indent(2));
//! assert_eq!(text, "[server]\nport = 8080\nhosts[] = \"alpha\"\nhosts[] = \"beta\"");
//! ```

mod dump;
mod error;
mod parser;
mod scalar;
mod scanner;
mod value;

pub use dump::{DumpOptions, Style};
pub use error::{LoadError, Reason, Result};
pub use parser::MAX_DEPTH;
pub use value::{Map, Value};

use error::ParseContext;
use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Load a document from a file. The path appears in error messages.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let filename = path.display().to_string();
    let ctx = ParseContext::new(Some(&filename));
    let bytes = fs::read(path).map_err(|e| {
        debug!("cannot open {}: {}", filename, e);
        ctx.io(Reason::OpenFailed, e)
    })?;
    load_with(bytes, &ctx)
}

/// Load a document from any reader, buffering it whole.
pub fn load_reader<R: Read>(mut reader: R) -> Result<Value> {
    let ctx = ParseContext::new(None);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        debug!("cannot read stream: {}", e);
        ctx.io(Reason::ReadFailed, e)
    })?;
    load_with(bytes, &ctx)
}

/// Load a document from a string.
///
/// ```
/// let value = libconf::load_str("answer = 42").unwrap();
/// assert_eq!(value["answer"].as_f64(), Some(42.0));
/// ```
pub fn load_str(input: &str) -> Result<Value> {
    load_str_with_filename(input, None)
}

/// Load a document from a string with a filename for error messages.
pub fn load_str_with_filename(input: &str, filename: Option<&str>) -> Result<Value> {
    let ctx = ParseContext::new(filename);
    load_with(input.as_bytes().to_vec(), &ctx)
}

/// Load a document from raw bytes. Invalid UTF-8 inside tokens is replaced.
pub fn load_bytes(input: &[u8]) -> Result<Value> {
    load_with(input.to_vec(), &ParseContext::new(None))
}

fn load_with(bytes: Vec<u8>, ctx: &ParseContext) -> Result<Value> {
    debug!("loading {} bytes from {:?}", bytes.len(), source_name(ctx));
    match parser::parse_document(bytes, ctx) {
        Ok(value) => {
            debug!("loaded {} from {:?}", value.type_name(), source_name(ctx));
            Ok(value)
        }
        Err(e) => {
            debug!("load failed: {}", e);
            Err(e)
        }
    }
}

fn source_name(ctx: &ParseContext) -> &str {
    if ctx.filename.is_empty() {
        "<memory>"
    } else {
        &ctx.filename
    }
}

/// Dump a value to a string.
pub fn dump(value: &Value, options: &DumpOptions) -> String {
    debug!("dumping {} as {:?}", value.type_name(), options.style);
    dump::dump(value, options)
}

/// Dump a value into a writer.
pub fn dump_to<W: Write>(value: &Value, writer: &mut W, options: &DumpOptions) -> io::Result<()> {
    writer.write_all(dump(value, options).as_bytes())
}

//! File and stream entry points.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use libconf::{dump_to, load_file, load_reader, DumpOptions, LoadError, Reason, Value};

/// A fresh path under the system temp directory.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("libconf-{}-{}", std::process::id(), name))
}

#[test]
fn test_load_file() {
    let path = temp_path("ok.conf");
    fs::write(&path, "[db]\nhost = localhost ; primary\nport = 5432\n").unwrap();
    let v = load_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(v["db"]["host"], Value::from("localhost"));
    assert_eq!(v["db"]["port"], Value::from(5432));
}

#[test]
fn test_load_file_error_carries_filename() {
    let path = temp_path("bad.conf");
    fs::write(&path, "a = 1\n= 2\n").unwrap();
    let err = load_file(&path).unwrap_err();
    fs::remove_file(&path).unwrap();

    let name = path.display().to_string();
    assert_eq!(err.filename(), name);
    assert_eq!((err.line(), err.column()), (2, 1));
    assert_eq!(err.to_string(), format!("Parse at {}:2:1 (Key not found)", name));
}

#[test]
fn test_missing_file() {
    let path = temp_path("does-not-exist.conf");
    let err = load_file(&path).unwrap_err();

    let name = path.display().to_string();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.reason(), Reason::OpenFailed);
    assert_eq!((err.line(), err.column()), (0, 0));
    assert_eq!(err.to_string(), format!("Parse {}: (Open file failed)", name));
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "broken pipe"))
    }
}

#[test]
fn test_reader_failure() {
    let err = load_reader(FailingReader).unwrap_err();
    assert_eq!(err.reason(), Reason::ReadFailed);
    assert_eq!(err.to_string(), "Parse (Read stream failed)");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_dump_to_file_and_back() {
    let mut v = Value::Null;
    *v.entry("server").entry("name") = Value::from("edge; one");
    v.entry("server").entry("ports").push(Value::from(80));
    v.entry("server").entry("ports").push(Value::from(443));

    let path = temp_path("dumped.conf");
    let mut file = fs::File::create(&path).unwrap();
    dump_to(&v, &mut file, &DumpOptions::default().with_indent(2)).unwrap();
    drop(file);

    let reloaded = load_file(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(reloaded, v);
}

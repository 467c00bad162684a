//! Exact dumper output for both styles.

use std::io::{self, Write};

use libconf::{dump, dump_to, load_str, DumpOptions, Map, Style, Value};

fn conf(indent: usize) -> DumpOptions {
    DumpOptions::default().with_indent(indent)
}

fn json(indent: usize) -> DumpOptions {
    DumpOptions::default().with_style(Style::Json).with_indent(indent)
}

fn numbers(ns: &[i32]) -> Value {
    Value::Array(ns.iter().map(|&n| Value::from(n)).collect())
}

#[test]
fn test_root_scalars() {
    for options in [conf(0), json(0), conf(4)] {
        assert_eq!(dump(&Value::Null, &options), "null");
        assert_eq!(dump(&Value::Bool(true), &options), "true");
        assert_eq!(dump(&Value::Bool(false), &options), "false");
        assert_eq!(dump(&Value::from(42), &options), "42");
        assert_eq!(dump(&Value::from(-0.5), &options), "-0.5");
        assert_eq!(dump(&Value::from("foo"), &options), "\"foo\"");
    }
}

#[test]
fn test_root_array() {
    let v = numbers(&[0, 1, 2]);
    assert_eq!(dump(&v, &conf(0)), "\"\"[]=0\n\"\"[]=1\n\"\"[]=2");
    assert_eq!(dump(&v, &json(1)), "\"\" = [\n 0,\n 1,\n 2\n]");
    assert_eq!(dump(&v, &json(0)), "\"\"=[0,1,2]");
    assert_eq!(dump(&numbers(&[]), &conf(0)), "\"\"=[]");
}

#[test]
fn test_root_object() {
    let mut v = Value::Null;
    *v.entry("foo") = Value::from(42);
    assert_eq!(dump(&v, &conf(0)), "foo=42");
    assert_eq!(dump(&v, &json(0)), "foo=42");
    assert_eq!(dump(&v, &conf(2)), "foo = 42");
}

#[test]
fn test_section() {
    let mut v = Value::Null;
    *v.entry("section1").entry("foo") = Value::from("bar");
    assert_eq!(dump(&v, &conf(0)), "[section1]\nfoo=\"bar\"");
    assert_eq!(dump(&v, &conf(2)), "[section1]\nfoo = \"bar\"");
}

#[test]
fn test_array_in_section() {
    let mut v = Value::Null;
    let section = v.entry("section");
    *section.entry("bar") = Value::from(42);
    let foo = section.entry("foo");
    foo.push(Value::from(42));
    foo.push(Value::from("bar"));
    foo.push(Value::Null);
    foo.push(Value::Bool(true));
    assert_eq!(
        dump(&v, &conf(2)),
        "[section]\nbar = 42\nfoo[] = 42\nfoo[] = \"bar\"\nfoo[] = null\nfoo[] = true"
    );
}

#[test]
fn test_nested_array_elements() {
    let mut v = Value::Null;
    v.entry("foo").push(numbers(&[42]));
    assert_eq!(dump(&v, &conf(2)), "foo[] = [\n  42\n]");

    let mut v = Value::Null;
    *v.entry("foo").push(Value::Null).entry("bar") = Value::from(42);
    assert_eq!(dump(&v, &conf(2)), "foo[] = {\n  bar = 42\n}");
    assert_eq!(dump(&v, &conf(0)), "foo[]={bar=42}");
}

#[test]
fn test_scalars_before_sections() {
    let mut v = Value::Null;
    *v.entry("a").entry("x") = Value::from(1);
    *v.entry("b") = Value::from(2);
    *v.entry("c") = Value::Object(Map::new());
    *v.entry("d") = numbers(&[]);
    assert_eq!(dump(&v, &conf(0)), "b=2\nc={}\nd=[]\n[a]\nx=1");
}

#[test]
fn test_nested_section_levels() {
    let v = load_str("[a]\nk = 1\n[[b]]\n[[[c]]]\nk = 2\n[[d]]\nk = 3").unwrap();
    assert_eq!(
        dump(&v, &conf(0)),
        "[a]\nk=1\n[[b]]\n[[[c]]]\nk=2\n[[d]]\nk=3"
    );
}

#[test]
fn test_json_style() {
    let mut v = Value::Null;
    let section = v.entry("section");
    *section.entry("a") = Value::Object(Map::new());
    *section.entry("b") = numbers(&[]);
    *section.entry("c") = numbers(&[1, 2]);
    *section.entry("d").entry("e") = Value::from("f");
    assert_eq!(
        dump(&v, &json(2)),
        "section = {\n  a = {},\n  b = [],\n  c = [\n    1,\n    2\n  ],\n  d = {\n    e = \"f\"\n  }\n}"
    );
    assert_eq!(dump(&v, &json(0)), "section={a={},b=[],c=[1,2],d={e=\"f\"}}");
}

#[test]
fn test_indent_char() {
    let mut v = Value::Null;
    *v.entry("o").entry("k") = Value::from(1);
    let options = json(1).with_indent_char('\t');
    assert_eq!(dump(&v, &options), "o = {\n\tk = 1\n}");
}

#[test]
fn test_quoted_keys_and_escapes() {
    let mut v = Value::Null;
    *v.entry("") = Value::from(1);
    *v.entry("a b") = Value::from("line\nbreak");
    *v.entry("x:y") = Value::from("it's \"q\" \\");
    assert_eq!(
        dump(&v, &conf(0)),
        "\"\"=1\n\"a b\"=\"line\\nbreak\"\n\"x:y\"=\"it\\'s \\\"q\\\" \\\\\""
    );
    assert_eq!(load_str(&dump(&v, &conf(0))).unwrap(), v);
}

#[test]
fn test_quoted_section_header() {
    let mut v = Value::Null;
    *v.entry("my section").entry("k") = Value::from(1);
    assert_eq!(dump(&v, &conf(0)), "[\"my section\"]\nk=1");
}

#[test]
fn test_non_finite_numbers() {
    assert_eq!(dump(&Value::from(f64::NAN), &conf(0)), "NaN");
    assert_eq!(dump(&Value::from(f64::INFINITY), &conf(0)), "inf");
    assert_eq!(dump(&Value::from(f64::NEG_INFINITY), &conf(0)), "-inf");
}

#[test]
fn test_dump_to_writer() {
    let mut v = Value::Null;
    *v.entry("k") = Value::from(true);
    let mut out: Vec<u8> = Vec::new();
    dump_to(&v, &mut out, &conf(1)).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "k = true");
}

struct FullSink;

impl Write for FullSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::WriteZero, "sink is full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_dump_to_reports_write_failure() {
    let mut v = Value::Null;
    *v.entry("k") = Value::from(true);
    let err = dump_to(&v, &mut FullSink, &conf(1)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    assert_eq!(err.to_string(), "sink is full");
}

#[test]
fn test_reload_is_idempotent() {
    let text = "z = 1\n[s]\nb = [1, {c = 2}]\n[[t]]\nq = 'w'";
    let first = dump(&load_str(text).unwrap(), &conf(2));
    let second = dump(&load_str(&first).unwrap(), &conf(2));
    assert_eq!(first, second);
}

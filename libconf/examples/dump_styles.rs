//! Load a document and print it in every dump style.
//!
//! Pass a path to dump that file instead of the built-in sample.

use libconf::{dump, load_file, load_str, DumpOptions, Style};

const SAMPLE: &str = r#"; sample configuration
name = demo
[server]
host = localhost
ports[] = 80
ports[] = 443
limits = { rps = 100, burst = 0x20 }
[[tls]]
enabled = yes
"#;

fn main() {
    let loaded = match std::env::args().nth(1) {
        Some(path) => load_file(path),
        None => load_str(SAMPLE),
    };
    let value = match loaded {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let styles = [
        ("conf", DumpOptions::default()),
        ("conf, indent 4", DumpOptions::default().with_indent(4)),
        ("json, indent 2", DumpOptions::default().with_style(Style::Json).with_indent(2)),
        ("json, compact", DumpOptions::default().with_style(Style::Json)),
    ];
    for (label, options) in &styles {
        println!("--- {} ---", label);
        println!("{}", dump(&value, options));
    }
}

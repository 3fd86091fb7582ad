use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Crate path replacements, applied in order before the keywords are stripped
const REWRITES: [(&str, &str); 3] = [
    ("embedded_hal_async", "embedded_hal"),
    ("async", ""),
    (".await", ""),
];

fn main() -> io::Result<()> {
    // The blocking driver is src/async.rs with every await point removed
    println!("cargo:rerun-if-changed=src/async.rs");

    let source = fs::read_to_string("src/async.rs")?;
    let blocking = REWRITES
        .iter()
        .fold(source, |text, (from, to)| text.replace(from, to));

    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::write(PathBuf::from(out_dir).join("de-asynced.rs"), blocking)
}

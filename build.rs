use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Build metadata shown in the CLI help footer.
fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());
    let mut f = File::create(Path::new(&out_dir).join("build_info.rs")).unwrap();

    let now = chrono::Utc::now();

    writeln!(f, "pub const BUILD_DATE: &str = \"{}\";", now.format("%Y-%m-%d")).unwrap();
    writeln!(f, "pub const BUILD_YEAR: &str = \"{}\";", now.format("%Y")).unwrap();
    writeln!(f, "pub const BUILD_TARGET: &str = \"{}\";", target).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}

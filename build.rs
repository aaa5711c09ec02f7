use chrono::Utc;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Read `[package.metadata] plugin_api_version` from the manifest.
fn plugin_api_version(manifest: &Path) -> String {
    std::fs::read_to_string(manifest)
        .ok()
        .and_then(|content| content.parse::<toml::Table>().ok())
        .and_then(|table| {
            table
                .get("package")
                .and_then(|p| p.get("metadata"))
                .and_then(|m| m.get("plugin_api_version"))
                .and_then(|v| v.as_integer())
        })
        .map(|v| v.to_string())
        .unwrap_or_else(|| "0".to_string())
}

fn git_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let cargo_toml_path = Path::new(&manifest_dir).join("Cargo.toml");
    let dest_path = Path::new(&out_dir).join("version.rs");

    let mut f = File::create(&dest_path).unwrap();
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    #[allow(clippy::uninlined_format_args)]
    writeln!(
        &mut f,
        r###"pub const PLUGIN_API_VERSION: &str = "{}";
pub const BUILD_TIME: &str = "{}";
pub const GIT_HASH: &str = "{}";"###,
        plugin_api_version(&cargo_toml_path),
        build_time,
        git_hash()
    )
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");
}

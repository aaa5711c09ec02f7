//! Listing output and exit codes of the `dpf` binary

use std::io::Write;
use std::process::Command;

fn dpf_with_config(config: &str, args: &[&str]) -> std::process::Output {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.as_bytes()).unwrap();

    Command::new(env!("CARGO_BIN_EXE_dpf"))
        .arg("--config-file")
        .arg(file.path())
        .arg("--no-color")
        .args(["--log-level", "off"])
        .args(args)
        .output()
        .expect("failed to run dpf")
}

#[test]
fn lists_declared_servers() {
    let output = dpf_with_config(
        "[[server]]\nname = \"Example\"\nminimum-version = 1\n",
        &["-s", "Audio=3"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Audio (minimum version 3): 0 plugin(s)"), "got: {}", stdout);
    assert!(stdout.contains("Example (minimum version 1): 0 plugin(s)"), "got: {}", stdout);
}

#[test]
fn missing_module_sets_exit_code() {
    let output = dpf_with_config("", &["-s", "Example=1", "/nonexistent/libplugin.so"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Example (minimum version 1)"), "got: {}", stdout);
}

#[test]
fn invalid_config_file_is_fatal() {
    let output = dpf_with_config("srever = true\n", &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "got: {}", stderr);
}

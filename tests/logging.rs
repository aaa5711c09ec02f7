//! Logger installation through the public API

use serial_test::serial;

#[test]
#[serial]
fn logger_installs_once_and_accepts_level_changes() {
    let dir = tempfile::TempDir::new().unwrap();
    let log_file = dir.path().join("dpf.log");

    dpf::core::logging::init_logging(
        Some("debug"),
        Some("json"),
        Some(log_file.to_str().unwrap()),
        false,
    )
    .unwrap();
    log::info!("logger is up");

    assert!(dpf::core::logging::set_log_level("warn").is_ok());
    assert!(dpf::core::logging::init_logging(Some("info"), None, None, false).is_err());
}

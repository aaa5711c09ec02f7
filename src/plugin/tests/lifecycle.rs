//! Registry teardown and load atomicity

use super::utils::{register_two_people, DropCounter, ExampleTypeCreator, EXAMPLE};
use crate::plugin::error::{LibraryError, PluginError};
use crate::plugin::registry::Registry;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_clear_plugins_keeps_servers() {
    let drops = Rc::new(Cell::new(0));
    let mut registry = Registry::new();
    registry.add_server(EXAMPLE, 1);
    registry.add_server("Other", 2);
    registry.submit(DropCounter::new("A", &drops)).unwrap();

    registry.clear_plugins();

    assert_eq!(drops.get(), 1);
    assert_eq!(registry.server_names(), vec!["Example", "Other"]);
    assert_eq!(registry.plugin_count(), 0);
    assert_eq!(registry.server(EXAMPLE).unwrap().minimum_version(), 1);
}

#[test]
fn test_clear_removes_everything() {
    let drops = Rc::new(Cell::new(0));
    let mut registry = Registry::new();
    registry.add_server(EXAMPLE, 1);
    registry.submit(DropCounter::new("A", &drops)).unwrap();
    registry.register_builtin("people", register_two_people);

    registry.clear();

    assert_eq!(drops.get(), 1);
    assert!(registry.server_names().is_empty());
    assert!(registry.get_all_plugins::<ExampleTypeCreator>(EXAMPLE).is_empty());
    assert!(registry.builtins().is_empty());
    assert_eq!(registry.library_count(), 0);

    // Servers have to be declared again after a full reset
    assert!(matches!(
        registry.submit(DropCounter::new("B", &drops)),
        Err(PluginError::ServerNotFound { .. })
    ));
}

#[test]
fn test_missing_module_leaves_registry_unchanged() {
    let mut registry = Registry::new();
    registry.add_server(EXAMPLE, 1);
    registry.register_builtin("people", register_two_people);

    let result = registry.load_library("/nonexistent/path/libplugin.so");

    match result {
        Err(PluginError::LoadError { path, cause }) => {
            assert_eq!(path.to_string_lossy(), "/nonexistent/path/libplugin.so");
            assert!(matches!(cause, LibraryError::Open(_)));
        }
        other => panic!("expected LoadError, got {:?}", other),
    }
    assert_eq!(registry.library_count(), 0);
    assert_eq!(registry.server_names(), vec![EXAMPLE.to_string()]);
    assert_eq!(registry.plugin_names(EXAMPLE), vec!["AlicePlugin", "WilliamPlugin"]);
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_module_without_entry_point_is_not_retained() {
    let mut registry = Registry::new();
    registry.add_server(EXAMPLE, 1);

    let result = registry.load_library("libc.so.6");

    assert!(matches!(
        result,
        Err(PluginError::LoadError {
            cause: LibraryError::EntryPointMissing { .. },
            ..
        })
    ));
    assert_eq!(registry.library_count(), 0);
    assert_eq!(registry.libraries().count(), 0);
    assert_eq!(registry.plugin_count(), 0);
}

#[test]
fn test_loading_from_dir_skips_broken_modules() {
    let dir = tempfile::TempDir::new().unwrap();
    let broken = dir
        .path()
        .join(format!("broken.{}", std::env::consts::DLL_EXTENSION));
    std::fs::write(&broken, b"not a module").unwrap();

    let mut registry = Registry::new();
    let loaded = registry.load_libraries_from_dir(dir.path());

    assert!(loaded.is_empty());
    assert_eq!(registry.library_count(), 0);
}

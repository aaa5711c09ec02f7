//! Load the example plugin module and call every creator it registered.
//!
//! Usage: `example-host [PATH]`. Without a path the module is looked up
//! next to this executable under the platform library name.

use dpf::core::logging::init_logging;
use dpf::plugin::api::{library_file_name, Plugin, Registry};
use example_interface::{ExampleTypeCreator, SERVER_NAME, VERSION};
use std::path::PathBuf;

fn default_module_path() -> PathBuf {
    let file_name = library_file_name("example_plugin");
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&file_name)))
        .unwrap_or(file_name)
}

fn main() {
    if let Err(e) = init_logging(Some("info"), None, None, false) {
        eprintln!("Error: cannot initialise logging: {}", e);
    }

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_module_path);

    let mut registry = Registry::new();
    registry.add_server(SERVER_NAME, VERSION);

    if let Err(e) = registry.load_library(&path) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    for creator in registry.get_all_plugins::<ExampleTypeCreator>(SERVER_NAME) {
        let instance = creator.create();
        println!(
            "{}: {} is {} years old.",
            creator.identity(),
            instance.name(),
            instance.do_something()
        );
    }
}

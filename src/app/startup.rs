//! Application startup for the `dpf` binary

use super::cli::args::Args;
use super::cli::config::Config;
use super::cli::display::render_registry;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::plugin::api::{PluginError, Registry};
use clap::Parser;
use std::io::IsTerminal;

/// Outcome of building the registry from arguments
pub struct Session {
    pub registry: Registry,
    /// Modules named explicitly that failed to load
    pub failures: Vec<PluginError>,
}

/// Parse arguments, run the host and return the process exit code
pub fn startup() -> i32 {
    let mut args = Args::parse();

    match Config::discover(args.config_file.as_deref()) {
        Ok(Some(config)) => args.merge_config(config),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    let use_color = args.use_color(std::io::stdout().is_terminal());
    colored::control::set_override(use_color);

    let log_file = args
        .effective_log_file()
        .map(|path| path.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: cannot initialise logging: {}", e);
        return 1;
    }

    log::info!(
        "dpf {} starting",
        crate::core::version::version_banner()
    );

    let session = build_registry(&args);
    print!("{}", render_registry(&session.registry));

    if session.failures.is_empty() {
        0
    } else {
        1
    }
}

/// Declare servers, then load the plugin directory and the listed modules.
///
/// Modules found by directory discovery that fail are skipped; explicitly
/// listed modules that fail are reported in [`Session::failures`].
pub fn build_registry(args: &Args) -> Session {
    let mut registry = Registry::new();

    for spec in &args.servers {
        registry.add_server(spec.name.as_str(), spec.minimum_version);
    }

    if let Some(dir) = &args.plugin_dir {
        let loaded = registry.load_libraries_from_dir(dir);
        log::info!("Loaded {} module(s) from {}", loaded.len(), dir.display());
    }

    let mut failures = Vec::new();
    for module in &args.modules {
        if let Err(e) = registry.load_library(module) {
            log_error_with_context(&e, &format!("Loading module {}", module.display()));
            failures.push(e);
        }
    }

    Session { registry, failures }
}

//! Module ABI
//!
//! A loadable module is a shared library exporting `register_dpf_package`
//! with C linkage. The host passes its registry pointer; the module may only
//! call `add_server` / `add_plugin` (and their wrappers) during that single
//! call. Modules built with [`export_plugins!`](crate::export_plugins) also
//! export `dpf_plugin_api_version`, which the host compares with its own
//! API version before running the entry point, and `dpf_init_logger`.
//!
//! A module carries its own copy of the `log` crate, with no logger
//! installed. The host calls `dpf_init_logger` with its own logger before
//! the entry point so module records reach the host's output.
//!
//! Rust trait objects have no stable layout between independently built
//! binaries, so host and module must be built by the same toolchain against
//! the same `dpf` API version. The version symbol is how the host refuses a
//! module built against a different API.

use crate::plugin::registry::Registry;

/// Name of the registration entry point every module exports
pub const REGISTER_SYMBOL: &str = "register_dpf_package";

/// Name of the optional API version export
pub const API_VERSION_SYMBOL: &str = "dpf_plugin_api_version";

/// Signature of [`REGISTER_SYMBOL`]
pub type RegisterFn = unsafe extern "C" fn(registry: *mut Registry);

/// Signature of [`API_VERSION_SYMBOL`]
pub type ApiVersionFn = extern "C" fn() -> u32;

/// Name of the optional logger hook
pub const LOGGER_SYMBOL: &str = "dpf_init_logger";

/// Signature of [`LOGGER_SYMBOL`]
#[allow(improper_ctypes_definitions)]
pub type InitLoggerFn = unsafe extern "C" fn(logger: &'static dyn log::Log, level: log::LevelFilter);

/// Forward this binary's `log` facade to `logger`.
///
/// Called inside a module by the generated `dpf_init_logger`. A module that
/// stayed mapped across a reload keeps its first logger.
#[doc(hidden)]
pub fn install_module_logger(logger: &'static dyn log::Log, level: log::LevelFilter) {
    if log::set_logger(logger).is_err() {
        log::debug!("Module logger already installed");
    }
    log::set_max_level(level);
}

/// Export the module entry points for a registration function.
///
/// `$register` must be a `fn(&mut Registry)`. The generated
/// `register_dpf_package` ignores a null registry pointer.
///
/// ```ignore
/// fn register(registry: &mut dpf::plugin::api::Registry) {
///     registry.submit(BobCreator::new()).ok();
/// }
///
/// dpf::export_plugins!(register);
/// ```
#[macro_export]
macro_rules! export_plugins {
    ($register:path) => {
        /// # Safety
        ///
        /// `registry` must be null or point to a live `Registry` that is not
        /// otherwise borrowed for the duration of the call.
        #[no_mangle]
        pub unsafe extern "C" fn register_dpf_package(
            registry: *mut $crate::plugin::api::Registry,
        ) {
            if let Some(registry) = unsafe { registry.as_mut() } {
                $register(registry);
            }
        }

        #[no_mangle]
        pub extern "C" fn dpf_plugin_api_version() -> u32 {
            $crate::core::version::get_api_version()
        }

        /// # Safety
        ///
        /// Host and module must be built by the same toolchain.
        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub unsafe extern "C" fn dpf_init_logger(
            logger: &'static dyn $crate::plugin::api::Log,
            level: $crate::plugin::api::LevelFilter,
        ) {
            $crate::plugin::api::install_module_logger(logger, level);
        }
    };
}

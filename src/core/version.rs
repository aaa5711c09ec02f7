//! Build metadata and API version accessors shared by the host and modules.
//! Includes the generated version.rs from the build script so both sides of
//! the module boundary agree on one source of truth.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Fallback when the manifest does not carry a usable `plugin_api_version`.
const DEFAULT_API_VERSION: u32 = 20250727;

/// Parse the API version string from the build script into u32.
pub fn get_api_version() -> u32 {
    PLUGIN_API_VERSION.parse().unwrap_or(DEFAULT_API_VERSION)
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// One-line version banner used by the CLI
pub fn version_banner() -> String {
    format!(
        "{} (api {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        get_api_version(),
        build_time(),
        git_hash()
    )
}

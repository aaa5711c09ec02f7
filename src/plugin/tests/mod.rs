//! Test modules for the plugin system
//!
//! Registration policy, lookup and narrowing, and registry teardown.

mod lifecycle;
mod utils;

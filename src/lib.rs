//! Dynamic plugin framework
//!
//! A host declares named servers with minimum plugin versions, loads native
//! modules whose `register_dpf_package` entry point adds plugins back into
//! the registry, and later looks plugins up by server and name.

pub mod app;
pub mod core;
pub mod plugin;

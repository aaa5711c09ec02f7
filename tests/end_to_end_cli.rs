//! CLI Integration Tests
//!
//! - `cli::listing` - server listing, config file handling and exit codes

mod cli;

//! Command-line arguments for the `dpf` host
//!
//! Values given on the command line take precedence over the configuration
//! file; list values (servers, modules) are appended after the file's.

use clap::{ArgAction, Parser};
use serde::Deserialize;
use std::path::PathBuf;

use super::config::Config;

/// Server declaration: a name and the minimum plugin version it accepts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServerSpec {
    pub name: String,
    #[serde(default)]
    pub minimum_version: i32,
}

/// Parse `NAME` or `NAME=MINVER`
pub fn parse_server_spec(value: &str) -> Result<ServerSpec, String> {
    let (name, version) = match value.split_once('=') {
        Some((name, version)) => (name.trim(), Some(version.trim())),
        None => (value.trim(), None),
    };

    if name.is_empty() {
        return Err(format!("Server name cannot be empty in '{}'", value));
    }

    let minimum_version = match version {
        Some(v) => v
            .parse::<i32>()
            .map_err(|_| format!("'{}' is not a valid minimum version", v))?,
        None => 0,
    };

    Ok(ServerSpec {
        name: name.to_string(),
        minimum_version,
    })
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dpf")]
#[command(about = "Load plugin modules and list the plugins they register")]
#[command(version)]
#[command(after_help = " * can be specified multiple times")]
pub struct Args {
    /// Module files to load
    #[arg(value_name = "MODULES")]
    pub modules: Vec<PathBuf>,

    /// Load every module found in this directory
    #[arg(short = 'd', long = "plugin-dir", value_name = "DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Declare a server accepting plugins of at least MINVER*
    #[arg(
        short = 's',
        long = "server",
        value_name = "NAME[=MINVER]",
        value_parser = parse_server_spec,
        action = ArgAction::Append
    )]
    pub servers: Vec<ServerSpec>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Fold configuration file values under the command-line values.
    pub fn merge_config(&mut self, config: Config) {
        self.log_level = self.log_level.take().or(config.log_level);
        self.log_format = self.log_format.take().or(config.log_format);
        self.log_file = self.log_file.take().or(config.log_file);
        self.plugin_dir = self.plugin_dir.take().or(config.plugin_dir);

        if !self.color && !self.no_color {
            match config.color {
                Some(true) => self.color = true,
                Some(false) => self.no_color = true,
                None => {}
            }
        }

        let mut servers = config.servers;
        servers.append(&mut self.servers);
        self.servers = servers;

        let mut modules = config.modules;
        modules.append(&mut self.modules);
        self.modules = modules;
    }

    /// Log file to use, with the magic values `none` and `-` disabling it
    pub fn effective_log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref().filter(|path| {
            let s = path.to_string_lossy();
            !(s.eq_ignore_ascii_case("none") || s == "-")
        })
    }

    /// Whether output should be colored, given whether stdout is a terminal
    pub fn use_color(&self, is_terminal: bool) -> bool {
        (self.color || is_terminal) && !self.no_color
    }
}

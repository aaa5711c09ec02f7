//! TOML configuration file loading
//!
//! ```toml
//! log-level = "info"
//! plugin-dir = "/usr/lib/dpf"
//! modules = ["libexample_plugin.so"]
//!
//! [[server]]
//! name = "Example"
//! minimum-version = 1
//! ```

use crate::plugin::error::{PluginError, PluginResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::args::ServerSpec;

/// Values read from a `dpf.toml` file
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
    pub plugin_dir: Option<PathBuf>,
    #[serde(default)]
    pub modules: Vec<PathBuf>,
    #[serde(default, rename = "server")]
    pub servers: Vec<ServerSpec>,
}

impl Config {
    pub fn from_toml_str(contents: &str) -> PluginResult<Self> {
        toml::from_str(contents).map_err(|e| PluginError::ConfigError {
            message: e.to_string(),
        })
    }

    /// Read and parse the file at `path`
    pub fn load(path: &Path) -> PluginResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PluginError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            PluginError::ConfigError { message } => PluginError::ConfigError {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Default location: `<config dir>/Dpf/dpf.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Dpf").join("dpf.toml"))
    }

    /// Load an explicitly named file, or the default file if it exists.
    ///
    /// An explicit file must exist; a missing default file is not an error.
    pub fn discover(explicit: Option<&Path>) -> PluginResult<Option<Self>> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path).map(Some),
                _ => Ok(None),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            log-level = "debug"
            log-format = "ext"
            log-file = "/tmp/dpf.log"
            color = true
            plugin-dir = "/opt/dpf/plugins"
            modules = ["a.so", "b.so"]

            [[server]]
            name = "Example"
            minimum-version = 1

            [[server]]
            name = "Audio"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.plugin_dir, Some(PathBuf::from("/opt/dpf/plugins")));
        assert_eq!(config.modules.len(), 2);
        assert_eq!(
            config.servers,
            vec![
                ServerSpec {
                    name: "Example".to_string(),
                    minimum_version: 1
                },
                ServerSpec {
                    name: "Audio".to_string(),
                    minimum_version: 0
                },
            ]
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = Config::from_toml_str("srever = 1");
        assert!(matches!(result, Err(PluginError::ConfigError { .. })));
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"log-level = 3").unwrap();

        let message = match Config::load(file.path()) {
            Err(PluginError::ConfigError { message }) => message,
            other => panic!("expected ConfigError, got {:?}", other),
        };
        assert!(message.starts_with(&file.path().display().to_string()));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        assert!(Config::discover(Some(Path::new("/nonexistent/dpf.toml"))).is_err());
    }
}

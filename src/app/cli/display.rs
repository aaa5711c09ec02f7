//! CLI display utilities for formatting the registry listing

use crate::plugin::api::Registry;
use colored::Colorize;
use prettytable::{format, row, Table};

/// Render servers, their plugins and the loaded libraries as text.
pub fn render_registry(registry: &Registry) -> String {
    let mut out = String::new();

    let server_names = registry.server_names();
    if server_names.is_empty() {
        out.push_str("No servers declared.\n");
    }

    for server_name in server_names {
        let Some(server) = registry.server(&server_name) else {
            continue;
        };
        out.push_str(&format!(
            "{} (minimum version {}): {} plugin(s)\n",
            server.name().bold(),
            server.minimum_version(),
            server.len()
        ));
        if server.is_empty() {
            continue;
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(row!["Plugin", "Version", "Origin", "Type"]);
        for (plugin, origin) in server.iter_with_origin() {
            table.add_row(row![
                plugin.name(),
                plugin.version(),
                origin,
                plugin.type_name()
            ]);
        }
        out.push_str(&table.to_string());
    }

    if registry.library_count() > 0 {
        out.push_str(&format!("{}\n", "Libraries".bold()));
        for (id, path) in registry.libraries() {
            out.push_str(&format!("  {}  {}\n", id, path.display()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::api::PluginIdentity;

    struct Listed {
        identity: PluginIdentity,
    }

    crate::impl_plugin!(Listed);

    #[test]
    fn test_render_lists_plugins_per_server() {
        colored::control::set_override(false);
        let mut registry = Registry::new();
        registry.add_server("Example", 1);
        registry.add_server("Empty", 0);
        registry
            .submit(Listed {
                identity: PluginIdentity::new("Example", "BobPlugin", 3),
            })
            .unwrap();

        let output = render_registry(&registry);

        assert!(output.contains("Empty (minimum version 0): 0 plugin(s)"));
        assert!(output.contains("Example (minimum version 1): 1 plugin(s)"));
        assert!(output.contains("BobPlugin"));
        assert!(output.contains("host"));
        assert!(!output.contains("Libraries"));
    }

    #[test]
    fn test_render_empty_registry() {
        assert_eq!(render_registry(&Registry::new()), "No servers declared.\n");
    }
}

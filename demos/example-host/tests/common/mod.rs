//! Locating the example plugin module built alongside these tests

use dpf::plugin::api::{discover_libraries, library_file_name};
use std::path::{Path, PathBuf};

/// Path of the built `example_plugin` module.
///
/// `DPF_EXAMPLE_PLUGIN` overrides the lookup. Otherwise the target profile
/// directory is tried first, then the hashed copy in `deps/`.
pub fn example_module() -> PathBuf {
    if let Some(path) = std::env::var_os("DPF_EXAMPLE_PLUGIN") {
        return PathBuf::from(path);
    }

    let exe = std::env::current_exe().unwrap();
    let deps_dir = exe.parent().unwrap();
    let profile_dir = deps_dir.parent().unwrap_or(deps_dir);

    let uplifted = profile_dir.join(library_file_name("example_plugin"));
    if uplifted.is_file() {
        return uplifted;
    }

    newest_hashed_module(deps_dir).unwrap_or_else(|| {
        panic!(
            "example plugin module not found under {}; build it with `cargo build -p dpf-example-plugin`",
            profile_dir.display()
        )
    })
}

fn newest_hashed_module(deps_dir: &Path) -> Option<PathBuf> {
    let prefix = format!("{}example_plugin-", std::env::consts::DLL_PREFIX);
    discover_libraries(deps_dir)
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .max_by_key(|path| path.metadata().and_then(|m| m.modified()).ok())
}

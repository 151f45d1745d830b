use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::app_config::default_config_path;

static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global config file path.
/// If `custom` is provided, uses that path; otherwise the default lookup.
pub fn init(custom: Option<&str>) {
    let path = custom
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let _ = CONFIG_PATH.set(path);
}

/// Get the config file path chosen at startup.
pub fn config_path() -> &'static Path {
    CONFIG_PATH
        .get_or_init(default_config_path)
        .as_path()
}

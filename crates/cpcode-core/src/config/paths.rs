//! Config path resolution helpers.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "cpcode.toml";

/// `<config dir>/cpcode/cpcode.toml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
    Some(config_path_in(&dir))
}

pub fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("cpcode").join(CONFIG_FILE_NAME)
}

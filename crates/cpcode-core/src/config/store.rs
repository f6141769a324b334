//! Config store for loading cpcode.toml.

use std::path::{Path, PathBuf};

use super::{CpcodeConfig, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform default location.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let config_path = paths::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::from_path(config_path))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration; a missing file yields defaults.
    pub fn load(&self) -> anyhow::Result<CpcodeConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(CpcodeConfig::new());
        }
        parser::parse_config(&self.config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::from_path(temp.path().join("cpcode.toml"));
        assert_eq!(store.load().unwrap(), CpcodeConfig::default());
    }

    #[test]
    fn loads_file_from_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = paths::config_path_in(temp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "api_endpoint = \"http://localhost:8080/api/\"\ncache_timeout = 15\n",
        )
        .unwrap();
        let store = ConfigStore::from_path(path);

        let expected = CpcodeConfig::new()
            .with_api_endpoint("http://localhost:8080/api")
            .with_cache_timeout(15);
        assert_eq!(store.load().unwrap(), expected);
    }
}

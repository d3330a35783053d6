use pagecraft_evaluator::DataSourceRegistry;
use pagecraft_workspace::{Site, DEFAULT_DEVICE_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Site file holding documents and components
    #[serde(default = "default_site_file")]
    pub site_file: String,

    /// JSON list of data sources replacing the built-in samples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<String>,

    /// Device frame width the preview is rendered at
    #[serde(default = "default_device_width")]
    pub device_width: u32,
}

fn default_site_file() -> String {
    "site.json".to_string()
}

fn default_device_width() -> u32 {
    DEFAULT_DEVICE_WIDTH
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn site_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.site_file)
    }

    pub fn load_site(&self, cwd: &str) -> anyhow::Result<Site> {
        let path = self.site_path(cwd);
        if !path.exists() {
            anyhow::bail!(
                "Site file {} not found. Run `pagecraft init` first",
                path.display()
            );
        }
        Ok(Site::load(&path)?)
    }

    pub fn load_sources(&self, cwd: &str) -> anyhow::Result<DataSourceRegistry> {
        match &self.data_sources {
            Some(file) => Ok(DataSourceRegistry::load(&PathBuf::from(cwd).join(file))?),
            None => Ok(DataSourceRegistry::builtin()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_file: default_site_file(),
            data_sources: None,
            device_width: default_device_width(),
        }
    }
}

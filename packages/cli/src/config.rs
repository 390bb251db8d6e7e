use docsel_compiler::DEFAULT_TABLE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "docsel.config.json";

/// docsel configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Pick the first candidate instead of failing on ambiguous selectors
    pub allow_ambiguous: bool,

    /// Default size for `object insert table`
    pub table: TableConfig,

    /// Pretty-print JSON output
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub rows: u32,
    pub columns: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_TABLE_SIZE,
            columns: DEFAULT_TABLE_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_ambiguous: false,
            table: TableConfig::default(),
            pretty: true,
        }
    }
}

impl Config {
    /// Load an explicit config file, or `docsel.config.json` from `cwd` when present
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .map_err(|err| anyhow::anyhow!("Cannot read config {}: {}", config_path.display(), err))?;
        let config = serde_json::from_str(&content)
            .map_err(|err| anyhow::anyhow!("Invalid config {}: {}", config_path.display(), err))?;
        Ok(config)
    }
}

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "pagegen.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from `pagegen.toml` in the project root. Every key is
/// optional; paths are relative to the root.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub batch: PathBuf,
    pub template: PathBuf,
    pub sitemap: PathBuf,
    /// Used when the batch does not name its own `meta.canonicalBase`.
    pub canonical_base: String,
    pub changefreq: String,
    pub priority: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch: PathBuf::from("tools/pages-batch.json"),
            template: PathBuf::from("tools/problem-page-template.html"),
            sitemap: PathBuf::from("sitemap.xml"),
            canonical_base: "https://elevaterepair.com".to_string(),
            changefreq: "monthly".to_string(),
            priority: "0.7".to_string(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }
}

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::warn;
use serde::Deserialize;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("Error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error reading {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No pages found in {}", path.display())]
    Empty { path: PathBuf },
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Meta {
    canonical_base: Option<String>,
}

#[derive(Deserialize, Debug)]
struct BatchFile {
    meta: Option<Meta>,
    pages: Option<Vec<PageRecord>>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RelatedLink {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub label: String,
}

/// One page as it appears in the batch file. Nothing here is checked yet;
/// see [`crate::validate`].
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub dir: Option<String>,
    pub file_name: Option<String>,
    pub city: Option<String>,
    pub city_state: Option<String>,
    pub appliance: Option<String>,
    pub appliance_dir: Option<String>,
    pub problem: Option<String>,
    pub title: Option<String>,
    pub meta_desc: Option<String>,
    pub h1: Option<String>,
    pub hero_text: Option<String>,
    pub canonical: Option<String>,
    pub related_links: Option<Vec<RelatedLink>>,
    pub body_html: Option<String>,
}

#[derive(Debug)]
pub struct Batch {
    pub canonical_base: String,
    pub pages: Vec<PageRecord>,
}

impl Batch {
    /// Reads the batch file. `fallback_base` is used when the file has no
    /// usable `meta.canonicalBase`.
    pub fn load(path: &Path, fallback_base: &str) -> Result<Self, BatchError> {
        let text = fs::read_to_string(path).map_err(|source| BatchError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text, path, fallback_base)
    }

    fn parse(text: &str, path: &Path, fallback_base: &str) -> Result<Self, BatchError> {
        let file: BatchFile = serde_json::from_str(text).map_err(|source| BatchError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let pages = match file.pages {
            Some(pages) if !pages.is_empty() => pages,
            _ => {
                return Err(BatchError::Empty {
                    path: path.to_path_buf(),
                })
            }
        };

        let canonical_base = file
            .meta
            .and_then(|m| m.canonical_base)
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| fallback_base.to_string());

        // Joined as a plain string later on; an odd base is still used as given.
        if let Err(e) = Url::parse(&canonical_base) {
            warn!("canonical base {canonical_base:?} is not an absolute URL ({e})");
        }

        Ok(Self {
            canonical_base,
            pages,
        })
    }
}

use std::path::PathBuf;

use crate::batch::{PageRecord, RelatedLink};

/// A page that passed validation and has body content to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub dir: String,
    pub file_name: String,
    pub city: String,
    pub city_state: String,
    pub appliance: String,
    pub appliance_dir: String,
    pub problem: String,
    pub title: String,
    pub meta_desc: String,
    pub h1: String,
    pub hero_text: String,
    pub canonical: Option<String>,
    pub related_links: Vec<RelatedLink>,
    pub body_html: String,
}

impl Page {
    pub(crate) fn from_record(record: &PageRecord) -> Self {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();

        Self {
            dir: field(&record.dir),
            file_name: field(&record.file_name),
            city: field(&record.city),
            city_state: field(&record.city_state),
            appliance: field(&record.appliance),
            appliance_dir: field(&record.appliance_dir),
            problem: field(&record.problem),
            title: field(&record.title),
            meta_desc: field(&record.meta_desc),
            h1: field(&record.h1),
            hero_text: field(&record.hero_text),
            canonical: record.canonical.clone().filter(|c| !c.is_empty()),
            related_links: record.related_links.clone().unwrap_or_default(),
            body_html: field(&record.body_html),
        }
    }

    /// `dir/fileName`, used in log lines and as the output location.
    pub fn rel_path(&self) -> String {
        format!("{}/{}", self.dir, self.file_name)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.file_name)
    }

    /// The published address of the page. Ignores any canonical override.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base, self.rel_path())
    }

    pub fn canonical_url(&self, base: &str) -> String {
        self.canonical.clone().unwrap_or_else(|| self.url(base))
    }
}

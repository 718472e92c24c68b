use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use regex::Regex;
use tera::Tera;

const CLOSING_TAG: &str = "</urlset>";

const ENTRY_TEMPLATE: &str = "  <url>
    <loc>{{ loc }}</loc>
    <lastmod>{{ lastmod }}</lastmod>
    <changefreq>{{ changefreq }}</changefreq>
    <priority>{{ priority }}</priority>
  </url>";

#[derive(thiserror::Error, Debug)]
pub enum SitemapError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Could not find </urlset> in {}", path.display())]
    MissingClosingTag { path: PathBuf },

    #[error("failed to render sitemap entry: {0}")]
    Render(#[from] tera::Error),
}

/// Values shared by every entry this run adds.
pub struct EntrySettings<'a> {
    pub lastmod: NaiveDate,
    pub changefreq: &'a str,
    pub priority: &'a str,
}

/// An existing sitemap file. Only `<loc>` values are looked at; the rest of
/// the document is carried through untouched.
pub struct Sitemap {
    path: PathBuf,
    text: String,
    existing: HashSet<String>,
}

#[derive(Debug)]
pub struct SitemapPlan {
    path: PathBuf,
    pub added: Vec<String>,
    pub present: Vec<String>,
    updated: Option<String>,
}

fn existing_locations(text: &str) -> HashSet<String> {
    let loc = Regex::new(r"<loc>([^<]+)</loc>").expect("valid regex");
    loc.captures_iter(text).map(|c| c[1].to_string()).collect()
}

impl Sitemap {
    /// `None` when there is no file at `path`.
    pub fn open(path: &Path) -> Result<Option<Self>, SitemapError> {
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(path).map_err(|source| SitemapError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(Self::from_text(path, text)))
    }

    fn from_text(path: &Path, text: String) -> Self {
        Self {
            path: path.to_path_buf(),
            existing: existing_locations(&text),
            text,
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.existing.contains(url)
    }

    /// Works out which of `urls` need entries and what the file would look
    /// like with them. Nothing is written.
    pub fn plan<I>(&self, urls: I, settings: &EntrySettings) -> Result<SitemapPlan, SitemapError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut tera = Tera::default();
        tera.add_raw_template("url", ENTRY_TEMPLATE)?;
        tera.autoescape_on(vec![]);

        let lastmod = settings.lastmod.format("%Y-%m-%d").to_string();

        let mut queued = HashSet::new();
        let mut added = vec![];
        let mut present = vec![];
        let mut entries = vec![];

        for url in urls {
            if self.contains(&url) || queued.contains(&url) {
                present.push(url);
                continue;
            }

            let mut ctx = tera::Context::new();
            ctx.insert("loc", &url);
            ctx.insert("lastmod", &lastmod);
            ctx.insert("changefreq", settings.changefreq);
            ctx.insert("priority", settings.priority);

            entries.push(tera.render("url", &ctx)?);
            queued.insert(url.clone());
            added.push(url);
        }

        let updated = if entries.is_empty() {
            None
        } else {
            let at = self
                .text
                .rfind(CLOSING_TAG)
                .ok_or_else(|| SitemapError::MissingClosingTag {
                    path: self.path.clone(),
                })?;

            let mut text = String::with_capacity(self.text.len() + entries.len() * 160);
            text.push_str(&self.text[..at]);
            text.push_str(&entries.join("\n"));
            text.push('\n');
            text.push_str(&self.text[at..]);
            Some(text)
        };

        Ok(SitemapPlan {
            path: self.path.clone(),
            added,
            present,
            updated,
        })
    }
}

impl SitemapPlan {
    pub fn contents(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    pub fn write(&self) -> Result<(), SitemapError> {
        if let Some(text) = self.contents() {
            fs::write(&self.path, text).map_err(|source| SitemapError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

use chrono::NaiveDate;
use log::{info, warn};

use crate::{
    batch::Batch,
    lint::{self, ParagraphIndex},
    publish::{publish_pages, Mode, RenderedPage},
    report::Summary,
    sitemap::{EntrySettings, Sitemap},
    template::Template,
    validate::validate,
    Context,
};

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Every record had blank body content.
    NothingToGenerate { total: usize, skipped: usize },
    Generated(Summary),
}

pub fn run(context: &Context, mode: Mode, today: NaiveDate) -> anyhow::Result<Outcome> {
    let config = &context.config;

    let batch = Batch::load(&context.absolute(&config.batch), &config.canonical_base)?;
    let template = Template::load(&context.absolute(&config.template))?;

    let validated = validate(&batch.pages)?;

    if !validated.skipped.is_empty() {
        warn!(
            "{} page(s) have empty bodyHtml and will be skipped:",
            validated.skipped.len()
        );
        for label in &validated.skipped {
            warn!("   - {label}");
        }
    }

    if validated.pages.is_empty() {
        info!("No pages with bodyHtml content to generate. Fill in bodyHtml fields and re-run.");
        return Ok(Outcome::NothingToGenerate {
            total: batch.pages.len(),
            skipped: validated.skipped.len(),
        });
    }

    info!("Generating {} page(s)...", validated.pages.len());

    for dup in ParagraphIndex::new().duplicates(&validated.pages) {
        warn!(
            "duplicate paragraph in {} and {}: {}",
            dup.first, dup.second, dup.preview
        );
    }

    let rendered = validated
        .pages
        .into_iter()
        .map(|page| {
            let html = template.render(&page, &batch.canonical_base);
            for finding in lint::check_rendered(&html) {
                warn!("{}: {finding}", page.rel_path());
            }
            RenderedPage { page, html }
        })
        .collect::<Vec<_>>();

    // Read and plan the sitemap before any page hits the disk, so a broken
    // sitemap aborts with nothing written.
    let sitemap_plan = match Sitemap::open(&context.absolute(&config.sitemap))? {
        Some(sitemap) => {
            let settings = EntrySettings {
                lastmod: today,
                changefreq: &config.changefreq,
                priority: &config.priority,
            };
            let urls = rendered
                .iter()
                .map(|r| r.page.url(&batch.canonical_base));
            Some(sitemap.plan(urls, &settings)?)
        }
        None => None,
    };

    let written = publish_pages(context, mode, &rendered)?;

    let prefix = if mode.is_dry_run() { "[dry-run]" } else { " " };
    let mut sitemap_added = 0;

    match sitemap_plan {
        None => info!(
            "{} not found — skipping sitemap update.",
            config.sitemap.display()
        ),
        Some(plan) => {
            for url in &plan.present {
                info!("{prefix} Sitemap: already exists — {url}");
            }

            sitemap_added = plan.added.len();

            if sitemap_added == 0 {
                info!("No new sitemap entries needed (all URLs already present).");
            } else if mode.is_dry_run() {
                info!("[dry-run] Would add {sitemap_added} new sitemap entries");
            } else {
                plan.write()?;
                info!("  Added {sitemap_added} new sitemap entries");
            }
        }
    }

    Ok(Outcome::Generated(Summary {
        mode,
        total: batch.pages.len(),
        skipped: validated.skipped.len(),
        generated: written.len(),
        sitemap_added,
    }))
}

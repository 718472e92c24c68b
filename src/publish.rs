use std::fmt;

use log::info;

use crate::{page::Page, Context};

/// Chosen once per run. Dry-run does all the work except touching the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Write,
}

impl Mode {
    pub fn is_dry_run(self) -> bool {
        self == Mode::DryRun
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::DryRun => write!(f, "dry-run"),
            Mode::Write => write!(f, "write"),
        }
    }
}

pub struct RenderedPage {
    pub page: Page,
    pub html: String,
}

/// Writes (or reports) every page and returns the ones that count as
/// published, in order.
pub fn publish_pages<'a>(
    context: &Context,
    mode: Mode,
    rendered: &'a [RenderedPage],
) -> anyhow::Result<Vec<&'a Page>> {
    let mut written = vec![];

    for RenderedPage { page, html } in rendered {
        let rel_path = page.rel_path();

        match mode {
            Mode::DryRun => {
                info!("[dry-run] Would write: {rel_path} ({} bytes)", html.len());
            }
            Mode::Write => {
                context.write_to_output(&page.output_path(), html)?;
                info!("  Wrote: {rel_path}");
            }
        }

        written.push(page);
    }

    Ok(written)
}

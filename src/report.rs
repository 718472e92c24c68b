use std::fmt;

use crate::publish::Mode;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mode: Mode,
    pub total: usize,
    pub skipped: usize,
    pub generated: usize,
    pub sitemap_added: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "─── Summary ───")?;
        writeln!(f, "Mode:            {}", self.mode)?;
        writeln!(f, "Total in batch:  {}", self.total)?;
        writeln!(f, "Skipped (empty): {}", self.skipped)?;
        writeln!(f, "Generated:       {}", self.generated)?;
        write!(f, "Sitemap added:   {}", self.sitemap_added)?;

        if self.mode.is_dry_run() && self.generated > 0 {
            write!(f, "\n\nRun with --write to create the files.")?;
        }

        Ok(())
    }
}

use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use clap::Parser;
use config::Config;
use generate::Outcome;
use log::info;
use publish::Mode;

mod batch;
mod config;
mod generate;
mod lint;
mod page;
mod publish;
mod report;
mod sitemap;
mod template;
mod validate;

/// Render landing pages from pages-batch.json and add them to sitemap.xml.
/// Runs as a dry-run unless --write is given.
#[derive(Parser, Debug)]
#[command(name = "pagegen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write the HTML files and update the sitemap
    #[arg(long, overrides_with = "dry_run")]
    write: bool,
    /// Only report what would be written (the default)
    #[arg(long, overrides_with = "write")]
    dry_run: bool,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.write && !self.dry_run {
            Mode::Write
        } else {
            Mode::DryRun
        }
    }
}

pub struct Context {
    home: PathBuf,
    config: Config,
}

impl Context {
    pub fn new(home: PathBuf) -> anyhow::Result<Self> {
        let config = Config::load(&home)?;
        Ok(Self::with_config(home, config))
    }

    pub fn with_config(home: PathBuf, config: Config) -> Self {
        Self { home, config }
    }

    fn absolute<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.home.join(path.as_ref())
    }

    fn create_output_dir(&self, path: &Path) -> anyhow::Result<()> {
        let output = self.absolute(path);
        Ok(fs::create_dir_all(output)?)
    }

    fn write_to_output(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        path.parent()
            .map(|p| self.create_output_dir(p))
            .transpose()?;

        let output = self.absolute(path);

        fs::write(output, contents)?;

        Ok(())
    }
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{level}: {}", record.args()),
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let args = Args::parse();
    let mode = args.mode();

    match mode {
        Mode::DryRun => info!("=== DRY-RUN MODE (no files will be written) ===\n"),
        Mode::Write => info!("=== WRITE MODE ===\n"),
    }

    let context = Context::new(env::current_dir()?)?;

    match generate::run(&context, mode, Utc::now().date_naive())? {
        Outcome::NothingToGenerate { total, skipped } => {
            info!("Total in batch: {total}, skipped (empty): {skipped}");
        }
        Outcome::Generated(summary) => println!("\n{summary}\n"),
    }

    Ok(())
}

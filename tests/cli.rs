//! End-to-end runs of the pagegen binary against a scratch project root.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = "<title>{{TITLE}}</title>\n<nav>{{RELATED_LINKS_HTML}}</nav>\n<main>{{BODY_HTML}}</main>\n";

const SITEMAP: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n</urlset>\n";

/// `TEMPLATE` rendered for `page("<p>Body</p>")`.
const RENDERED: &str =
    "<title>Dishwasher Not Draining in Austin</title>\n<nav></nav>\n<main><p>Body</p></main>\n";

fn page(body: &str) -> String {
    format!(
        r#"{{
            "dir": "appliance-repair/dishwasher",
            "fileName": "austin-tx.html",
            "city": "Austin",
            "cityState": "Austin, TX",
            "appliance": "Dishwasher",
            "applianceDir": "dishwasher",
            "problem": "Not Draining",
            "title": "Dishwasher Not Draining in Austin",
            "metaDesc": "Same-day dishwasher repair.",
            "h1": "Dishwasher Not Draining?",
            "bodyHtml": {body:?}
        }}"#
    )
}

fn project(pages: &[String]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let tools = dir.path().join("tools");
    fs::create_dir_all(&tools).unwrap();

    fs::write(
        tools.join("pages-batch.json"),
        format!(r#"{{ "pages": [{}] }}"#, pages.join(",")),
    )
    .unwrap();
    fs::write(tools.join("problem-page-template.html"), TEMPLATE).unwrap();
    fs::write(dir.path().join("sitemap.xml"), SITEMAP).unwrap();

    dir
}

fn pagegen(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pagegen").unwrap();
    cmd.current_dir(root).env_remove("RUST_LOG");
    cmd
}

#[test]
fn dry_run_is_default_and_writes_nothing() {
    let dir = project(&[page("<p>Body</p>")]);

    pagegen(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY-RUN MODE"))
        .stdout(predicate::str::contains(
            "[dry-run] Would write: appliance-repair/dishwasher/austin-tx.html (86 bytes)",
        ))
        .stdout(predicate::str::contains("Run with --write to create the files."));

    assert!(!dir.path().join("appliance-repair").exists());
    assert_eq!(fs::read_to_string(dir.path().join("sitemap.xml")).unwrap(), SITEMAP);
}

#[test]
fn write_mode_generates_page_and_sitemap() {
    let dir = project(&[page("<p>Body</p>")]);

    pagegen(dir.path())
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote: appliance-repair/dishwasher/austin-tx.html"))
        .stdout(predicate::str::contains("Added 1 new sitemap entries"));

    let html =
        fs::read_to_string(dir.path().join("appliance-repair/dishwasher/austin-tx.html")).unwrap();
    assert_eq!(html, RENDERED);
    assert_eq!(RENDERED.len(), 86);

    let sitemap = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
    assert!(sitemap.contains(
        "<loc>https://elevaterepair.com/appliance-repair/dishwasher/austin-tx.html</loc>"
    ));

    pagegen(dir.path())
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sitemap: already exists"));

    assert_eq!(fs::read_to_string(dir.path().join("sitemap.xml")).unwrap(), sitemap);
}

#[test]
fn missing_batch_exits_with_error() {
    let dir = TempDir::new().unwrap();

    pagegen(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pages-batch.json"));
}

#[test]
fn validation_errors_exit_with_error() {
    let dir = project(&[page("<p>Body</p>").replace("\"city\": \"Austin\",", "")]);

    pagegen(dir.path())
        .arg("--write")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing required field \"city\""));

    assert!(!dir.path().join("appliance-repair").exists());
}

#[test]
fn blank_bodies_are_a_successful_no_op() {
    let dir = project(&[page(""), page("   ")]);

    pagegen(dir.path())
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 page(s) have empty bodyHtml"))
        .stdout(predicate::str::contains("No pages with bodyHtml content to generate"));
}

#[test]
fn unknown_flags_are_rejected() {
    let dir = project(&[page("<p>Body</p>")]);

    pagegen(dir.path()).arg("--force").assert().failure();
}

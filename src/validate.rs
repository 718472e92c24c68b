use std::path::{Component, Path};

use crate::{batch::PageRecord, page::Page};

/// Every problem found across the whole batch. Any entry aborts the run.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Validation errors:\n  {}", .0.join("\n  "))]
pub struct ValidationErrors(pub Vec<String>);

#[derive(Debug, Default)]
pub struct Validated {
    pub pages: Vec<Page>,
    /// Labels of records left out because their body content is blank.
    pub skipped: Vec<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn required_fields(record: &PageRecord) -> [(&'static str, &Option<String>); 10] {
    [
        ("dir", &record.dir),
        ("fileName", &record.file_name),
        ("city", &record.city),
        ("cityState", &record.city_state),
        ("appliance", &record.appliance),
        ("applianceDir", &record.appliance_dir),
        ("problem", &record.problem),
        ("title", &record.title),
        ("metaDesc", &record.meta_desc),
        ("h1", &record.h1),
    ]
}

/// Absolute paths and `..` would put the page outside the project root.
fn stays_under_root(value: &str) -> bool {
    Path::new(value)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

pub fn label(index: usize, record: &PageRecord) -> String {
    let or_unknown = |v: &Option<String>| {
        v.as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("?")
            .to_string()
    };

    format!(
        "pages[{index}] ({}/{})",
        or_unknown(&record.dir),
        or_unknown(&record.file_name)
    )
}

fn has_body(record: &PageRecord) -> bool {
    record
        .body_html
        .as_deref()
        .is_some_and(|b| !b.trim().is_empty())
}

pub fn validate(records: &[PageRecord]) -> Result<Validated, ValidationErrors> {
    let mut errors = vec![];
    let mut validated = Validated::default();

    for (index, record) in records.iter().enumerate() {
        let label = label(index, record);

        let before = errors.len();
        for (field, value) in required_fields(record) {
            if !present(value) {
                errors.push(format!("{label}: missing required field \"{field}\""));
            }
        }
        for (field, value) in [("dir", &record.dir), ("fileName", &record.file_name)] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                if !stays_under_root(value) {
                    errors.push(format!(
                        "{label}: \"{field}\" must be a relative path inside the project"
                    ));
                }
            }
        }
        let complete = errors.len() == before;

        if !has_body(record) {
            validated.skipped.push(label);
        } else if complete {
            validated.pages.push(Page::from_record(record));
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(ValidationErrors(errors))
    }
}

use std::collections::HashMap;

use regex::Regex;

use crate::{page::Page, template::Token};

/// Paragraphs shorter than this are calls to action or link lists and are
/// expected to repeat.
const MIN_PARAGRAPH_CHARS: usize = 80;

/// Problems in a single rendered page. None of these stop the run.
pub fn check_rendered(html: &str) -> Vec<String> {
    let mut findings = vec![];

    if html.contains("<<<<<<<") || (html.contains("=======") && html.contains(">>>>>>>")) {
        findings.push("merge conflict markers detected".to_string());
    }

    for token in Token::ALL {
        if html.contains(&token.marker()) {
            findings.push(format!("placeholder {} survived rendering", token.marker()));
        }
    }

    findings
}

#[derive(Debug, PartialEq)]
pub struct DuplicateParagraph {
    pub first: String,
    pub second: String,
    pub preview: String,
}

pub struct ParagraphIndex {
    paragraph: Regex,
    tag: Regex,
}

impl ParagraphIndex {
    pub fn new() -> Self {
        Self {
            paragraph: Regex::new(r"(?s)<p>(.*?)</p>").expect("valid regex"),
            tag: Regex::new(r"<[^>]+>").expect("valid regex"),
        }
    }

    fn paragraphs<'a>(&'a self, body: &'a str) -> impl Iterator<Item = String> + 'a {
        self.paragraph.captures_iter(body).filter_map(|c| {
            let text = self.tag.replace_all(&c[1], "").trim().to_string();
            (text.chars().count() >= MIN_PARAGRAPH_CHARS).then_some(text)
        })
    }

    /// Long body paragraphs that appear on more than one page.
    pub fn duplicates(&self, pages: &[Page]) -> Vec<DuplicateParagraph> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut duplicates = vec![];

        for page in pages {
            let path = page.rel_path();

            for text in self.paragraphs(&page.body_html) {
                match seen.get(&text) {
                    Some(first) if *first != path => {
                        let preview: String = text.chars().take(100).collect();
                        duplicates.push(DuplicateParagraph {
                            first: first.clone(),
                            second: path.clone(),
                            preview: format!("{preview}..."),
                        });
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(text, path.clone());
                    }
                }
            }
        }

        duplicates
    }
}

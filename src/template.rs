use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use combine::{
    between,
    parser::{char::string as Str, range::take_while1},
    Parser, RangeStream,
};

use crate::{batch::RelatedLink, page::Page};

#[derive(thiserror::Error, Debug)]
#[error("Error reading {}: {source}", path.display())]
pub struct TemplateError {
    path: PathBuf,
    source: io::Error,
}

/// The placeholders a template may contain, written `{{NAME}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Title,
    MetaDesc,
    Canonical,
    H1,
    HeroText,
    BodyHtml,
    Appliance,
    ApplianceDir,
    City,
    CityState,
    Problem,
    RelatedLinksHtml,
}

impl Token {
    pub const ALL: [Token; 12] = [
        Token::Title,
        Token::MetaDesc,
        Token::Canonical,
        Token::H1,
        Token::HeroText,
        Token::BodyHtml,
        Token::Appliance,
        Token::ApplianceDir,
        Token::City,
        Token::CityState,
        Token::Problem,
        Token::RelatedLinksHtml,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Token::Title => "TITLE",
            Token::MetaDesc => "META_DESC",
            Token::Canonical => "CANONICAL",
            Token::H1 => "H1",
            Token::HeroText => "HERO_TEXT",
            Token::BodyHtml => "BODY_HTML",
            Token::Appliance => "APPLIANCE",
            Token::ApplianceDir => "APPLIANCE_DIR",
            Token::City => "CITY",
            Token::CityState => "CITY_STATE",
            Token::Problem => "PROBLEM",
            Token::RelatedLinksHtml => "RELATED_LINKS_HTML",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The token as it is spelled in a template.
    pub fn marker(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// A template split into literal text and recognized tokens. Unknown
/// `{{...}}` sequences stay part of the literal text.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

fn placeholder<'a, I>() -> impl Parser<I, Output = &'a str>
where
    I: RangeStream<Token = char, Range = &'a str>,
{
    between(
        Str("{{"),
        Str("}}"),
        take_while1(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
    )
}

impl Template {
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&source))
    }

    pub fn parse(source: &str) -> Self {
        let mut segments = vec![];
        let mut literal_start = 0;
        let mut pos = 0;

        while let Some(offset) = source[pos..].find("{{") {
            let start = pos + offset;

            let token = placeholder()
                .parse(&source[start..])
                .ok()
                .and_then(|(name, rest)| Token::from_name(name).map(|t| (t, rest)));

            match token {
                Some((token, rest)) => {
                    if literal_start < start {
                        segments.push(Segment::Literal(source[literal_start..start].to_string()));
                    }
                    segments.push(Segment::Token(token));
                    pos = source.len() - rest.len();
                    literal_start = pos;
                }
                // step past one brace only, so `{{{TITLE}}}` still finds its token
                None => pos = start + 1,
            }
        }

        if literal_start < source.len() {
            segments.push(Segment::Literal(source[literal_start..].to_string()));
        }

        Self { segments }
    }

    /// Single pass over the template. Values are inserted verbatim and
    /// never rescanned for tokens.
    pub fn substitute(&self, values: &HashMap<Token, String>) -> String {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => {
                    if let Some(value) = values.get(token) {
                        out.push_str(value);
                    }
                }
            }
        }

        out
    }

    pub fn render(&self, page: &Page, canonical_base: &str) -> String {
        self.substitute(&values_for(page, canonical_base))
    }
}

pub fn related_links_html(links: &[RelatedLink]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "                <a href=\"{}\" class=\"city-link\">{}</a>",
                link.href, link.label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn values_for(page: &Page, canonical_base: &str) -> HashMap<Token, String> {
    HashMap::from([
        (Token::Title, page.title.clone()),
        (Token::MetaDesc, page.meta_desc.clone()),
        (Token::Canonical, page.canonical_url(canonical_base)),
        (Token::H1, page.h1.clone()),
        (Token::HeroText, page.hero_text.clone()),
        (Token::BodyHtml, page.body_html.clone()),
        (Token::Appliance, page.appliance.clone()),
        (Token::ApplianceDir, page.appliance_dir.clone()),
        (Token::City, page.city.clone()),
        (Token::CityState, page.city_state.clone()),
        (Token::Problem, page.problem.clone()),
        (
            Token::RelatedLinksHtml,
            related_links_html(&page.related_links),
        ),
    ])
}

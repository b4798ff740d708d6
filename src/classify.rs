//! Per-document-type paragraph role inference.
//!
//! Structure in the source documents is purely visual: centered paragraphs
//! carry the title, fixed font sizes mark headers, and in statutes the run
//! color separates original text, in-force text and amendment dates.

use std::sync::LazyLock;

use regex::Regex;

use crate::accumulate::{ArticleKey, SectionKey};
use crate::config::StyleConfig;
use crate::metadata;
use crate::model::{DocType, Rgb};
use crate::signal::StyleSignal;

pub const ARTICLES: &str = "articles";
pub const PROMULGATION_ARTICLES: &str = "promulgation_articles";

static ARTICLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^المادة\s+(?P<number>\d+)(?:\s+(?P<type>اصدار|مكرر))?$")
        .expect("valid article heading pattern")
});

/// What the accumulator needs to know about where it stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseState {
    pub has_header: bool,
    pub has_subheader: bool,
    pub title_open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Text,
    OriginalText,
    FinalText,
    FinalTextDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Title,
    Header(SectionKey),
    Subheader(u32),
    Article {
        header: &'static str,
        key: ArticleKey,
    },
    Body(BodyKind),
    /// Closes statute title accumulation; contributes no text.
    Sentinel,
    Skip,
}

pub trait RoleClassifier: Send + Sync {
    fn classify(&self, signal: &StyleSignal, state: &ParseState) -> Role;
}

pub fn for_doc_type(doc_type: DocType, config: &StyleConfig) -> Box<dyn RoleClassifier> {
    match doc_type {
        DocType::Judgment => Box::new(JudgmentClassifier {
            header_size: config.header_size,
            subheader_size: config.subheader_size,
        }),
        DocType::Fatwa => Box::new(FatwaClassifier {
            header_size: config.header_size,
        }),
        DocType::Law => Box::new(LawClassifier {
            sentinel_color: config.sentinel_color,
            original_text_color: config.original_text_color,
        }),
    }
}

pub struct JudgmentClassifier {
    pub header_size: u32,
    pub subheader_size: u32,
}

impl RoleClassifier for JudgmentClassifier {
    fn classify(&self, signal: &StyleSignal, state: &ParseState) -> Role {
        if signal.is_centered() {
            return Role::Title;
        }
        match signal.size {
            Some(size) if size == self.header_size => {
                Role::Header(SectionKey::label(signal.text.clone()))
            }
            Some(size) if size == self.subheader_size && state.has_header => {
                match metadata::extract_numeric(&signal.text) {
                    Some(number) => Role::Subheader(number),
                    None => Role::Body(BodyKind::Text),
                }
            }
            _ => Role::Body(BodyKind::Text),
        }
    }
}

pub struct FatwaClassifier {
    pub header_size: u32,
}

impl RoleClassifier for FatwaClassifier {
    fn classify(&self, signal: &StyleSignal, _state: &ParseState) -> Role {
        if signal.is_centered() {
            return Role::Title;
        }
        if signal.size == Some(self.header_size) {
            let key = match metadata::extract_numeric(&signal.text) {
                Some(number) => SectionKey::Number(number),
                None => SectionKey::label(signal.text.clone()),
            };
            return Role::Header(key);
        }
        Role::Body(BodyKind::Text)
    }
}

pub struct LawClassifier {
    pub sentinel_color: Rgb,
    pub original_text_color: Rgb,
}

impl LawClassifier {
    fn article_heading(text: &str) -> Option<Role> {
        let caps = ARTICLE_HEADING.captures(text.trim())?;
        let number = metadata::parse_number(caps.name("number")?.as_str())?;
        let qualifier = caps.name("type").map(|m| m.as_str());
        let header = if qualifier == Some("اصدار") {
            PROMULGATION_ARTICLES
        } else {
            ARTICLES
        };
        let repeated = qualifier == Some("مكرر");
        Some(Role::Article {
            header,
            key: ArticleKey { number, repeated },
        })
    }
}

impl RoleClassifier for LawClassifier {
    fn classify(&self, signal: &StyleSignal, state: &ParseState) -> Role {
        let color = signal.color;
        if !state.has_header && color == Some(self.sentinel_color) {
            return Role::Sentinel;
        }
        if state.title_open {
            return Role::Title;
        }
        if let Some(role) = Self::article_heading(&signal.text) {
            return role;
        }
        if !state.has_header || !state.has_subheader {
            return Role::Skip;
        }
        match color {
            Some(c) if c == self.sentinel_color => Role::Body(BodyKind::FinalTextDate),
            Some(c) if c == self.original_text_color => Role::Body(BodyKind::OriginalText),
            _ => Role::Body(BodyKind::FinalText),
        }
    }
}

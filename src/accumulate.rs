use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::classify::{BodyKind, ParseState, Role};
use crate::metadata::{self, DMY};
use crate::model::DocType;
use crate::signal::StyleSignal;

/// Boilerplate line that opens a gray original-text block.
const ORIGINAL_TEXT_PREFIX: &str = "النص الاصلى للمادة\n";

static FINAL_TEXT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+(?P<final_text_date>[\d/-]+)").expect("valid final text date pattern")
});

/// Top-level section key: the header's text, or its number for numbered
/// fatwa headers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKey {
    Number(u32),
    Label(String),
}

impl SectionKey {
    pub fn label(text: impl Into<String>) -> Self {
        SectionKey::Label(text.into())
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::Number(n) => write!(f, "{n}"),
            SectionKey::Label(s) => f.write_str(s),
        }
    }
}

/// Statute article key; repeated ("مكرر") articles share a number with the
/// plain article and render as `5_repeated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleKey {
    pub number: u32,
    pub repeated: bool,
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeated {
            write!(f, "{}_repeated", self.number)
        } else {
            write!(f, "{}", self.number)
        }
    }
}

impl Serialize for ArticleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Article {
    pub number: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_text_date: Option<String>,
}

impl Article {
    pub fn new(key: ArticleKey) -> Self {
        Article {
            number: key.number,
            repeated: key.repeated,
            ..Article::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionValue {
    Text(String),
    Numbered(BTreeMap<u32, String>),
    Articles(BTreeMap<ArticleKey, Article>),
}

impl SectionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SectionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_numbered(&self) -> Option<&BTreeMap<u32, String>> {
        match self {
            SectionValue::Numbered(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_articles(&self) -> Option<&BTreeMap<ArticleKey, Article>> {
        match self {
            SectionValue::Articles(m) => Some(m),
            _ => None,
        }
    }
}

/// Header → body mapping in first-insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionTree {
    entries: Vec<(SectionKey, SectionValue)>,
}

impl SectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SectionKey) -> Option<&SectionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &SectionKey) -> Option<&mut SectionValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Replace the value under `key`, keeping its position if it already exists.
    pub fn insert(&mut self, key: SectionKey, value: SectionValue) -> Option<SectionValue> {
        if let Some(idx) = self.entries.iter().position(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &SectionKey) -> Option<SectionValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, key: &SectionKey) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SectionKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionKey, &SectionValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for SectionTree {
    type Item = (SectionKey, SectionValue);
    type IntoIter = std::vec::IntoIter<(SectionKey, SectionValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(SectionKey, SectionValue)> for SectionTree {
    fn from_iter<I: IntoIterator<Item = (SectionKey, SectionValue)>>(iter: I) -> Self {
        let mut tree = SectionTree::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Subheader {
    Number(u32),
    Article(ArticleKey),
}

/// State machine fed one classified paragraph at a time.
#[derive(Debug)]
pub struct SectionAccumulator {
    doc_type: DocType,
    title: String,
    title_open: bool,
    current_header: Option<SectionKey>,
    current_subheader: Option<Subheader>,
    tree: SectionTree,
}

impl SectionAccumulator {
    pub fn new(doc_type: DocType) -> Self {
        SectionAccumulator {
            doc_type,
            title: String::new(),
            title_open: true,
            current_header: None,
            current_subheader: None,
            tree: SectionTree::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        ParseState {
            has_header: self.current_header.is_some(),
            has_subheader: self.current_subheader.is_some(),
            title_open: self.title_open,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tree(&self) -> &SectionTree {
        &self.tree
    }

    pub fn finish(self) -> (String, SectionTree) {
        (self.title, self.tree)
    }

    /// Judgment headers open as an empty mapping that subheaders fill;
    /// other types open as empty text.
    fn empty_section(&self) -> SectionValue {
        match self.doc_type {
            DocType::Judgment => SectionValue::Numbered(BTreeMap::new()),
            DocType::Fatwa | DocType::Law => SectionValue::Text(String::new()),
        }
    }

    pub fn apply(&mut self, role: Role, signal: &StyleSignal) {
        match role {
            Role::Title => join_space(&mut self.title, &signal.text),
            Role::Sentinel => {
                if self.title_open {
                    log::debug!("title closed at sentinel paragraph {:?}", signal.text);
                }
                self.title_open = false;
            }
            Role::Header(key) => {
                let value = self.empty_section();
                self.tree.insert(key.clone(), value);
                self.current_header = Some(key);
                self.current_subheader = None;
            }
            Role::Subheader(number) => self.open_subheader(number, signal),
            Role::Article { header, key } => {
                let header = SectionKey::label(header);
                match self.tree.get_mut(&header) {
                    Some(SectionValue::Articles(articles)) => {
                        articles.insert(key, Article::new(key));
                    }
                    _ => {
                        let articles = BTreeMap::from([(key, Article::new(key))]);
                        self.tree
                            .insert(header.clone(), SectionValue::Articles(articles));
                    }
                }
                self.current_header = Some(header);
                self.current_subheader = Some(Subheader::Article(key));
            }
            Role::Body(kind) => self.append_body(kind, signal),
            Role::Skip => log::debug!("skipping paragraph {:?}", signal.text),
        }
    }

    fn open_subheader(&mut self, number: u32, signal: &StyleSignal) {
        let Some(header) = &self.current_header else {
            log::debug!("subheader {number} has no header, dropping {:?}", signal.text);
            return;
        };
        let Some(value) = self.tree.get_mut(header) else {
            return;
        };
        match value {
            SectionValue::Numbered(map) => {
                map.insert(number, String::new());
            }
            SectionValue::Text(text) if !text.is_empty() => {
                // Header already holds running text; keep it and treat the line as body.
                join_space(text, &signal.text);
                return;
            }
            SectionValue::Text(_) => {
                *value = SectionValue::Numbered(BTreeMap::from([(number, String::new())]));
            }
            SectionValue::Articles(_) => return,
        }
        self.current_subheader = Some(Subheader::Number(number));
    }

    fn append_body(&mut self, kind: BodyKind, signal: &StyleSignal) {
        let Some(header) = &self.current_header else {
            log::debug!("no open header, dropping body {:?}", signal.text);
            return;
        };
        let Some(value) = self.tree.get_mut(header) else {
            return;
        };

        // A judgment header with no subheader takes running text.
        if matches!(kind, BodyKind::Text)
            && self.current_subheader.is_none()
            && matches!(value, SectionValue::Numbered(map) if map.is_empty())
        {
            *value = SectionValue::Text(signal.text.clone());
            return;
        }

        match (kind, self.current_subheader) {
            (BodyKind::Text, subheader) => match (value, subheader) {
                (SectionValue::Text(text), _) => join_space(text, &signal.text),
                (SectionValue::Numbered(map), Some(Subheader::Number(n))) => {
                    if let Some(text) = map.get_mut(&n) {
                        join_space(text, &signal.text);
                    }
                }
                _ => log::debug!("body does not fit open section, dropping {:?}", signal.text),
            },
            (kind, Some(Subheader::Article(key))) => {
                if let SectionValue::Articles(articles) = value
                    && let Some(article) = articles.get_mut(&key)
                {
                    append_article(article, kind, &signal.text);
                }
            }
            _ => log::debug!("body does not fit open section, dropping {:?}", signal.text),
        }
    }
}

fn join_space(buf: &mut String, text: &str) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(text);
}

fn join_trimmed(slot: &mut Option<String>, text: &str) {
    let joined = format!("{} {text}", slot.as_deref().unwrap_or_default());
    *slot = Some(joined.trim().to_string());
}

fn append_article(article: &mut Article, kind: BodyKind, text: &str) {
    match kind {
        BodyKind::FinalTextDate => {
            if let Some(token) = final_text_date_token(text) {
                article.final_text_date = metadata::normalize_date_iso(token, DMY);
                if article.final_text_date.is_none() {
                    log::debug!("article {}: unparsable final text date {token:?}", article.number);
                }
            }
        }
        BodyKind::OriginalText => {
            let content = text.replace(ORIGINAL_TEXT_PREFIX, "");
            if !content.is_empty() {
                join_trimmed(&mut article.original_text, &content);
            }
        }
        BodyKind::FinalText | BodyKind::Text => {
            if !text.is_empty() {
                join_trimmed(&mut article.final_text, text);
            }
        }
    }
}

fn final_text_date_token(text: &str) -> Option<&str> {
    FINAL_TEXT_DATE
        .captures(text)
        .and_then(|caps| caps.name("final_text_date"))
        .map(|m| m.as_str())
}

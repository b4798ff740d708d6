use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    /// Text of every run, hyperlinks included.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Runs that are direct children of the paragraph.
    pub fn direct_runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(|r| !r.in_hyperlink)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub text: String,
    pub font_size: Option<u32>, // half-points, direct formatting only
    pub color: Option<Rgb>,     // None = automatic
    pub in_hyperlink: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            font_size: None,
            color: None,
            in_hyperlink: false,
        }
    }
}

/// Document family; selects classifier rules, metadata patterns and label table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Judgment,
    Fatwa,
    Law,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Judgment => "judgment",
            DocType::Fatwa => "fatwa",
            DocType::Law => "law",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "judgment" => Ok(DocType::Judgment),
            "fatwa" => Ok(DocType::Fatwa),
            "law" => Ok(DocType::Law),
            other => Err(Error::UnknownDocType(other.to_string())),
        }
    }
}

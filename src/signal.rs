use crate::model::{Alignment, Paragraph, Rgb};

/// The part of a paragraph that the classifiers look at.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSignal {
    pub text: String,
    pub alignment: Option<Alignment>,
    pub size: Option<u32>,
    pub color: Option<Rgb>,
}

impl StyleSignal {
    /// Returns `None` for paragraphs without direct runs or with blank text.
    /// Style is read from the first direct run; hyperlink runs only add text.
    pub fn from_paragraph(paragraph: &Paragraph) -> Option<Self> {
        let first = paragraph.direct_runs().next()?;
        let text = paragraph.text();
        if text.trim().is_empty() {
            return None;
        }
        Some(StyleSignal {
            text,
            alignment: paragraph.alignment,
            size: first.font_size,
            color: first.color,
        })
    }

    pub fn is_centered(&self) -> bool {
        self.alignment == Some(Alignment::Center)
    }
}

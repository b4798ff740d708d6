use crate::model::Rgb;

/// Styling constants that mark structure in the source documents.
///
/// Sizes are in half-points, the unit DOCX stores in `w:sz`.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    pub header_size: u32,
    pub subheader_size: u32,
    /// First paragraph in this color ends a statute's title.
    pub sentinel_color: Rgb,
    /// Statute paragraphs in this color hold an article's original text.
    pub original_text_color: Rgb,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            header_size: 28,    // 14pt
            subheader_size: 24, // 12pt
            sentinel_color: Rgb::BLUE,
            original_text_color: Rgb::GRAY,
        }
    }
}

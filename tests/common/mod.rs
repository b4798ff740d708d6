#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use legal_docx::{Alignment, Paragraph, Rgb, Run};
use zip::write::SimpleFileOptions;

pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const GRAY: Rgb = Rgb(128, 128, 128);

pub fn para(text: &str, alignment: Option<Alignment>, size: Option<u32>, color: Option<Rgb>) -> Paragraph {
    Paragraph {
        runs: vec![Run {
            text: text.to_string(),
            font_size: size,
            color,
            in_hyperlink: false,
        }],
        alignment,
    }
}

pub fn centered(text: &str) -> Paragraph {
    para(text, Some(Alignment::Center), None, None)
}

pub fn sized(text: &str, size: u32) -> Paragraph {
    para(text, Some(Alignment::Right), Some(size), None)
}

pub fn body(text: &str) -> Paragraph {
    para(text, Some(Alignment::Justify), Some(22), None)
}

pub fn colored(text: &str, color: Rgb) -> Paragraph {
    para(text, Some(Alignment::Right), None, Some(color))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `w:p` element for a single-run paragraph.
pub fn xml_paragraph(text: &str, jc: Option<&str>, sz: Option<u32>, color: Option<&str>) -> String {
    let ppr = jc
        .map(|v| format!(r#"<w:pPr><w:jc w:val="{v}"/></w:pPr>"#))
        .unwrap_or_default();
    let mut rpr = String::new();
    if let Some(c) = color {
        rpr.push_str(&format!(r#"<w:color w:val="{c}"/>"#));
    }
    if let Some(s) = sz {
        rpr.push_str(&format!(r#"<w:sz w:val="{s}"/>"#));
    }
    if !rpr.is_empty() {
        rpr = format!("<w:rPr>{rpr}</w:rPr>");
    }
    format!(
        r#"<w:p>{ppr}<w:r>{rpr}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

/// Minimal DOCX archive holding `document.xml` and, optionally, `styles.xml`.
pub fn docx_bytes(document: &str, styles: Option<&str>) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    if let Some(styles) = styles {
        zip.start_file("word/styles.xml", options).unwrap();
        zip.write_all(styles.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn write_docx(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), docx_bytes(&document_xml(body), None)).unwrap();
}

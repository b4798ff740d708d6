use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{Alignment, Paragraph, Rgb, Run};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn parse_hex_color(val: &str) -> Option<Rgb> {
    if val == "auto" || val.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&val[0..2], 16).ok()?;
    let g = u8::from_str_radix(&val[2..4], 16).ok()?;
    let b = u8::from_str_radix(&val[4..6], 16).ok()?;
    Some(Rgb(r, g, b))
}

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

fn parse_alignment(val: &str) -> Option<Alignment> {
    match val {
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "left" | "start" => Some(Alignment::Left),
        "both" | "distribute" => Some(Alignment::Justify),
        _ => None,
    }
}

/// Read every body-level paragraph of the DOCX at `path`, in document order.
pub fn read_paragraphs(path: &Path) -> Result<Vec<Paragraph>, Error> {
    let file = std::fs::File::open(path)?;
    read_archive(zip::ZipArchive::new(file)?)
}

pub fn read_paragraphs_from_bytes(bytes: &[u8]) -> Result<Vec<Paragraph>, Error> {
    read_archive(zip::ZipArchive::new(Cursor::new(bytes))?)
}

fn read_archive<R: Read + Seek>(mut zip: zip::ZipArchive<R>) -> Result<Vec<Paragraph>, Error> {
    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();

    let body = wml(root, "body").ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let paragraphs = body
        .children()
        .filter(|n| is_wml(*n, "p"))
        .map(parse_paragraph)
        .collect();

    Ok(paragraphs)
}

/// Alignment comes from the paragraph's own `w:jc` only. Runs inside
/// `w:hyperlink` are kept for their text and flagged so they never set style.
fn parse_paragraph(node: roxmltree::Node) -> Paragraph {
    let alignment = wml(node, "pPr")
        .and_then(|ppr| wml_attr(ppr, "jc"))
        .and_then(parse_alignment);

    let mut runs = Vec::new();
    for child in node.children() {
        if is_wml(child, "r") {
            runs.push(parse_run(child, false));
        } else if is_wml(child, "hyperlink") {
            runs.extend(
                child
                    .children()
                    .filter(|n| is_wml(*n, "r"))
                    .map(|n| parse_run(n, true)),
            );
        }
    }

    Paragraph { runs, alignment }
}

fn parse_run(run_node: roxmltree::Node, in_hyperlink: bool) -> Run {
    let rpr = wml(run_node, "rPr");

    let font_size = rpr
        .and_then(|n| wml_attr(n, "sz"))
        .and_then(|v| v.parse::<u32>().ok());

    let color = rpr
        .and_then(|n| wml_attr(n, "color"))
        .and_then(parse_hex_color);

    let mut text = String::new();
    for child in run_node.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" if child.attribute((WML_NS, "type")).is_none_or(|t| t == "textWrapping") => {
                text.push('\n')
            }
            "cr" => text.push('\n'),
            _ => {}
        }
    }

    Run {
        text,
        font_size,
        color,
        in_hyperlink,
    }
}

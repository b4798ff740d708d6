mod common;

use common::*;
use legal_docx::{
    Alignment, DocType, Error, Rgb, SectionValue, StyleConfig, parse_directory, parse_file,
    read_paragraphs, read_paragraphs_from_bytes,
};

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Title"><w:pPr><w:jc w:val="center"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="Subtitle"><w:basedOn w:val="Title"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:pPr><w:jc w:val="center"/></w:pPr></w:style>
</w:styles>"#;

#[test]
fn reads_alignment_size_and_color() {
    let body = [
        xml_paragraph("عنوان", Some("center"), Some(32), None),
        xml_paragraph("الوقائع", Some("right"), Some(28), Some("auto")),
        xml_paragraph("نص", Some("both"), None, Some("808080")),
        xml_paragraph("   ", None, Some(28), None),
        "<w:p/>".to_string(),
    ]
    .concat();
    let paragraphs = read_paragraphs_from_bytes(&docx_bytes(&document_xml(&body), None)).unwrap();

    assert_eq!(paragraphs.len(), 5);
    assert_eq!(paragraphs[0].alignment, Some(Alignment::Center));
    assert_eq!(paragraphs[0].runs[0].font_size, Some(32));
    assert_eq!(paragraphs[1].alignment, Some(Alignment::Right));
    assert_eq!(paragraphs[1].runs[0].color, None);
    assert_eq!(paragraphs[2].alignment, Some(Alignment::Justify));
    assert_eq!(paragraphs[2].runs[0].color, Some(Rgb::GRAY));
    assert_eq!(paragraphs[2].text(), "نص");
    assert_eq!(paragraphs[3].alignment, None);
    assert!(paragraphs[4].runs.is_empty());
}

#[test]
fn style_alignment_is_not_inherited() {
    let body = concat!(
        r#"<w:p><w:pPr><w:pStyle w:val="Subtitle"/></w:pPr><w:r><w:t>أ</w:t></w:r></w:p>"#,
        r#"<w:p><w:pPr><w:pStyle w:val="Title"/><w:jc w:val="left"/></w:pPr><w:r><w:t>ب</w:t></w:r></w:p>"#,
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>ج</w:t></w:r></w:p>"#,
    );
    let bytes = docx_bytes(&document_xml(body), Some(STYLES));
    let paragraphs = read_paragraphs_from_bytes(&bytes).unwrap();
    let alignments: Vec<_> = paragraphs.iter().map(|p| p.alignment).collect();
    assert_eq!(alignments, [None, Some(Alignment::Left), None]);
}

#[test]
fn header_in_centered_heading_style_keeps_its_section() {
    let body = [
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:sz w:val="28"/></w:rPr><w:t>الوقائع</w:t></w:r></w:p>"#.to_string(),
        xml_paragraph("نص الوقائع", None, Some(22), None),
    ]
    .concat();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("x.docx"),
        docx_bytes(&document_xml(&body), Some(STYLES)),
    )
    .unwrap();

    let record = parse_file(&dir.path().join("x.docx"), DocType::Judgment, &StyleConfig::default()).unwrap();
    assert_eq!(
        record.section("facts").and_then(SectionValue::as_text),
        Some("نص الوقائع")
    );
    assert!(record.metadata().is_empty());
}

#[test]
fn run_text_breaks_tabs_and_hyperlinks() {
    let body = concat!(
        r#"<w:p><w:r><w:rPr><w:color w:val="808080"/></w:rPr><w:t>النص الاصلى للمادة</w:t><w:br/><w:t>نص</w:t><w:tab/><w:t>قديم</w:t></w:r>"#,
        r#"<w:hyperlink><w:r><w:t> رابط</w:t></w:r></w:hyperlink></w:p>"#,
        r#"<w:p><w:r><w:t>قبل</w:t><w:br w:type="page"/><w:t>بعد</w:t></w:r></w:p>"#,
    );
    let paragraphs = read_paragraphs_from_bytes(&docx_bytes(&document_xml(body), None)).unwrap();
    assert_eq!(paragraphs[0].runs.len(), 2);
    assert_eq!(paragraphs[0].direct_runs().count(), 1);
    assert_eq!(paragraphs[0].text(), "النص الاصلى للمادة\nنص\tقديم رابط");
    assert_eq!(paragraphs[1].text(), "قبلبعد");
}

#[test]
fn leading_hyperlink_does_not_set_style() {
    let body = concat!(
        r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr>"#,
        r#"<w:hyperlink w:anchor="m1"><w:r><w:rPr><w:color w:val="0000FF"/><w:sz w:val="22"/></w:rPr><w:t>المبادئ</w:t></w:r></w:hyperlink>"#,
        r#"<w:r><w:rPr><w:sz w:val="28"/></w:rPr><w:t xml:space="preserve"> القانونية</w:t></w:r></w:p>"#,
    );
    let paragraphs = read_paragraphs_from_bytes(&docx_bytes(&document_xml(body), None)).unwrap();
    let signal = legal_docx::StyleSignal::from_paragraph(&paragraphs[0]).unwrap();
    assert_eq!(signal.text, "المبادئ القانونية");
    assert_eq!(signal.size, Some(28));
    assert_eq!(signal.color, None);

    let roles = legal_docx::classify_paragraphs(&paragraphs, DocType::Judgment, &StyleConfig::default());
    assert!(matches!(roles[0].1, legal_docx::Role::Header(_)));
}

#[test]
fn empty_first_run_still_sets_style() {
    let body = concat!(
        r#"<w:p><w:r><w:rPr><w:sz w:val="28"/></w:rPr></w:r>"#,
        r#"<w:r><w:rPr><w:sz w:val="22"/></w:rPr><w:t>الحيثيات</w:t></w:r></w:p>"#,
    );
    let paragraphs = read_paragraphs_from_bytes(&docx_bytes(&document_xml(body), None)).unwrap();
    let signal = legal_docx::StyleSignal::from_paragraph(&paragraphs[0]).unwrap();
    assert_eq!(signal.size, Some(28));
    assert_eq!(signal.text, "الحيثيات");
}

#[test]
fn law_file_end_to_end() {
    let body = [
        xml_paragraph("قانون - رقم 10 لسنة 2004", Some("right"), None, None),
        xml_paragraph("نص القانون", Some("right"), None, Some("0000FF")),
        xml_paragraph("المادة 3", Some("right"), None, None),
        concat!(
            r#"<w:p><w:r><w:rPr><w:color w:val="808080"/></w:rPr>"#,
            r#"<w:t>النص الاصلى للمادة</w:t><w:br/><w:t>نص أصلي</w:t></w:r></w:p>"#,
        )
        .to_string(),
        xml_paragraph("نص نافذ", Some("right"), None, None),
        xml_paragraph("تاريخ 01/02/2020", Some("right"), None, Some("0000FF")),
    ]
    .concat();

    let dir = tempfile::tempdir().unwrap();
    write_docx(dir.path(), "law-10.docx", &body);

    let record = parse_file(&dir.path().join("law-10.docx"), DocType::Law, &StyleConfig::default()).unwrap();
    assert_eq!(record.file_name, "law-10.docx");
    assert_eq!(record.field("law_number"), Some("10"));

    let articles = record
        .section("articles")
        .and_then(SectionValue::as_articles)
        .expect("articles");
    let article = articles.values().next().unwrap();
    assert_eq!(article.number, 3);
    assert_eq!(article.original_text.as_deref(), Some("نص أصلي"));
    assert_eq!(article.final_text.as_deref(), Some("نص نافذ"));
    assert_eq!(article.final_text_date.as_deref(), Some("2020-02-01"));
}

#[test]
fn directory_batch_skips_lock_files_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let judgment = [
        xml_paragraph("الطعن رقم 55 لسنة 80", Some("center"), None, None),
        xml_paragraph("الوقائع", Some("right"), Some(28), None),
        xml_paragraph("نص الوقائع", Some("both"), Some(22), None),
    ]
    .concat();
    write_docx(dir.path(), "b.docx", &judgment);
    write_docx(dir.path(), "a.docx", &judgment);
    write_docx(dir.path(), "~$a.docx", &judgment);
    std::fs::write(dir.path().join("notes.txt"), "ليس مستندا").unwrap();
    std::fs::write(dir.path().join("broken.docx"), b"not a zip archive").unwrap();
    std::fs::create_dir(dir.path().join("nested.docx")).unwrap();

    let outcome = parse_directory(dir.path(), DocType::Judgment, &StyleConfig::default()).unwrap();

    let names: Vec<&str> = outcome.records.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, ["a.docx", "b.docx"]);
    for record in &outcome.records {
        assert_eq!(record.field("appeal_number"), Some("55"));
        assert_eq!(
            record.section("facts").and_then(SectionValue::as_text),
            Some("نص الوقائع")
        );
    }

    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].0.ends_with("broken.docx"));
    assert!(matches!(outcome.failures[0].1, Error::Zip(_)));
}

#[test]
fn input_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();

    let missing = read_paragraphs(&dir.path().join("missing.docx"));
    assert!(matches!(missing, Err(Error::Io(_))));

    let no_document = docx_bytes("", None);
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    let without_body = zip.finish().unwrap().into_inner();
    assert!(matches!(
        read_paragraphs_from_bytes(&without_body),
        Err(Error::InvalidDocx(_))
    ));
    assert!(matches!(read_paragraphs_from_bytes(&no_document), Err(Error::Xml(_))));

    let no_body = docx_bytes(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
        None,
    );
    assert!(matches!(
        read_paragraphs_from_bytes(&no_body),
        Err(Error::InvalidDocx(_))
    ));

    assert!(matches!(
        parse_directory(&dir.path().join("absent"), DocType::Fatwa, &StyleConfig::default()),
        Err(Error::Io(_))
    ));
}

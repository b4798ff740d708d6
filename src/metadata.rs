//! Title metadata: ordered named-capture patterns per document type, plus the
//! numeric and date helpers the rest of the pipeline shares.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::DocType;

/// Source date layout for every date the documents carry (day/month/year).
pub const DMY: &str = "%d/%m/%Y";

type PatternSet = Vec<(&'static str, Regex)>;

fn compile(patterns: &[(&'static str, &str)]) -> PatternSet {
    patterns
        .iter()
        .map(|&(key, pattern)| (key, Regex::new(pattern).expect("valid metadata pattern")))
        .collect()
}

static JUDGMENT_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    compile(&[
        (
            "court_name",
            r"جمهورية\s*مصر\s*العربية\s*-\s*(?P<court_name>.+?)\s*-\s*(?P<chamber_type>\w+)",
        ),
        ("chamber_type", r"محكمة\s*النقض\s+-\s+(?P<chamber_type>\w+)"),
        ("appeal_number", r"الطعن\s+رقم\s+(?P<appeal_number>\d+)"),
        ("judicial_year", r"ل\s*سنة\s+(?P<judicial_year>\d+)"),
        ("hearing_date", r"تاريخ\s+الجلسة\s*:?\s*(?P<hearing_date>[\d\s/]+)"),
        ("volume_number", r"مكتب\s+فني\s+(?P<volume_number>\d+)"),
        ("part_number", r"رقم\s+الجزء\s+(?P<part_number>\d+)"),
        ("page_number", r"رقم\s+الصفحة\s+(?P<page_number>\d+)"),
        ("rule_number", r"القاعدة\s+رقم\s+(?P<rule_number>\d+)"),
        ("reference_number", r"الرقم\s+المرجعي\s*:\s*(?P<reference_number>\d+)"),
    ])
});

static FATWA_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    compile(&[
        ("fatwa_number", r"\s+الفتوى\s+رقم\s+(?P<fatwa_number>\d+)"),
        ("file_number", r"\s+رقم\s+الملف\s+(?P<file_number>[\d/-]+)"),
        ("fatwa_date", r"\s+?بتاريخ\s+(?P<fatwa_date>[\d/-]+)"),
        ("hearing_date", r"\s+تاريخ\s+الجلسة\s+(?P<hearing_date>[\d/-]+)"),
    ])
});

static LAW_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    compile(&[
        ("law_number", r"قانون\s+-\s+رقم\s+(?P<law_number>\d+)"),
        ("issue_date", r"الصادر\s+بتاريخ\s+(?P<issue_date>[\d-]+)"),
        ("publish_date", r"نشر\s+بتاريخ\s+(?P<publish_date>[\d-]+)"),
        ("effective_date", r"يعمل\s+به\s+اعتبارا\s+من\s+(?P<effective_date>[\d-]+)"),
        ("subject", r"بشأن\s+(?P<subject>.+?)\s+الجريدة\s+الرسمية"),
        ("gazette", r"الجريدة\s+الرسمية\s+(?P<gazette>.+)"),
    ])
});

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number pattern"));

fn patterns(doc_type: DocType) -> &'static PatternSet {
    match doc_type {
        DocType::Judgment => &JUDGMENT_PATTERNS,
        DocType::Fatwa => &FATWA_PATTERNS,
        DocType::Law => &LAW_PATTERNS,
    }
}

/// Search `title` once per pattern, in declaration order. Keys whose pattern
/// does not match are left out.
pub fn extract(doc_type: DocType, title: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for (key, pattern) in patterns(doc_type) {
        let Some(value) = pattern
            .captures(title)
            .and_then(|caps| caps.name(key))
            .map(|m| m.as_str().to_string())
        else {
            continue;
        };

        if doc_type == DocType::Judgment && *key == "hearing_date" {
            let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            match normalize_date_iso(&compact, DMY) {
                Some(date) => fields.push((key.to_string(), date)),
                None => log::debug!("dropping unparsable hearing date {value:?}"),
            }
            continue;
        }

        fields.push((key.to_string(), value));
    }
    fields
}

/// Map Arabic-Indic and Extended Arabic-Indic digits to ASCII.
pub fn fold_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            _ => c,
        })
        .collect()
}

/// Parse a run of decimal digits in any script `regex`'s `\d` accepts.
pub fn parse_number(digits: &str) -> Option<u32> {
    fold_digits(digits).parse().ok()
}

/// First integer appearing anywhere in `text`.
pub fn extract_numeric(text: &str) -> Option<u32> {
    FIRST_NUMBER
        .find(text)
        .and_then(|m| parse_number(m.as_str()))
}

/// Parse `value` strictly against `format` and render it as `YYYY-MM-DD`.
pub fn normalize_date_iso(value: &str, format: &str) -> Option<String> {
    let value = fold_digits(value.trim());
    NaiveDate::parse_from_str(&value, format)
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

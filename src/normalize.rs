use std::collections::BTreeMap;

use crate::accumulate::{SectionKey, SectionTree, SectionValue};
use crate::model::DocType;

const JUDGMENT_LABELS: &[(&str, &str)] = &[
    ("الهيئة", "authority"),
    ("المبادئ القانونية", "principles"),
    ("الوقائع", "facts"),
    ("الحيثيات", "reasons"),
];

const FATWA_LABELS: &[(&str, &str)] = &[
    ("الجهة", "authority"),
    ("موضوع الفتوى", "topic"),
    ("الوقائع", "facts"),
    ("التطبيق", "application"),
    ("الرأى", "opinion"),
];

pub const PRINCIPLES: &str = "principles";

fn labels(doc_type: DocType) -> &'static [(&'static str, &'static str)] {
    match doc_type {
        DocType::Judgment => JUDGMENT_LABELS,
        DocType::Fatwa => FATWA_LABELS,
        // Statute headers come out of the classifier already canonical.
        DocType::Law => &[],
    }
}

/// Canonical key for a localized header label, if the table knows it.
pub fn canonical_label(doc_type: DocType, label: &str) -> Option<&'static str> {
    let label = label.trim();
    labels(doc_type)
        .iter()
        .find(|(localized, _)| *localized == label)
        .map(|(_, canonical)| *canonical)
}

pub fn normalize(doc_type: DocType, tree: SectionTree) -> SectionTree {
    let mut mapped = SectionTree::new();
    for (key, value) in tree {
        let key = match key {
            SectionKey::Label(label) => match canonical_label(doc_type, &label) {
                Some(canonical) => SectionKey::label(canonical),
                None => SectionKey::Label(label),
            },
            number => number,
        };
        mapped.insert(key, value);
    }

    if doc_type == DocType::Fatwa {
        group_principles(mapped)
    } else {
        mapped
    }
}

/// Move numbered fatwa headers under a single `principles` mapping.
fn group_principles(tree: SectionTree) -> SectionTree {
    let mut principles = BTreeMap::new();
    let mut rest = SectionTree::new();
    for (key, value) in tree {
        match (key, value) {
            (SectionKey::Number(n), SectionValue::Text(text)) => {
                principles.insert(n, text);
            }
            (key, value) => {
                rest.insert(key, value);
            }
        }
    }
    if !principles.is_empty() {
        rest.insert(SectionKey::label(PRINCIPLES), SectionValue::Numbered(principles));
    }
    rest
}

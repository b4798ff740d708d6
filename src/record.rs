use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::accumulate::{SectionKey, SectionTree, SectionValue};
use crate::error::Error;
use crate::model::DocType;

const RESERVED_KEYS: &[&str] = &["doc_type", "file_name"];

/// One parsed document, ready for the persistence layer.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentRecord {
    pub doc_type: DocType,
    pub file_name: String,
    metadata: Vec<(String, String)>,
    sections: SectionTree,
}

impl DocumentRecord {
    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn sections(&self) -> &SectionTree {
        &self.sections
    }

    pub fn section(&self, key: &str) -> Option<&SectionValue> {
        self.sections.get(&SectionKey::label(key))
    }

    pub fn to_json(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Merge identity, title metadata and sections. Identity keys are never
/// replaced; a section whose key matches a metadata field replaces it.
pub fn assemble(
    doc_type: DocType,
    file_name: &str,
    metadata: Vec<(String, String)>,
    sections: SectionTree,
) -> DocumentRecord {
    let sections: SectionTree = sections
        .into_iter()
        .filter(|(key, _)| {
            let reserved = matches!(key, SectionKey::Label(l) if RESERVED_KEYS.contains(&l.as_str()));
            if reserved {
                log::warn!("{file_name}: ignoring section named {key}, the key is reserved");
            }
            !reserved
        })
        .collect();

    let metadata = metadata
        .into_iter()
        .filter(|(key, _)| {
            let shadowed = sections.contains_key(&SectionKey::label(key.as_str()));
            if shadowed {
                log::warn!("{file_name}: section {key} overrides the title field of the same name");
            }
            !shadowed
        })
        .collect();

    DocumentRecord {
        doc_type,
        file_name: file_name.to_string(),
        metadata,
        sections,
    }
}

impl Serialize for DocumentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map =
            serializer.serialize_map(Some(2 + self.metadata.len() + self.sections.len()))?;
        map.serialize_entry("doc_type", &self.doc_type)?;
        map.serialize_entry("file_name", &self.file_name)?;
        for (key, value) in &self.metadata {
            map.serialize_entry(key, value)?;
        }
        for (key, value) in self.sections.iter() {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_override_metadata_but_not_identity() {
        let metadata = vec![
            ("hearing_date".to_string(), "2021-03-05".to_string()),
            ("authority".to_string(), "from title".to_string()),
        ];
        let sections: SectionTree = [
            (SectionKey::label("authority"), SectionValue::Text("from body".into())),
            (SectionKey::label("doc_type"), SectionValue::Text("bogus".into())),
        ]
        .into_iter()
        .collect();

        let record = assemble(DocType::Judgment, "a.docx", metadata, sections);
        assert_eq!(record.field("authority"), None);
        assert_eq!(record.field("hearing_date"), Some("2021-03-05"));
        assert_eq!(
            record.section("authority").and_then(SectionValue::as_text),
            Some("from body")
        );

        let json = record.to_json().unwrap();
        assert_eq!(json["doc_type"], "judgment");
        assert_eq!(json["file_name"], "a.docx");
        assert_eq!(json["authority"], "from body");
    }
}

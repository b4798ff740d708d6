mod accumulate;
mod batch;
mod classify;
mod config;
mod docx;
mod error;
mod metadata;
mod model;
mod normalize;
mod record;
mod signal;

pub use accumulate::{Article, ArticleKey, SectionAccumulator, SectionKey, SectionTree, SectionValue};
pub use batch::{BatchOutcome, discover, parse_directory};
pub use classify::{BodyKind, ParseState, Role, RoleClassifier};
pub use config::StyleConfig;
pub use docx::{read_paragraphs, read_paragraphs_from_bytes};
pub use error::Error;
pub use metadata::{extract_numeric, normalize_date_iso};
pub use model::{Alignment, DocType, Paragraph, Rgb, Run};
pub use record::DocumentRecord;
pub use signal::StyleSignal;

use std::path::Path;

/// Feed paragraphs through classification and accumulation, reporting each
/// classified paragraph to `on_role`.
fn run_pipeline(
    paragraphs: &[Paragraph],
    doc_type: DocType,
    config: &StyleConfig,
    mut on_role: impl FnMut(&StyleSignal, &Role),
) -> SectionAccumulator {
    let classifier = classify::for_doc_type(doc_type, config);
    let mut acc = SectionAccumulator::new(doc_type);
    for paragraph in paragraphs {
        let Some(signal) = StyleSignal::from_paragraph(paragraph) else {
            continue;
        };
        let role = classifier.classify(&signal, &acc.state());
        on_role(&signal, &role);
        acc.apply(role, &signal);
    }
    acc
}

/// Roles assigned to each non-empty paragraph, in document order.
pub fn classify_paragraphs(
    paragraphs: &[Paragraph],
    doc_type: DocType,
    config: &StyleConfig,
) -> Vec<(StyleSignal, Role)> {
    let mut roles = Vec::new();
    run_pipeline(paragraphs, doc_type, config, |signal, role| {
        roles.push((signal.clone(), role.clone()));
    });
    roles
}

pub fn parse_paragraphs(
    paragraphs: &[Paragraph],
    doc_type: DocType,
    file_name: &str,
    config: &StyleConfig,
) -> DocumentRecord {
    let (title, tree) = run_pipeline(paragraphs, doc_type, config, |_, _| {}).finish();
    let metadata = metadata::extract(doc_type, &title);
    let sections = normalize::normalize(doc_type, tree);
    record::assemble(doc_type, file_name, metadata, sections)
}

pub fn parse_file(path: &Path, doc_type: DocType, config: &StyleConfig) -> Result<DocumentRecord, Error> {
    let paragraphs = docx::read_paragraphs(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_paragraphs(&paragraphs, doc_type, &file_name, config))
}

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::StyleConfig;
use crate::error::Error;
use crate::model::DocType;
use crate::record::DocumentRecord;

const DOCX_EXTENSION: &str = ".docx";
/// Word's owner lock files ("~$name.docx") sit next to open documents.
const LOCK_FILE_PREFIX: &str = "~$";

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<DocumentRecord>,
    pub failures: Vec<(PathBuf, Error)>,
}

fn is_candidate(name: &str) -> bool {
    name.ends_with(DOCX_EXTENSION) && !name.starts_with(LOCK_FILE_PREFIX)
}

/// DOCX files directly inside `dir`, sorted by name.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(is_candidate)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Parse every DOCX in `dir`. Files that cannot be read are reported in
/// `failures` and do not stop the rest of the batch.
pub fn parse_directory(
    dir: &Path,
    doc_type: DocType,
    config: &StyleConfig,
) -> Result<BatchOutcome, Error> {
    let files = discover(dir)?;
    log::info!("parsing {} {doc_type} files from {}", files.len(), dir.display());

    let results: Vec<(PathBuf, Result<DocumentRecord, Error>)> = files
        .into_par_iter()
        .map(|path| {
            let result = crate::parse_file(&path, doc_type, config);
            (path, result)
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for (path, result) in results {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                outcome.failures.push((path, e));
            }
        }
    }
    log::info!(
        "parsed {} records, {} failures",
        outcome.records.len(),
        outcome.failures.len()
    );
    Ok(outcome)
}

//! Record source: reads (unit, chapter, section) rows from a delimited file.

use std::io::Read;
use std::path::Path;

use crate::errors::{ImportError, Result};

/// One row of the syllabus taxonomy.
///
/// Fields map positionally to the first three columns of the input file.
/// A short row pads the missing trailing fields with empty strings; the
/// empty string is a legal name and is stored literally in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecord {
    pub unit: String,
    pub chapter: String,
    pub section: String,
}

impl From<&csv::StringRecord> for SubjectRecord {
    fn from(row: &csv::StringRecord) -> Self {
        Self {
            unit: row.get(0).unwrap_or("").to_string(),
            chapter: row.get(1).unwrap_or("").to_string(),
            section: row.get(2).unwrap_or("").to_string(),
        }
    }
}

/// Read records from `path`.
///
/// The file's first line is a header and is discarded. A missing file is a
/// precondition failure ([`ImportError::MissingInput`]) and is reported
/// before any graph activity begins.
pub fn read_records(path: &Path) -> Result<Vec<SubjectRecord>> {
    if !path.exists() {
        return Err(ImportError::MissingInput(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    read_from(file)
}

/// Read records from any byte source. Rows may carry fewer than three
/// fields; columns past the third are ignored.
pub fn read_from<R: Read>(reader: R) -> Result<Vec<SubjectRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(SubjectRecord::from(&row));
    }
    Ok(records)
}

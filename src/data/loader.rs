use std::path::Path;

use super::model::{StudentDataset, StudentRecord};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the student record set from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "student_id": 1, "name": "...", "class": "A", ... }, ...]`
/// * `.csv`  – header row with the same column names
pub fn load_file(path: &Path) -> Result<StudentDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };

    let dataset = StudentDataset::from_records(records)?;
    if dataset.is_empty() {
        return Err(DataLoadError::Empty);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "student_id": 1,
///     "name": "Ali Jones",
///     "class": "A",
///     "assessment_score": 78.5,
///     "comprehension": 7.1,
///     "attention": 6.4,
///     "focus": 5.9,
///     "retention": 6.8,
///     "engagement_time": 41.0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<StudentRecord>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the JSON key names, one student per row.
/// Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<StudentRecord>, DataLoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<StudentRecord>()
        .map(|row| row.map_err(DataLoadError::from))
        .collect()
}

//! Artist list input and enriched row output.

use std::collections::HashSet;
use std::path::Path;

use crate::records::EnrichedRow;

const ERROR_COLUMN: &str = "error";

/// Cell spellings read as a missing value, matching common data-frame exports.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads the unique, non-null values of `column`, in first-seen order.
pub fn read_artist_names(path: &Path, column: &str) -> Result<Vec<String>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| format!("failed to open {}: {err}", path.display()))?;

    let headers = reader
        .headers()
        .map_err(|err| format!("failed to read header of {}: {err}", path.display()))?;
    let column_index = headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| format!("column '{column}' not found in {}", path.display()))?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| {
            format!(
                "failed to read row {} of {}: {err}",
                row_index + 1,
                path.display()
            )
        })?;
        let Some(name) = record.get(column_index) else {
            continue;
        };
        if NULL_MARKERS.contains(&name) {
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Writes all rows at once. The `error` column is present only if a row carries an error.
pub fn write_rows<R: EnrichedRow>(path: &Path, rows: &[R]) -> Result<(), String> {
    let include_error = rows.iter().any(|row| row.error().is_some());
    let mut writer = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create {}: {err}", path.display()))?;

    let mut header: Vec<&str> = R::COLUMNS.to_vec();
    if include_error {
        header.push(ERROR_COLUMN);
    }
    writer
        .write_record(&header)
        .map_err(|err| format!("failed to write header to {}: {err}", path.display()))?;

    for row in rows {
        let mut cells: Vec<&str> = row
            .values()
            .into_iter()
            .map(|value| value.unwrap_or_default())
            .collect();
        if include_error {
            cells.push(row.error().unwrap_or_default());
        }
        writer
            .write_record(&cells)
            .map_err(|err| format!("failed to write row to {}: {err}", path.display()))?;
    }
    writer
        .flush()
        .map_err(|err| format!("failed to flush {}: {err}", path.display()))
}

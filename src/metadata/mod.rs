//! Name Table
//!
//! Loads the tabular metadata whose rows carry the display names used as
//! resolution keys. The first line of the file is the ordered column
//! header; column 0 is the join key against the record store. Tables are
//! read-only once loaded.

use crate::error::FindError;
use std::fs;
use std::path::Path;

/// Delimiters tried in order when none is configured.
const CANDIDATE_DELIMITERS: &[char] = &['\t', ';', ','];

/// Loaded tabular metadata: an ordered column header plus data rows.
#[derive(Debug, Clone)]
pub struct NameTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl NameTable {
    /// Column whose values link rows to the record store.
    pub fn join_key(&self) -> &str {
        &self.columns[0]
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Join-key values of every row, in file order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row[0].as_str())
    }
}

/// Load a name table from a delimited text file.
///
/// The delimiter is auto-detected from the header line (tab, then
/// semicolon, then comma) unless one is forced. A file whose rows disagree
/// with the header width is rejected rather than silently padded.
pub fn load_name_table(path: &Path, delimiter: Option<char>) -> Result<NameTable, FindError> {
    let content = fs::read_to_string(path).map_err(|err| FindError::MetadataLoad {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().ok_or_else(|| FindError::MetadataLoad {
        path: path.to_path_buf(),
        message: "file is empty".to_string(),
    })?;
    let delimiter = delimiter.or_else(|| detect_delimiter(header));

    let columns = split_line(header, delimiter);
    if columns[0].is_empty() {
        return Err(FindError::MetadataLoad {
            path: path.to_path_buf(),
            message: "join-key column has no name".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (number, line) in lines.enumerate() {
        let cells = split_line(line, delimiter);
        if cells.len() != columns.len() {
            return Err(FindError::MetadataLoad {
                path: path.to_path_buf(),
                message: format!(
                    "row {} has {} cells, header has {} columns",
                    number + 2,
                    cells.len(),
                    columns.len()
                ),
            });
        }
        rows.push(cells);
    }

    Ok(NameTable { columns, rows })
}

fn detect_delimiter(header: &str) -> Option<char> {
    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .find(|d| header.contains(*d))
}

fn split_line(line: &str, delimiter: Option<char>) -> Vec<String> {
    match delimiter {
        Some(d) => line.split(d).map(|cell| cell.trim().to_string()).collect(),
        None => vec![line.trim().to_string()],
    }
}

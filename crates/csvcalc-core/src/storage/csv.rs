//! Delimited-text table loader.
//!
//! Layout: a header line whose first field is empty and whose remaining
//! fields are alphabetic column names, followed by data lines that start with
//! a numeric row label and carry exactly one field per column. Whitespace is
//! stripped from every line before splitting; blank lines are skipped. Any
//! violation rejects the whole table.

use crate::document::{TableStore, first_duplicate};
use crate::error::{CsvCalcError, Result};
use crate::storage::LoadOptions;
use csvcalc_engine::engine::CellAddress;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::sync::OnceLock;
use tracing::debug;

fn column_name_re() -> &'static Regex {
    static COLUMN_RE: OnceLock<Regex> = OnceLock::new();
    COLUMN_RE.get_or_init(|| Regex::new(r"^[A-Za-z]+$").expect("column name regex must compile"))
}

fn row_label_re() -> &'static Regex {
    static ROW_RE: OnceLock<Regex> = OnceLock::new();
    ROW_RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("row label regex must compile"))
}

/// Read a table from delimited text.
pub fn read_table<R: BufRead>(reader: R, options: &LoadOptions) -> Result<TableStore> {
    let delimiter = options.delimiter;
    let mut lines = reader.lines().enumerate();

    let Some((_, header)) = lines.next() else {
        return Err(CsvCalcError::malformed(1, "missing header line"));
    };
    let columns = parse_header(&strip_whitespace(&header?, delimiter), delimiter)?;

    let mut rows: Vec<String> = Vec::new();
    let mut seen_rows: HashSet<String> = HashSet::new();
    let mut cells = HashMap::with_capacity(columns.len());

    for (idx, line) in lines {
        let line_num = idx + 1;
        let line = strip_whitespace(&line?, delimiter);
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(&line, delimiter);
        if fields.len() != columns.len() + 1 {
            return Err(CsvCalcError::malformed(
                line_num,
                format!(
                    "expected {} fields, found {}",
                    columns.len() + 1,
                    fields.len()
                ),
            ));
        }

        let row = fields[0];
        if !row_label_re().is_match(row) {
            return Err(CsvCalcError::malformed(
                line_num,
                format!("bad row '{}' - not a number", row),
            ));
        }
        if !seen_rows.insert(row.to_string()) {
            return Err(CsvCalcError::malformed(
                line_num,
                format!("duplicate row '{}'", row),
            ));
        }

        for (column, value) in columns.iter().zip(&fields[1..]) {
            cells.insert(CellAddress::new(column, row), value.to_string());
        }
        rows.push(row.to_string());
    }

    debug!(columns = columns.len(), rows = rows.len(), "loaded table");
    // Names are unique and every row carried one field per column.
    Ok(TableStore::assemble(columns, rows, cells))
}

fn parse_header(header: &str, delimiter: char) -> Result<Vec<String>> {
    let fields = split_fields(header, delimiter);
    let Some((first, names)) = fields.split_first() else {
        return Err(CsvCalcError::malformed(1, "missing header line"));
    };
    if !first.is_empty() {
        return Err(CsvCalcError::malformed(
            1,
            "header must start with an empty cell",
        ));
    }
    if names.is_empty() {
        return Err(CsvCalcError::malformed(1, "header has no columns"));
    }

    for name in names {
        if name.is_empty() {
            return Err(CsvCalcError::malformed(1, "empty column name"));
        }
        if !column_name_re().is_match(name) {
            return Err(CsvCalcError::malformed(
                1,
                format!("bad column name '{}'", name),
            ));
        }
    }

    let columns: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    if let Some(dup) = first_duplicate(&columns) {
        return Err(CsvCalcError::malformed(
            1,
            format!("duplicate column '{}'", dup),
        ));
    }
    Ok(columns)
}

/// Remove all whitespace from a line, except the delimiter itself.
pub fn strip_whitespace(line: &str, delimiter: char) -> String {
    line.chars()
        .filter(|&c| c == delimiter || !c.is_ascii_whitespace())
        .collect()
}

/// Split a stripped line into fields.
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

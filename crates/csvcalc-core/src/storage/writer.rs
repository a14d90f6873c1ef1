//! Grid rendering.
//!
//! Every cell is rendered independently: a cell that fails to evaluate is
//! written as a placeholder and the rest of the grid still gets printed.

use crate::document::Table;
use crate::error::Result;
use crate::storage::{RenderMode, RenderOptions};
use csvcalc_engine::engine::CellAddress;
use csvcalc_engine::{EvalError, Result as EvalResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::warn;

/// Counts from one rendering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridReport {
    pub rendered: usize,
    pub failed: usize,
}

impl GridReport {
    fn record<T>(&mut self, result: &EvalResult<T>) {
        self.rendered += 1;
        if result.is_err() {
            self.failed += 1;
        }
    }
}

/// Placeholder written in place of a cell that failed.
pub fn error_placeholder(err: &EvalError) -> String {
    format!("#ERR: {}", err)
}

fn cell_text(table: &mut Table, address: &str, mode: RenderMode) -> EvalResult<String> {
    let result = match mode {
        RenderMode::Evaluated => table.evaluate(address),
        RenderMode::Raw => table.raw_at(address).map(str::to_string),
    };
    if let Err(err) = &result {
        warn!(cell = address, error = %err, "cell failed");
    }
    result
}

/// Write the table as delimited text: header line, then one line per row.
pub fn write_grid<W: Write>(
    table: &mut Table,
    out: &mut W,
    options: &RenderOptions,
) -> Result<GridReport> {
    let delimiter = options.delimiter;
    let columns = table.columns().to_vec();
    let rows = table.rows().to_vec();
    let mut report = GridReport::default();

    for column in &columns {
        write!(out, "{}{}", delimiter, column)?;
    }
    writeln!(out)?;

    for row in &rows {
        write!(out, "{}", row)?;
        for column in &columns {
            let addr = CellAddress::new(column, row);
            let result = cell_text(table, addr.as_str(), options.mode);
            report.record(&result);
            match result {
                Ok(value) => write!(out, "{}{}", delimiter, value)?,
                Err(err) => write!(out, "{}{}", delimiter, error_placeholder(&err))?,
            }
        }
        writeln!(out)?;
    }

    Ok(report)
}

/// Result of one cell in a [`GridSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellOutcome {
    Value(String),
    Error(String),
}

/// Serializable view of a whole table.
#[derive(Debug, Clone, Serialize)]
pub struct GridSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<String>,
    pub cells: BTreeMap<CellAddress, CellOutcome>,
    #[serde(skip)]
    pub report: GridReport,
}

/// Evaluate (or read raw) every cell into a snapshot.
pub fn snapshot(table: &mut Table, mode: RenderMode) -> GridSnapshot {
    let addresses: Vec<CellAddress> = table.store().addresses().collect();
    let mut report = GridReport::default();
    let mut cells = BTreeMap::new();

    for addr in addresses {
        let result = cell_text(table, addr.as_str(), mode);
        report.record(&result);
        let outcome = match result {
            Ok(value) => CellOutcome::Value(value),
            Err(err) => CellOutcome::Error(err.to_string()),
        };
        cells.insert(addr, outcome);
    }

    GridSnapshot {
        columns: table.columns().to_vec(),
        rows: table.rows().to_vec(),
        cells,
        report,
    }
}

/// Write the table as pretty-printed JSON.
pub fn write_json<W: Write>(table: &mut Table, out: &mut W, mode: RenderMode) -> Result<GridReport> {
    let snap = snapshot(table, mode);
    serde_json::to_writer_pretty(&mut *out, &snap)?;
    writeln!(out)?;
    Ok(snap.report)
}

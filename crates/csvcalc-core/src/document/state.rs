use crate::error::{CsvCalcError, Result};
use csvcalc_engine::engine::{CellAddress, CellSource, EvalCache};
use csvcalc_engine::{EvalError, Result as EvalResult};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Immutable grid of raw cell text.
///
/// Every `(column, row)` pair has an entry; that is checked once at
/// construction and never changes afterwards.
#[derive(Clone, Debug, Default)]
pub struct TableStore {
    columns: Vec<String>,
    rows: Vec<String>,
    cells: HashMap<CellAddress, String>,
}

impl TableStore {
    /// Assemble a store, rejecting duplicate names and missing cells.
    pub fn from_parts(
        columns: Vec<String>,
        rows: Vec<String>,
        cells: HashMap<CellAddress, String>,
    ) -> Result<Self> {
        if let Some(dup) = first_duplicate(&columns) {
            return Err(CsvCalcError::MalformedTable {
                line: None,
                message: format!("duplicate column '{}'", dup),
            });
        }
        if let Some(dup) = first_duplicate(&rows) {
            return Err(CsvCalcError::MalformedTable {
                line: None,
                message: format!("duplicate row '{}'", dup),
            });
        }

        for row in &rows {
            for column in &columns {
                let addr = CellAddress::new(column, row);
                if !cells.contains_key(&addr) {
                    return Err(CsvCalcError::MalformedTable {
                        line: None,
                        message: format!("missing cell {}", addr),
                    });
                }
            }
        }
        if cells.len() != columns.len() * rows.len() {
            return Err(CsvCalcError::MalformedTable {
                line: None,
                message: "cells outside the column/row grid".to_string(),
            });
        }

        Ok(TableStore::assemble(columns, rows, cells))
    }

    /// Build a store from parts the caller has already validated.
    pub(crate) fn assemble(
        columns: Vec<String>,
        rows: Vec<String>,
        cells: HashMap<CellAddress, String>,
    ) -> Self {
        TableStore {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn raw_at(&self, address: &str) -> EvalResult<&str> {
        self.cells
            .get(address)
            .map(String::as_str)
            .ok_or_else(|| EvalError::UnknownAddress(address.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All addresses in load order: row by row, columns left to right.
    pub fn addresses(&self) -> impl Iterator<Item = CellAddress> + '_ {
        self.rows.iter().flat_map(move |row| {
            self.columns
                .iter()
                .map(move |column| CellAddress::new(column, row))
        })
    }
}

impl CellSource for TableStore {
    fn raw_at(&self, address: &str) -> EvalResult<&str> {
        TableStore::raw_at(self, address)
    }
}

pub(crate) fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}

/// A loaded table together with its evaluation cache.
///
/// The raw cells are shared behind an `Arc` so a table can be turned into a
/// [`super::SharedTable`] without copying them.
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub(crate) store: Arc<TableStore>,
    pub(crate) cache: EvalCache,
}

impl Table {
    pub fn new(store: TableStore) -> Self {
        Table {
            store: Arc::new(store),
            cache: EvalCache::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        self.store.columns()
    }

    pub fn rows(&self) -> &[String] {
        self.store.rows()
    }

    /// Raw (unevaluated) text of a cell.
    pub fn raw_at(&self, address: &str) -> EvalResult<&str> {
        self.store.raw_at(address)
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn cache(&self) -> &EvalCache {
        &self.cache
    }
}

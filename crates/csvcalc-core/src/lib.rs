//! csvcalc-core - Table model, loader and grid rendering.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{SharedTable, Table, TableStore};
pub use error::{CsvCalcError, Result};
pub use storage::{LoadOptions, RenderMode, RenderOptions};

pub use csvcalc_engine::{CellAddress, EvalError};

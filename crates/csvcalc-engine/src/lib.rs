//! csvcalc_engine - Formula evaluation engine for delimited-text tables.

pub mod engine;
pub mod error;

pub use engine::{CellAddress, CellSource, CellState, EvalCache};
pub use error::{EvalError, Result};

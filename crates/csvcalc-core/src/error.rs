//! Error types for csvcalc core.

use csvcalc_engine::EvalError;
use thiserror::Error;

/// Errors that can occur while loading or rendering a table
#[derive(Error, Debug)]
pub enum CsvCalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural problem in the input; the whole table is rejected.
    #[error("malformed table{}: {message}", line_suffix(.line))]
    MalformedTable {
        line: Option<usize>,
        message: String,
    },

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl CsvCalcError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        CsvCalcError::MalformedTable {
            line: Some(line),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvCalcError>;

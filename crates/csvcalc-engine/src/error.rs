//! Error types for formula evaluation.

use thiserror::Error;

/// Errors that can occur while evaluating a cell
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unknown cell: {0}")]
    UnknownAddress(String),

    #[error("loop at cell: {0}")]
    CircularReference(String),

    #[error("bad const {0}")]
    InvalidConstant(String),

    #[error("bad operand {0}")]
    BadOperand(String),

    #[error("bad operation {0}")]
    UnsupportedOperator(char),

    #[error("division by zero")]
    DivisionByZero,

    #[error("bad expression")]
    MalformedExpression,

    /// A formula cell failed; `source` is what went wrong inside it.
    #[error("{source} at {address}")]
    At {
        address: String,
        #[source]
        source: Box<EvalError>,
    },
}

impl EvalError {
    /// Wrap this error with the address of the formula cell that was abandoned.
    pub fn at(self, address: impl Into<String>) -> EvalError {
        EvalError::At {
            address: address.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every address annotation peeled off.
    pub fn root(&self) -> &EvalError {
        let mut current = self;
        while let EvalError::At { source, .. } = current {
            current = source;
        }
        current
    }

    /// Addresses of the formula cells that were abandoned, innermost first.
    pub fn cell_trail(&self) -> Vec<&str> {
        let mut trail = Vec::new();
        let mut current = self;
        while let EvalError::At { address, source } = current {
            trail.push(address.as_str());
            current = source;
        }
        trail.reverse();
        trail
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;

//! Formula evaluation engine.
//!
//! - [`CellAddress`] - Column name + row label keys
//! - [`Tokenizer`] - Formula body → operands and operators
//! - [`Operand`] - Literal vs. cell reference classification
//! - [`ExpressionSolver`] - Single-level precedence arithmetic
//! - [`EvalCache`] - Memoization and circular reference detection
//! - [`format_number`] - Numbers back to cell text

mod address;
mod cache;
mod format;
mod operand;
mod solver;
mod token;

pub use address::CellAddress;
pub use cache::{CellSource, CellState, EvalCache};
pub use format::format_number;
pub use operand::Operand;
pub use solver::{ExpressionSolver, Operator, parse_operand};
pub use token::{Token, Tokenizer, is_operator_candidate};

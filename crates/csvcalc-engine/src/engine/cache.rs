//! Memoizing evaluator with circular reference detection.
//!
//! Each address is Unvisited (absent), [`CellState::InProgress`] or
//! [`CellState::Resolved`]. A formula cell is marked in progress before its
//! operands are resolved, so re-entering it while still in progress proves a
//! cycle (e.g. A1 references B1, B1 references A1). On failure the sentinel is
//! removed again; a resolved entry is never touched since raw cell text does
//! not change after load.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use super::format::format_number;
use super::operand::Operand;
use super::solver::{ExpressionSolver, parse_operand};
use super::token::{Token, Tokenizer};
use crate::error::{EvalError, Result};

/// Read-only access to raw cell text.
pub trait CellSource {
    /// Raw text of the cell at `address`, or [`EvalError::UnknownAddress`].
    fn raw_at(&self, address: &str) -> Result<&str>;
}

impl<K, V> CellSource for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn raw_at(&self, address: &str) -> Result<&str> {
        self.get(address)
            .map(|value| value.as_ref())
            .ok_or_else(|| EvalError::UnknownAddress(address.to_string()))
    }
}

/// Evaluation state of a visited cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    InProgress,
    Resolved(String),
}

#[derive(Clone, Debug, Default)]
pub struct EvalCache {
    states: HashMap<String, CellState>,
}

impl EvalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the cell at `address`, resolving references through `source`.
    pub fn evaluate<S>(&mut self, source: &S, address: &str) -> Result<String>
    where
        S: CellSource + ?Sized,
    {
        match self.states.get(address) {
            Some(CellState::Resolved(value)) => {
                trace!(cell = address, "cache hit");
                return Ok(value.clone());
            }
            Some(CellState::InProgress) => {
                debug!(cell = address, "circular reference detected");
                return Err(EvalError::CircularReference(address.to_string()));
            }
            None => {}
        }

        let raw = source.raw_at(address)?;
        let Some(body) = raw.strip_prefix('=') else {
            if parse_operand(raw).is_err() {
                return Err(EvalError::InvalidConstant(raw.to_string()));
            }
            self.states
                .insert(address.to_string(), CellState::Resolved(raw.to_string()));
            return Ok(raw.to_string());
        };

        self.states
            .insert(address.to_string(), CellState::InProgress);

        match self.evaluate_formula(source, body) {
            Ok(value) => {
                debug!(cell = address, %value, "resolved formula");
                self.states
                    .insert(address.to_string(), CellState::Resolved(value.clone()));
                Ok(value)
            }
            Err(err) => {
                self.states.remove(address);
                Err(err.at(address))
            }
        }
    }

    fn evaluate_formula<S>(&mut self, source: &S, body: &str) -> Result<String>
    where
        S: CellSource + ?Sized,
    {
        let mut solver = ExpressionSolver::new();
        for token in Tokenizer::new(body) {
            match token {
                Token::Operand(text) => match Operand::classify(text) {
                    Operand::Reference(reference) => {
                        let value = self.evaluate(source, reference)?;
                        solver.push_operand(&value)?;
                    }
                    Operand::Literal(literal) => solver.push_operand(literal)?,
                },
                Token::Operator(symbol) => solver.push_operator(symbol)?,
            }
        }
        solver.solve().map(format_number)
    }

    pub fn state(&self, address: &str) -> Option<&CellState> {
        self.states.get(address)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Forget every memoized value. Call when the underlying cells change.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

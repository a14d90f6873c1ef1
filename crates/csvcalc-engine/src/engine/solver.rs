//! Single-level precedence expression solver.
//!
//! Operands and operators are pushed in formula order. `*` and `/` are folded
//! as soon as their right operand arrives; `+` and `-` wait for [`ExpressionSolver::solve`],
//! which reduces left to right. That yields `2+3*4 = 14` and `10-3-2 = 5`
//! without a full precedence parser.

use std::collections::VecDeque;

use crate::error::{EvalError, Result};

/// Arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn binds_tight(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Sub => Ok(lhs - rhs),
            Operator::Mul => Ok(lhs * rhs),
            Operator::Div if rhs == 0.0 => Err(EvalError::DivisionByZero),
            Operator::Div => Ok(lhs / rhs),
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = EvalError;

    fn try_from(symbol: char) -> Result<Operator> {
        match symbol {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Sub),
            '*' => Ok(Operator::Mul),
            '/' => Ok(Operator::Div),
            other => Err(EvalError::UnsupportedOperator(other)),
        }
    }
}

/// Parse an operand as a decimal float.
///
/// Infinity and NaN are accepted only when spelled out, as they are when a
/// computed value is chained into another formula. A literal that overflows
/// to infinity (`1e400`) is rejected.
pub fn parse_operand(text: &str) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() || spells_non_finite(text) => Ok(n),
        _ => Err(EvalError::BadOperand(text.to_string())),
    }
}

fn spells_non_finite(text: &str) -> bool {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|word| unsigned.eq_ignore_ascii_case(word))
}

#[derive(Debug, Default)]
pub struct ExpressionSolver {
    operands: VecDeque<f64>,
    operators: VecDeque<Operator>,
}

impl ExpressionSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_operand(&mut self, text: &str) -> Result<()> {
        let value = parse_operand(text)?;
        match self.operators.back() {
            Some(op) if op.binds_tight() => {
                let op = *op;
                let lhs = self
                    .operands
                    .pop_back()
                    .ok_or(EvalError::MalformedExpression)?;
                self.operators.pop_back();
                self.operands.push_back(op.apply(lhs, value)?);
            }
            _ => self.operands.push_back(value),
        }
        Ok(())
    }

    pub fn push_operator(&mut self, symbol: char) -> Result<()> {
        self.operators.push_back(Operator::try_from(symbol)?);
        Ok(())
    }

    /// Reduce everything pushed so far to a single value.
    pub fn solve(mut self) -> Result<f64> {
        while self.operands.len() > 1 {
            let op = self
                .operators
                .pop_front()
                .ok_or(EvalError::MalformedExpression)?;
            let (Some(lhs), Some(rhs)) = (self.operands.pop_front(), self.operands.pop_front())
            else {
                return Err(EvalError::MalformedExpression);
            };
            self.operands.push_front(op.apply(lhs, rhs)?);
        }

        match (self.operands.pop_front(), self.operators.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(EvalError::MalformedExpression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(tokens: &[&str]) -> Result<f64> {
        let mut solver = ExpressionSolver::new();
        for (i, token) in tokens.iter().enumerate() {
            if i % 2 == 0 {
                solver.push_operand(token)?;
            } else {
                solver.push_operator(token.chars().next().unwrap())?;
            }
        }
        solver.solve()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(solve(&["2", "+", "3", "*", "4"]), Ok(14.0));
        assert_eq!(solve(&["2", "*", "3", "+", "4"]), Ok(10.0));
        assert_eq!(solve(&["1", "+", "8", "/", "4", "*", "3"]), Ok(7.0));
    }

    #[test]
    fn test_left_to_right_for_equal_precedence() {
        assert_eq!(solve(&["10", "-", "3", "-", "2"]), Ok(5.0));
        assert_eq!(solve(&["24", "/", "4", "/", "2"]), Ok(3.0));
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(solve(&["-2.5"]), Ok(-2.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(solve(&["5", "/", "0"]), Err(EvalError::DivisionByZero));
        assert_eq!(solve(&["5", "/", "-0"]), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_bad_operand() {
        assert_eq!(
            solve(&["1", "+", "2x"]),
            Err(EvalError::BadOperand("2x".to_string()))
        );
        assert_eq!(solve(&[""]), Err(EvalError::BadOperand(String::new())));
    }

    #[test]
    fn test_unsupported_operator() {
        assert_eq!(
            solve(&["1", "!", "2"]),
            Err(EvalError::UnsupportedOperator('!'))
        );
    }

    #[test]
    fn test_malformed_expressions() {
        assert_eq!(solve(&[]), Err(EvalError::MalformedExpression));
        assert_eq!(solve(&["1", "+"]), Err(EvalError::MalformedExpression));

        let mut solver = ExpressionSolver::new();
        solver.push_operator('*').unwrap();
        assert_eq!(solver.push_operand("2"), Err(EvalError::MalformedExpression));
    }

    #[test]
    fn test_infinity_propagates() {
        assert_eq!(solve(&["inf", "-", "1"]), Ok(f64::INFINITY));
        assert!(solve(&["inf", "-", "inf"]).unwrap().is_nan());
    }

    #[test]
    fn test_out_of_range_operand() {
        assert_eq!(
            solve(&["1e400", "-", "1"]),
            Err(EvalError::BadOperand("1e400".to_string()))
        );
        assert_eq!(parse_operand("-Infinity"), Ok(f64::NEG_INFINITY));
        assert!(parse_operand("NaN").unwrap().is_nan());
        assert_eq!(parse_operand("1e308"), Ok(1e308));
    }
}

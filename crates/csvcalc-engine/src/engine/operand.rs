//! Operand classification.

/// An operand token, classified by its first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand<'a> {
    /// Starts with a letter; names another cell.
    Reference(&'a str),
    /// Anything else; handed to the solver as is.
    Literal(&'a str),
}

impl<'a> Operand<'a> {
    pub fn classify(token: &'a str) -> Operand<'a> {
        match token.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => Operand::Reference(token),
            _ => Operand::Literal(token),
        }
    }
}

//! Formula tokenizer.
//!
//! Splits a formula body (the text after `=`) into an alternating sequence of
//! operand substrings and single-character operators. Every ASCII punctuation
//! character except the decimal point is a candidate split point, so stray
//! symbols surface as operators and get rejected by the solver instead of
//! being swallowed into a number.
//!
//! Splitting on every punctuation mark would also cut `1.5` into `1`, `.`,
//! `5` and fail on the unsupported `.` operator, so fractional literals such
//! as `=1.5*2` could not be written at all.
//!
//! An operand may start with a sign: when the first candidate operator sits at
//! the current position the scan restarts one character later, so `-2*-3`
//! yields `-2`, `*`, `-3`.

/// One piece of a formula body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Operand(&'a str),
    Operator(char),
}

/// Lazy tokenizer over a formula body. Cloning restarts from the clone point.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    body: &'a str,
    pos: usize,
    pending_operator: Option<char>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(body: &'a str) -> Self {
        Tokenizer {
            body,
            pos: 0,
            pending_operator: None,
        }
    }
}

/// Whether `c` splits operands.
pub fn is_operator_candidate(c: char) -> bool {
    c.is_ascii_punctuation() && c != '.'
}

fn find_operator(s: &str, from: usize) -> Option<usize> {
    s[from..]
        .char_indices()
        .find(|&(_, c)| is_operator_candidate(c))
        .map(|(i, _)| from + i)
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(op) = self.pending_operator.take() {
            return Some(Token::Operator(op));
        }
        if self.pos >= self.body.len() {
            return None;
        }

        let rest = &self.body[self.pos..];
        let split = match find_operator(rest, 0) {
            // Leading sign belongs to the operand.
            Some(0) => {
                let sign_len = rest.chars().next().map_or(1, char::len_utf8);
                find_operator(rest, sign_len)
            }
            other => other,
        };

        match split {
            Some(idx) => {
                let op = rest[idx..].chars().next()?;
                self.pending_operator = Some(op);
                self.pos += idx + op.len_utf8();
                Some(Token::Operand(&rest[..idx]))
            }
            None => {
                self.pos = self.body.len();
                Some(Token::Operand(rest))
            }
        }
    }
}

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, EvalError, Result};

/// The four supported binary operators. All of them are left associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Binding strength: `+ -` bind at 1, `* /` at 2.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    /// Apply with wrapping `i64` arithmetic; only division can fail.
    pub fn apply(self, a: i64, b: i64) -> std::result::Result<i64, EvalError> {
        match self {
            Operator::Add => Ok(a.wrapping_add(b)),
            Operator::Sub => Ok(a.wrapping_sub(b)),
            Operator::Mul => Ok(a.wrapping_mul(b)),
            Operator::Div if b == 0 => Err(EvalError::DivisionByZero),
            Operator::Div => Ok(a.wrapping_div(b)),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single significant character of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Operand(char),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Classify one character. Whitespace yields `Ok(None)`.
    pub fn classify(c: char) -> std::result::Result<Option<Token>, char> {
        match c {
            c if c.is_whitespace() => Ok(None),
            c if c.is_ascii_alphanumeric() => Ok(Some(Token::Operand(c))),
            '(' => Ok(Some(Token::LeftParen)),
            ')' => Ok(Some(Token::RightParen)),
            c => Operator::from_symbol(c).map(|op| Some(Token::Operator(op))).ok_or(c),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Token::Operand(c) => c,
            Token::Operator(op) => op.symbol(),
            Token::LeftParen => '(',
            Token::RightParen => ')',
        }
    }

    /// Precedence used while ordering stack pops. Parentheses sit at 0.
    pub fn precedence(self) -> u8 {
        match self {
            Token::Operator(op) => op.precedence(),
            _ => 0,
        }
    }

    /// The token as seen in a reversed expression: parentheses swap, everything else stays.
    pub fn mirrored(self) -> Token {
        match self {
            Token::LeftParen => Token::RightParen,
            Token::RightParen => Token::LeftParen,
            other => other,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Split `input` into tokens paired with their character position.
///
/// The whole input is classified before anything else happens, so an invalid
/// character is reported before any conversion step is produced.
pub fn tokenize(input: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens = Vec::with_capacity(input.len());
    for (position, c) in input.chars().enumerate() {
        match Token::classify(c) {
            Ok(Some(token)) => tokens.push((position, token)),
            Ok(None) => {}
            Err(token) => return Err(ConvertError::InvalidToken { token, position }),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_kind() {
        let tokens: Vec<Token> = tokenize("a+(B*3)").unwrap().into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Operand('a'),
                Token::Operator(Operator::Add),
                Token::LeftParen,
                Token::Operand('B'),
                Token::Operator(Operator::Mul),
                Token::Operand('3'),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn whitespace_is_skipped_but_positions_are_kept() {
        let tokens = tokenize(" A +\tB").unwrap();
        assert_eq!(
            tokens,
            vec![
                (1, Token::Operand('A')),
                (3, Token::Operator(Operator::Add)),
                (5, Token::Operand('B')),
            ]
        );
    }

    #[test]
    fn rejects_unsupported_characters() {
        assert_eq!(
            tokenize("A^B"),
            Err(ConvertError::InvalidToken { token: '^', position: 1 })
        );
        assert_eq!(
            tokenize("A+é"),
            Err(ConvertError::InvalidToken { token: 'é', position: 2 })
        );
    }

    #[test]
    fn precedence_table() {
        assert_eq!(Token::Operator(Operator::Add).precedence(), 1);
        assert_eq!(Token::Operator(Operator::Sub).precedence(), 1);
        assert_eq!(Token::Operator(Operator::Mul).precedence(), 2);
        assert_eq!(Token::Operator(Operator::Div).precedence(), 2);
        assert_eq!(Token::LeftParen.precedence(), 0);
        assert_eq!(Token::RightParen.precedence(), 0);
    }

    #[test]
    fn applies_with_wrapping_arithmetic() {
        assert_eq!(Operator::Sub.apply(2, 5), Ok(-3));
        assert_eq!(Operator::Mul.apply(i64::MAX, 2), Ok(-2));
        assert_eq!(Operator::Div.apply(i64::MIN, -1), Ok(i64::MIN));
        assert_eq!(Operator::Div.apply(7, 0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn mirroring_swaps_parentheses_only() {
        assert_eq!(Token::LeftParen.mirrored(), Token::RightParen);
        assert_eq!(Token::RightParen.mirrored(), Token::LeftParen);
        assert_eq!(Token::Operand('x').mirrored(), Token::Operand('x'));
    }
}

//! Error types for expression conversion and evaluation

use std::fmt;
use thiserror::Error;

/// Why a postfix or prefix expression could not be reduced to a single value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },
    #[error("{count} values left on the stack, expected exactly one")]
    DanglingOperands { count: usize },
    #[error("parenthesis at position {position} has no meaning in this notation")]
    UnexpectedParenthesis { position: usize },
}

/// Conversion error. Every variant is local to one call: nothing is retried and
/// no partial state survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("expression is empty")]
    EmptyInput,
    #[error("unmatched parenthesis at position {position}")]
    UnmatchedParenthesis { position: usize },
    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: Malformed },
    #[error("invalid token {token:?} at position {position}")]
    InvalidToken { token: char, position: usize },
}

impl From<Malformed> for ConvertError {
    fn from(reason: Malformed) -> Self {
        ConvertError::MalformedExpression { reason }
    }
}

/// Conversion error kinds, without their payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    UnmatchedParenthesis,
    MalformedExpression,
    InvalidToken,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::UnmatchedParenthesis => "unmatched_parenthesis",
            ErrorKind::MalformedExpression => "malformed_expression",
            ErrorKind::InvalidToken => "invalid_token",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::EmptyInput => ErrorKind::EmptyInput,
            ConvertError::UnmatchedParenthesis { .. } => ErrorKind::UnmatchedParenthesis,
            ConvertError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
            ConvertError::InvalidToken { .. } => ErrorKind::InvalidToken,
        }
    }
}

/// Errors raised while evaluating an expression tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("no value bound to operand '{operand}'")]
    UnboundOperand { operand: char },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let err = ConvertError::from(Malformed::DanglingOperands { count: 2 });
        assert_eq!(err.kind(), ErrorKind::MalformedExpression);
        assert_eq!(err.kind().to_string(), "malformed_expression");
        assert_eq!(
            err.to_string(),
            "malformed expression: 2 values left on the stack, expected exactly one"
        );
        assert_eq!(
            ConvertError::InvalidToken { token: '^', position: 3 }.to_string(),
            "invalid token '^' at position 3"
        );
    }
}

use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three ways to write a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Notation {
    Infix,
    Postfix,
    Prefix,
}

impl Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Notation::Infix => "infix",
            Notation::Postfix => "postfix",
            Notation::Prefix => "prefix",
        })
    }
}

/// Conversion selector passed to [`crate::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Mode {
    InfixToPostfix,
    InfixToPrefix,
    PostfixToInfix,
    PrefixToInfix,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::InfixToPostfix,
        Mode::InfixToPrefix,
        Mode::PostfixToInfix,
        Mode::PrefixToInfix,
    ];

    pub fn source(self) -> Notation {
        match self {
            Mode::InfixToPostfix | Mode::InfixToPrefix => Notation::Infix,
            Mode::PostfixToInfix => Notation::Postfix,
            Mode::PrefixToInfix => Notation::Prefix,
        }
    }

    pub fn target(self) -> Notation {
        match self {
            Mode::InfixToPostfix => Notation::Postfix,
            Mode::InfixToPrefix => Notation::Prefix,
            Mode::PostfixToInfix | Mode::PrefixToInfix => Notation::Infix,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::InfixToPostfix => "infixToPostfix",
            Mode::InfixToPrefix => "infixToPrefix",
            Mode::PostfixToInfix => "postfixToInfix",
            Mode::PrefixToInfix => "prefixToInfix",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown conversion mode {input:?}")]
pub struct ParseModeError {
    pub input: String,
}

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Accepts `infixToPostfix` as well as `infix-to-postfix` (and so on).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().to_ascii_lowercase() == folded)
            .ok_or_else(|| ParseModeError { input: s.to_string() })
    }
}

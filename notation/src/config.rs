#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knobs for a [`crate::Converter`].
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial JSON object such as `{"lenient_parentheses": true}` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConverterConfig {
    /// Tolerate unbalanced parentheses in infix input instead of failing with
    /// `UnmatchedParenthesis`. A stray `)` empties the stack; a stray `(` is
    /// flushed to the output with the remaining operators.
    pub lenient_parentheses: bool,
    /// Record the step log. When off, `ConversionResult::steps` is empty.
    pub record_steps: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            lenient_parentheses: false,
            record_steps: true,
        }
    }
}

impl ConverterConfig {
    pub fn lenient() -> Self {
        Self {
            lenient_parentheses: true,
            ..Self::default()
        }
    }

    pub fn without_steps(self) -> Self {
        Self {
            record_steps: false,
            ..self
        }
    }
}

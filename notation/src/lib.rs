//! Conversion between infix, postfix and prefix notation by explicit stack
//! simulation. Every conversion returns its result along with a log of the
//! steps taken, so callers can replay, narrate or discard it.
//!
//! ```rust
//! use notation::{convert, Mode};
//!
//! let result = convert(Mode::InfixToPostfix, "(A+B)*C").unwrap();
//! assert_eq!(result.output, "AB+C*");
//! assert_eq!(result.steps.last().unwrap().description, "Conversion result: AB+C*.");
//! ```
mod config;
mod convert;
mod error;
mod expr;
mod mode;
mod step;
mod token;

pub use config::ConverterConfig;
pub use convert::{
    convert, infix_to_postfix, infix_to_prefix, postfix_to_infix, prefix_to_infix,
    ConversionResult, Converter,
};
pub use error::{ConvertError, ErrorKind, EvalError, Malformed, Result};
pub use expr::{Expr, ExprFrame};
pub use mode::{Mode, Notation, ParseModeError};
pub use step::{Step, StepAction};
pub use token::{tokenize, Operator, Token};

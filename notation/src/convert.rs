use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Malformed, Result};
use crate::mode::{Mode, Notation};
use crate::step::{Step, StepAction, StepLog};
use crate::token::{tokenize, Operator, Token};

/// Output of one conversion together with the steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConversionResult {
    pub mode: Mode,
    pub input: String,
    pub output: String,
    pub steps: Vec<Step>,
}

/// Entry of the operator stack used by the infix scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    LeftParen { position: usize },
    Operator(Operator),
}

impl Display for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pending::LeftParen { .. } => f.write_str("("),
            Pending::Operator(op) => write!(f, "{op}"),
        }
    }
}

const NO_STACK: &[&str] = &[];

/// Runs conversions with a fixed [`ConverterConfig`]. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn convert(&self, mode: Mode, expr: &str) -> Result<ConversionResult> {
        let _span = tracing::debug_span!("convert", %mode).entered();

        let input = expr.trim();
        if input.is_empty() {
            tracing::debug!("rejecting empty expression");
            return Err(ConvertError::EmptyInput);
        }
        let tokens = tokenize(input)?;

        let mut log = StepLog::new(self.config.record_steps);
        let output = match mode {
            Mode::InfixToPostfix => self.infix_to_postfix_tokens(input, &tokens, &mut log)?,
            Mode::InfixToPrefix => self.infix_to_prefix_tokens(input, &tokens, &mut log)?,
            Mode::PostfixToInfix | Mode::PrefixToInfix => {
                self.assemble_infix(mode, input, tokens, &mut log)?
            }
        };

        log.record(
            StepAction::Outcome {
                result: output.clone(),
            },
            NO_STACK,
            &output,
        );
        let steps = log.into_steps();
        tracing::debug!(input, %output, steps = steps.len(), "conversion finished");

        Ok(ConversionResult {
            mode,
            input: input.to_string(),
            output,
            steps,
        })
    }

    pub fn infix_to_postfix(&self, expr: &str) -> Result<ConversionResult> {
        self.convert(Mode::InfixToPostfix, expr)
    }

    pub fn infix_to_prefix(&self, expr: &str) -> Result<ConversionResult> {
        self.convert(Mode::InfixToPrefix, expr)
    }

    pub fn postfix_to_infix(&self, expr: &str) -> Result<ConversionResult> {
        self.convert(Mode::PostfixToInfix, expr)
    }

    pub fn prefix_to_infix(&self, expr: &str) -> Result<ConversionResult> {
        self.convert(Mode::PrefixToInfix, expr)
    }

    fn infix_to_postfix_tokens(
        &self,
        input: &str,
        tokens: &[(usize, Token)],
        log: &mut StepLog,
    ) -> Result<String> {
        log.record(
            StepAction::Begin {
                mode: Mode::InfixToPostfix,
                input: input.to_string(),
            },
            NO_STACK,
            "",
        );
        let output = self.shunting_yard(tokens, log)?;
        log.record(
            StepAction::Finish {
                notation: Notation::Postfix,
                result: output.clone(),
            },
            NO_STACK,
            &output,
        );
        Ok(output)
    }

    /// Reverse the tokens (mirroring parentheses), convert to postfix, reverse the result.
    ///
    /// Only sound for single character operands. Equal precedence chains such as
    /// `A-B-C` come out right-associated, as the reversed scan pops on ties.
    fn infix_to_prefix_tokens(
        &self,
        input: &str,
        tokens: &[(usize, Token)],
        log: &mut StepLog,
    ) -> Result<String> {
        log.record(
            StepAction::Begin {
                mode: Mode::InfixToPrefix,
                input: input.to_string(),
            },
            NO_STACK,
            "",
        );

        let reversed: Vec<(usize, Token)> = tokens
            .iter()
            .rev()
            .map(|&(position, token)| (position, token.mirrored()))
            .collect();
        let reversed_text: String = reversed.iter().map(|(_, token)| token.symbol()).collect();
        log.record(
            StepAction::Reverse {
                reversed: reversed_text.clone(),
            },
            NO_STACK,
            "",
        );

        let postfix = self.infix_to_postfix_tokens(&reversed_text, &reversed, log)?;
        let prefix: String = postfix.chars().rev().collect();
        log.record(
            StepAction::Finish {
                notation: Notation::Prefix,
                result: prefix.clone(),
            },
            NO_STACK,
            &prefix,
        );
        Ok(prefix)
    }

    fn shunting_yard(&self, tokens: &[(usize, Token)], log: &mut StepLog) -> Result<String> {
        let mut output = String::with_capacity(tokens.len());
        let mut stack: Vec<Pending> = Vec::new();

        for &(position, token) in tokens {
            match token {
                Token::Operand(c) => {
                    output.push(c);
                    log.record(StepAction::EmitOperand { operand: c }, &stack, &output);
                }
                Token::LeftParen => {
                    stack.push(Pending::LeftParen { position });
                    log.record(StepAction::PushParen, &stack, &output);
                }
                Token::RightParen => {
                    log.record(StepAction::ReadRightParen, &stack, &output);
                    loop {
                        match stack.pop() {
                            Some(Pending::LeftParen { .. }) => {
                                log.record(StepAction::DiscardParen, &stack, &output);
                                break;
                            }
                            Some(Pending::Operator(op)) => {
                                output.push(op.symbol());
                                log.record(
                                    StepAction::PopOperator { operator: op.symbol() },
                                    &stack,
                                    &output,
                                );
                            }
                            None if self.config.lenient_parentheses => {
                                tracing::warn!(position, "ignoring unmatched right parenthesis");
                                log.record(StepAction::IgnoreParen, &stack, &output);
                                break;
                            }
                            None => return Err(ConvertError::UnmatchedParenthesis { position }),
                        }
                    }
                }
                Token::Operator(op) => {
                    log.record(StepAction::ReadOperator { operator: op.symbol() }, &stack, &output);
                    while let Some(&Pending::Operator(top)) = stack.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        stack.pop();
                        output.push(top.symbol());
                        log.record(StepAction::PopOperator { operator: top.symbol() }, &stack, &output);
                    }
                    stack.push(Pending::Operator(op));
                    log.record(StepAction::PushOperator { operator: op.symbol() }, &stack, &output);
                }
            }
        }

        while let Some(pending) = stack.pop() {
            let symbol = match pending {
                Pending::Operator(op) => op.symbol(),
                Pending::LeftParen { position } => {
                    if !self.config.lenient_parentheses {
                        return Err(ConvertError::UnmatchedParenthesis { position });
                    }
                    tracing::warn!(position, "flushing unmatched left parenthesis to output");
                    '('
                }
            };
            output.push(symbol);
            log.record(StepAction::DrainOperator { operator: symbol }, &stack, &output);
        }

        Ok(output)
    }

    /// Postfix scans left to right and binds `(a op b)` from pops `b` then `a`;
    /// prefix scans right to left and binds from pops `a` then `b`.
    fn assemble_infix(
        &self,
        mode: Mode,
        input: &str,
        mut tokens: Vec<(usize, Token)>,
        log: &mut StepLog,
    ) -> Result<String> {
        let source = mode.source();
        let prefix = source == Notation::Prefix;
        if prefix {
            tokens.reverse();
        }

        log.record(
            StepAction::Begin {
                mode,
                input: input.to_string(),
            },
            NO_STACK,
            "",
        );

        let mut stack: Vec<String> = Vec::new();
        for (position, token) in tokens {
            match token {
                Token::Operand(c) => {
                    stack.push(c.to_string());
                    log.record(StepAction::PushOperand { source, operand: c }, &stack, "");
                }
                Token::Operator(op) => {
                    let missing = Malformed::MissingOperand {
                        operator: op.symbol(),
                        position,
                    };
                    let first = stack.pop().ok_or_else(|| missing.clone())?;
                    let second = stack.pop().ok_or(missing)?;
                    let (left, right) = if prefix { (first, second) } else { (second, first) };

                    let combined = format!("({left}{op}{right})");
                    stack.push(combined.clone());
                    log.record(
                        StepAction::Combine {
                            source,
                            operator: op.symbol(),
                            left,
                            right,
                            combined,
                        },
                        &stack,
                        "",
                    );
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(Malformed::UnexpectedParenthesis { position }.into());
                }
            }
        }

        let result = match stack.pop() {
            Some(result) if stack.is_empty() => result,
            Some(_) => {
                return Err(Malformed::DanglingOperands {
                    count: stack.len() + 1,
                }
                .into())
            }
            None => return Err(Malformed::DanglingOperands { count: 0 }.into()),
        };

        log.record(
            StepAction::Finish {
                notation: Notation::Infix,
                result: result.clone(),
            },
            NO_STACK,
            &result,
        );
        Ok(result)
    }
}

/// Convert `expr` with the default (strict) configuration.
pub fn convert(mode: Mode, expr: &str) -> Result<ConversionResult> {
    Converter::default().convert(mode, expr)
}

pub fn infix_to_postfix(expr: &str) -> Result<ConversionResult> {
    convert(Mode::InfixToPostfix, expr)
}

pub fn infix_to_prefix(expr: &str) -> Result<ConversionResult> {
    convert(Mode::InfixToPrefix, expr)
}

pub fn postfix_to_infix(expr: &str) -> Result<ConversionResult> {
    convert(Mode::PostfixToInfix, expr)
}

pub fn prefix_to_infix(expr: &str) -> Result<ConversionResult> {
    convert(Mode::PrefixToInfix, expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(mode: Mode, expr: &str) -> String {
        convert(mode, expr).unwrap().output
    }

    #[test]
    fn infix_to_postfix_respects_precedence() {
        assert_eq!(output(Mode::InfixToPostfix, "A+B*C"), "ABC*+");
        assert_eq!(output(Mode::InfixToPostfix, "(A+B)*C"), "AB+C*");
        assert_eq!(output(Mode::InfixToPostfix, "A-B-C"), "AB-C-");
        assert_eq!(output(Mode::InfixToPostfix, "A*B+C/D"), "AB*CD/+");
        assert_eq!(output(Mode::InfixToPostfix, " a + ( b - 1 ) * 2 "), "ab1-2*+");
    }

    #[test]
    fn infix_to_prefix_uses_reversal() {
        assert_eq!(output(Mode::InfixToPrefix, "A+B*C"), "+A*BC");
        assert_eq!(output(Mode::InfixToPrefix, "(A+B)*C"), "*+ABC");
        assert_eq!(output(Mode::InfixToPrefix, "((A-B)-C)"), "--ABC");
        // ties pop on the reversed scan, so unparenthesized chains bind to the right
        assert_eq!(output(Mode::InfixToPrefix, "A-B-C"), "-A-BC");
    }

    #[test]
    fn postfix_and_prefix_to_infix() {
        assert_eq!(output(Mode::PostfixToInfix, "AB+C*"), "((A+B)*C)");
        assert_eq!(output(Mode::PrefixToInfix, "*+ABC"), "((A+B)*C)");
        assert_eq!(output(Mode::PostfixToInfix, "ABC*+"), "(A+(B*C))");
        assert_eq!(output(Mode::PrefixToInfix, "-A/BC"), "(A-(B/C))");
        assert_eq!(output(Mode::PostfixToInfix, "A"), "A");
    }

    #[test]
    fn empty_input_is_rejected_in_every_mode() {
        for mode in Mode::ALL {
            assert_eq!(convert(mode, ""), Err(ConvertError::EmptyInput));
            assert_eq!(convert(mode, "  \t "), Err(ConvertError::EmptyInput));
        }
    }

    #[test]
    fn trailing_operand_is_malformed() {
        assert_eq!(
            postfix_to_infix("AB+C"),
            Err(ConvertError::MalformedExpression {
                reason: Malformed::DanglingOperands { count: 2 }
            })
        );
    }

    #[test]
    fn operator_without_operands_is_malformed() {
        assert_eq!(
            postfix_to_infix("A+"),
            Err(ConvertError::MalformedExpression {
                reason: Malformed::MissingOperand {
                    operator: '+',
                    position: 1
                }
            })
        );
        assert_eq!(
            prefix_to_infix("+A"),
            Err(ConvertError::MalformedExpression {
                reason: Malformed::MissingOperand {
                    operator: '+',
                    position: 0
                }
            })
        );
        assert_eq!(
            postfix_to_infix("AB(+"),
            Err(ConvertError::MalformedExpression {
                reason: Malformed::UnexpectedParenthesis { position: 2 }
            })
        );
    }

    #[test]
    fn invalid_tokens_are_reported_before_any_step() {
        for mode in Mode::ALL {
            assert_eq!(
                convert(mode, "A%B"),
                Err(ConvertError::InvalidToken { token: '%', position: 1 })
            );
        }
    }

    #[test]
    fn strict_mode_rejects_unbalanced_parentheses() {
        assert_eq!(
            infix_to_postfix("A+B)"),
            Err(ConvertError::UnmatchedParenthesis { position: 3 })
        );
        assert_eq!(
            infix_to_postfix("(A+B"),
            Err(ConvertError::UnmatchedParenthesis { position: 0 })
        );
    }

    #[test]
    fn lenient_mode_tolerates_unbalanced_parentheses() {
        let converter = Converter::new(ConverterConfig::lenient());
        assert_eq!(converter.infix_to_postfix("A+B)").unwrap().output, "AB+");
        assert_eq!(converter.infix_to_postfix("(A+B").unwrap().output, "AB+(");

        let steps = converter.infix_to_postfix("A+B)").unwrap().steps;
        assert!(steps.iter().any(|s| s.action == StepAction::IgnoreParen));
    }

    #[test]
    fn lenient_prefix_mirrors_the_unbalanced_side() {
        let converter = Converter::new(ConverterConfig::lenient());
        // the stray `)` becomes a leading `(` on the reversed scan and is flushed
        assert_eq!(converter.infix_to_prefix("A+B)").unwrap().output, "(+AB");
        assert_eq!(converter.infix_to_prefix("(A+B").unwrap().output, "+AB");

        let steps = converter.infix_to_prefix("(A+B").unwrap().steps;
        assert!(steps.iter().any(|s| s.action == StepAction::IgnoreParen));
    }

    #[test]
    fn strict_prefix_reports_the_original_position() {
        assert_eq!(
            infix_to_prefix("(A+B"),
            Err(ConvertError::UnmatchedParenthesis { position: 0 })
        );
        assert_eq!(
            infix_to_prefix("A+B)"),
            Err(ConvertError::UnmatchedParenthesis { position: 3 })
        );
    }

    #[test]
    fn parenthesis_in_prefix_input_is_malformed() {
        assert_eq!(
            prefix_to_infix("+(AB"),
            Err(ConvertError::MalformedExpression {
                reason: Malformed::UnexpectedParenthesis { position: 1 }
            })
        );
    }

    #[test]
    fn redundant_parentheses_vanish() {
        assert_eq!(output(Mode::InfixToPostfix, "()"), "");
        assert_eq!(output(Mode::InfixToPrefix, "()"), "");
        assert_eq!(output(Mode::InfixToPostfix, "((A))"), "A");
        assert_eq!(output(Mode::InfixToPrefix, "((A))"), "A");
    }

    #[test]
    fn steps_narrate_the_scan() {
        let result = infix_to_postfix("A+B*C").unwrap();
        let descriptions: Vec<&str> = result.steps.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Converting infix to postfix for A+B*C.",
                "Read operand A; append to output: A.",
                "Read operator +.",
                "Push operator + to stack.",
                "Read operand B; append to output: AB.",
                "Read operator *.",
                "Push operator * to stack.",
                "Read operand C; append to output: ABC.",
                "Pop remaining * to output → ABC*.",
                "Pop remaining + to output → ABC*+.",
                "Final postfix expression is ABC*+.",
                "Conversion result: ABC*+.",
            ]
        );

        let push_mul = &result.steps[6];
        assert_eq!(push_mul.stack, vec!["+".to_string(), "*".to_string()]);
        assert_eq!(push_mul.output, "AB");
    }

    #[test]
    fn prefix_steps_include_the_reversed_pass() {
        let result = infix_to_prefix("A+B*C").unwrap();
        let kinds: Vec<&str> = result.steps.iter().map(|s| s.action.kind()).collect();
        assert_eq!(kinds[..3], ["begin", "reverse", "begin"]);
        assert_eq!(
            result.steps[1].action,
            StepAction::Reverse {
                reversed: "C*B+A".to_string()
            }
        );
        let closing: Vec<&str> = result
            .steps
            .iter()
            .rev()
            .take(3)
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(
            closing,
            vec![
                "Conversion result: +A*BC.",
                "Final prefix: +A*BC.",
                "Final postfix expression is CB*A+.",
            ]
        );
    }

    #[test]
    fn prefix_to_infix_narrates_its_own_scan() {
        let result = prefix_to_infix("*+ABC").unwrap();
        let descriptions: Vec<&str> = result.steps.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Converting prefix to infix: *+ABC.",
                "Push operand C.",
                "Push operand B.",
                "Push operand A.",
                "Operator +: combine → (A+B).",
                "Operator *: combine → ((A+B)*C).",
                "Final infix: ((A+B)*C).",
                "Conversion result: ((A+B)*C).",
            ]
        );
    }

    #[test]
    fn combine_steps_track_the_operand_stack() {
        let result = postfix_to_infix("AB+C*").unwrap();
        let combines: Vec<&Step> = result
            .steps
            .iter()
            .filter(|s| s.action.kind() == "combine")
            .collect();
        assert_eq!(combines.len(), 2);
        assert_eq!(combines[0].stack, vec!["(A+B)".to_string()]);
        assert_eq!(
            combines[1].description,
            "Apply operator *: combine (A+B) and C → ((A+B)*C)."
        );
    }

    #[test]
    fn step_recording_can_be_disabled() {
        let converter = Converter::new(ConverterConfig::default().without_steps());
        let result = converter.infix_to_prefix("A+B*C").unwrap();
        assert_eq!(result.output, "+A*BC");
        assert!(result.steps.is_empty());
    }
}

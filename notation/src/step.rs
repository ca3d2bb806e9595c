use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mode::{Mode, Notation};

/// What a conversion did at one point of its scan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StepAction {
    Begin { mode: Mode, input: String },
    Reverse { reversed: String },
    EmitOperand { operand: char },
    PushParen,
    ReadRightParen,
    DiscardParen,
    /// a `)` found no `(` and lenient mode let it through
    IgnoreParen,
    ReadOperator { operator: char },
    PushOperator { operator: char },
    PopOperator { operator: char },
    DrainOperator { operator: char },
    PushOperand { source: Notation, operand: char },
    Combine {
        source: Notation,
        operator: char,
        left: String,
        right: String,
        combined: String,
    },
    Finish { notation: Notation, result: String },
    /// closes every conversion, after any nested pass has finished
    Outcome { result: String },
}

impl StepAction {
    /// Short machine-friendly name, also used as the serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            StepAction::Begin { .. } => "begin",
            StepAction::Reverse { .. } => "reverse",
            StepAction::EmitOperand { .. } => "emit_operand",
            StepAction::PushParen => "push_paren",
            StepAction::ReadRightParen => "read_right_paren",
            StepAction::DiscardParen => "discard_paren",
            StepAction::IgnoreParen => "ignore_paren",
            StepAction::ReadOperator { .. } => "read_operator",
            StepAction::PushOperator { .. } => "push_operator",
            StepAction::PopOperator { .. } => "pop_operator",
            StepAction::DrainOperator { .. } => "drain_operator",
            StepAction::PushOperand { .. } => "push_operand",
            StepAction::Combine { .. } => "combine",
            StepAction::Finish { .. } => "finish",
            StepAction::Outcome { .. } => "outcome",
        }
    }

    /// Narration for this action given the output buffer after it.
    pub fn describe(&self, output: &str) -> String {
        match self {
            StepAction::Begin { mode, input } => match mode.source() {
                Notation::Infix => format!(
                    "Converting infix to {} for {}.",
                    mode.target(),
                    input
                ),
                source => format!("Converting {source} to infix: {input}."),
            },
            StepAction::Reverse { reversed } => format!("Reverse expression: {reversed}."),
            StepAction::EmitOperand { operand } => {
                format!("Read operand {operand}; append to output: {output}.")
            }
            StepAction::PushParen => "Read left parenthesis, push it to the stack.".to_string(),
            StepAction::ReadRightParen => {
                "Read right parenthesis. Pop until left parenthesis.".to_string()
            }
            StepAction::DiscardParen => "Discard left parenthesis from stack.".to_string(),
            StepAction::IgnoreParen => {
                "No left parenthesis on the stack; ignore the right parenthesis.".to_string()
            }
            StepAction::ReadOperator { operator } => format!("Read operator {operator}."),
            StepAction::PushOperator { operator } => format!("Push operator {operator} to stack."),
            StepAction::PopOperator { operator } => {
                format!("Pop {operator} from stack to output → {output}.")
            }
            StepAction::DrainOperator { operator } => {
                format!("Pop remaining {operator} to output → {output}.")
            }
            StepAction::PushOperand {
                source: Notation::Prefix,
                operand,
            } => format!("Push operand {operand}."),
            StepAction::PushOperand { operand, .. } => format!("Push operand {operand} to stack."),
            StepAction::Combine {
                source: Notation::Prefix,
                operator,
                combined,
                ..
            } => format!("Operator {operator}: combine → {combined}."),
            StepAction::Combine {
                operator,
                left,
                right,
                combined,
                ..
            } => format!("Apply operator {operator}: combine {left} and {right} → {combined}."),
            StepAction::Finish {
                notation: Notation::Postfix,
                result,
            } => format!("Final postfix expression is {result}."),
            StepAction::Finish { notation, result } => format!("Final {notation}: {result}."),
            StepAction::Outcome { result } => format!("Conversion result: {result}."),
        }
    }
}

/// One entry of the conversion log. `stack` (bottom first) and `output` are the
/// state right after `action` was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    pub description: String,
    pub action: StepAction,
    pub stack: Vec<String>,
    pub output: String,
}

/// Collects steps for a single conversion call.
#[derive(Debug)]
pub(crate) struct StepLog {
    steps: Vec<Step>,
    enabled: bool,
}

impl StepLog {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            steps: Vec::new(),
            enabled,
        }
    }

    pub(crate) fn record<S: Display>(&mut self, action: StepAction, stack: &[S], output: &str) {
        if !self.enabled {
            return;
        }

        let description = action.describe(output);
        tracing::trace!(step = self.steps.len(), kind = action.kind(), "{}", description);

        self.steps.push(Step {
            description,
            action,
            stack: stack.iter().map(|s| s.to_string()).collect(),
            output: output.to_string(),
        });
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_actions_with_output() {
        let action = StepAction::PopOperator { operator: '*' };
        assert_eq!(action.describe("ABC*"), "Pop * from stack to output → ABC*.");

        let begin = StepAction::Begin {
            mode: Mode::InfixToPrefix,
            input: "A+B".to_string(),
        };
        assert_eq!(begin.describe(""), "Converting infix to prefix for A+B.");

        let begin = StepAction::Begin {
            mode: Mode::PrefixToInfix,
            input: "+AB".to_string(),
        };
        assert_eq!(begin.describe(""), "Converting prefix to infix: +AB.");
    }

    #[test]
    fn prefix_scans_use_their_own_wording() {
        let push = |source| StepAction::PushOperand { source, operand: 'B' };
        assert_eq!(push(Notation::Prefix).describe(""), "Push operand B.");
        assert_eq!(push(Notation::Postfix).describe(""), "Push operand B to stack.");

        let combine = |source| StepAction::Combine {
            source,
            operator: '+',
            left: "A".to_string(),
            right: "B".to_string(),
            combined: "(A+B)".to_string(),
        };
        assert_eq!(combine(Notation::Prefix).describe(""), "Operator +: combine → (A+B).");
        assert_eq!(
            combine(Notation::Postfix).describe(""),
            "Apply operator +: combine A and B → (A+B)."
        );

        let finish = |notation| StepAction::Finish {
            notation,
            result: "X".to_string(),
        };
        assert_eq!(finish(Notation::Infix).describe(""), "Final infix: X.");
        assert_eq!(finish(Notation::Prefix).describe(""), "Final prefix: X.");
        assert_eq!(finish(Notation::Postfix).describe(""), "Final postfix expression is X.");
        assert_eq!(
            StepAction::Outcome { result: "X".to_string() }.describe("X"),
            "Conversion result: X."
        );
    }

    #[test]
    fn disabled_log_records_nothing() {
        let mut log = StepLog::new(false);
        log.record(StepAction::PushParen, &["("], "");
        assert!(log.into_steps().is_empty());
    }

    #[test]
    fn snapshots_are_taken_at_record_time() {
        let mut log = StepLog::new(true);
        log.record(StepAction::PushOperator { operator: '+' }, &['+'], "A");
        let steps = log.into_steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].stack, vec!["+".to_string()]);
        assert_eq!(steps[0].output, "A");
        assert_eq!(steps[0].description, "Push operator + to stack.");
    }
}

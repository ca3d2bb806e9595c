use notation::{tokenize, EvalError, Token};

#[cfg(test)]
use crate::expr::{arb_expr, env};
#[cfg(test)]
use notation::{infix_to_postfix, infix_to_prefix, postfix_to_infix, Expr};
#[cfg(test)]
use proptest::prelude::*;

/// Evaluate a postfix string directly with an explicit value stack, without
/// building a tree. `None` means the string is not well formed.
pub fn eval_postfix(
    expr: &str,
    env: impl Fn(char) -> Option<i64>,
) -> Option<Result<i64, EvalError>> {
    let mut stack: Vec<i64> = Vec::new();
    for (_, token) in tokenize(expr).ok()? {
        match token {
            Token::Operand(c) => match env(c) {
                Some(v) => stack.push(v),
                None => return Some(Err(EvalError::UnboundOperand { operand: c })),
            },
            Token::Operator(op) => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                match op.apply(a, b) {
                    Ok(v) => stack.push(v),
                    Err(e) => return Some(Err(e)),
                }
            }
            Token::LeftParen | Token::RightParen => return None,
        }
    }

    match stack.as_slice() {
        [v] => Some(Ok(*v)),
        _ => None,
    }
}

/// Evaluate an infix string by converting it to postfix first.
pub fn eval_infix(
    expr: &str,
    env: impl Fn(char) -> Option<i64>,
) -> Option<Result<i64, EvalError>> {
    let postfix = notation::infix_to_postfix(expr).ok()?;
    eval_postfix(&postfix.output, env)
}

#[test]
fn reference_evaluator_agrees_on_fixed_cases() {
    let env = |c: char| c.to_digit(10).map(i64::from);
    assert_eq!(eval_postfix("23*4+", env), Some(Ok(10)));
    assert_eq!(eval_postfix("93-2/", env), Some(Ok(3)));
    assert_eq!(eval_postfix("11-5/", env), Some(Ok(0)));
    assert_eq!(eval_postfix("511-/", env), Some(Err(EvalError::DivisionByZero)));
    assert_eq!(eval_postfix("12", env), None);
    assert_eq!(eval_postfix("1+", env), None);
    assert_eq!(eval_infix("2+3*4", env), Some(Ok(14)));
    assert_eq!(eval_infix("(2+3)*4", env), Some(Ok(20)));
    assert_eq!(eval_infix("8-4-2", env), Some(Ok(2)));
}

// evaluate generated trees through every notation and compare
#[cfg(test)]
proptest! {
    #[test]
    fn evaluation_survives_conversion(expr in arb_expr()) {
        let expected = expr.evaluate(env);

        // the tree and the flat stack evaluator agree
        prop_assert_eq!(eval_postfix(&expr.to_postfix(), env), Some(expected.clone()));

        // infix -> postfix -> infix evaluates like the original expression
        let postfix = infix_to_postfix(&expr.to_minimal_infix()).unwrap().output;
        let infix = postfix_to_infix(&postfix).unwrap().output;
        prop_assert_eq!(eval_infix(&infix, env), Some(expected.clone()));

        // fully parenthesized input is safe for the reversal based prefix conversion
        let prefix = infix_to_prefix(&expr.to_infix()).unwrap().output;
        let from_prefix = Expr::from_prefix(&prefix).unwrap();
        prop_assert_eq!(from_prefix.evaluate(env), expected);
    }
}

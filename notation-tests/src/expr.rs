pub mod eval;
pub mod roundtrip;
pub mod steps;

use notation::{Expr, Operator};
use proptest::prelude::*;

/// Value bound to every single character operand: digits are themselves, letters
/// spread over a small range that includes zero and negatives.
pub fn env(c: char) -> Option<i64> {
    match c {
        '0'..='9' => c.to_digit(10).map(i64::from),
        'A'..='Z' => Some(c as i64 - 'A' as i64 - 7),
        'a'..='z' => Some(c as i64 - 'a' as i64 + 11),
        _ => None,
    }
}

pub fn arb_operand() -> impl Strategy<Value = char> {
    prop_oneof![
        proptest::char::range('A', 'Z'),
        proptest::char::range('a', 'z'),
        proptest::char::range('0', '9'),
    ]
}

pub fn arb_operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Sub),
        Just(Operator::Mul),
        Just(Operator::Div),
    ]
}

pub fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = arb_operand().prop_map(Expr::operand);
    leaf.prop_recursive(
        6,  // 6 levels deep
        64, // Shoot for maximum size of 64 nodes
        2,  // binary operators only
        |inner| {
            (arb_operator(), inner.clone(), inner).prop_map(|(op, a, b)| Expr::binary(op, a, b))
        },
    )
}

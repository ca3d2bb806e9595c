#[cfg(test)]
use crate::expr::arb_expr;
#[cfg(test)]
use notation::{
    convert, infix_to_postfix, infix_to_prefix, postfix_to_infix, prefix_to_infix, ConvertError,
    Converter, ConverterConfig, Expr, Malformed, Mode,
};
#[cfg(test)]
use proptest::prelude::*;

#[test]
fn documented_conversions() {
    assert_eq!(infix_to_postfix("A+B*C").unwrap().output, "ABC*+");
    assert_eq!(infix_to_postfix("(A+B)*C").unwrap().output, "AB+C*");
    assert_eq!(postfix_to_infix("AB+C*").unwrap().output, "((A+B)*C)");
    assert_eq!(prefix_to_infix("*+ABC").unwrap().output, "((A+B)*C)");
    assert_eq!(infix_to_prefix("A+B*C").unwrap().output, "+A*BC");

    for mode in Mode::ALL {
        assert_eq!(convert(mode, ""), Err(ConvertError::EmptyInput));
    }

    assert_eq!(
        postfix_to_infix("AB+C").map(|r| r.output),
        Err(ConvertError::MalformedExpression {
            reason: Malformed::DanglingOperands { count: 2 }
        })
    );
}

// generate a bunch of expression trees and push them through every conversion
#[cfg(test)]
proptest! {
    #[test]
    fn infix_parses_back_to_the_same_tree(expr in arb_expr()) {
        let postfix = expr.to_postfix();

        prop_assert_eq!(&infix_to_postfix(&expr.to_minimal_infix()).unwrap().output, &postfix);
        prop_assert_eq!(&infix_to_postfix(&expr.to_infix()).unwrap().output, &postfix);
        prop_assert_eq!(Expr::from_postfix(&postfix).unwrap(), expr);
    }

    #[test]
    fn postfix_and_prefix_render_fully_parenthesized(expr in arb_expr()) {
        let infix = expr.to_infix();

        prop_assert_eq!(&postfix_to_infix(&expr.to_postfix()).unwrap().output, &infix);
        prop_assert_eq!(&prefix_to_infix(&expr.to_prefix()).unwrap().output, &infix);
        prop_assert_eq!(infix_to_prefix(&infix).unwrap().output, expr.to_prefix());
    }

    #[test]
    fn conversions_invert_each_other(expr in arb_expr()) {
        let postfix = expr.to_postfix();
        let prefix = expr.to_prefix();

        let via_infix = postfix_to_infix(&postfix).unwrap().output;
        prop_assert_eq!(infix_to_postfix(&via_infix).unwrap().output, postfix);

        let via_infix = prefix_to_infix(&prefix).unwrap().output;
        prop_assert_eq!(infix_to_prefix(&via_infix).unwrap().output, prefix);
    }

    #[test]
    fn extra_operand_is_malformed(expr in arb_expr(), extra in crate::expr::arb_operand()) {
        let dangling: Result<String, ConvertError> = Err(ConvertError::MalformedExpression {
            reason: Malformed::DanglingOperands { count: 2 },
        });

        let postfix = format!("{}{}", expr.to_postfix(), extra);
        prop_assert_eq!(postfix_to_infix(&postfix).map(|r| r.output), dangling.clone());

        let prefix = format!("{}{}", extra, expr.to_prefix());
        prop_assert_eq!(prefix_to_infix(&prefix).map(|r| r.output), dangling);
    }

    #[test]
    fn lenient_mode_agrees_on_balanced_input(expr in arb_expr()) {
        let lenient = Converter::new(ConverterConfig::lenient());
        for mode in [Mode::InfixToPostfix, Mode::InfixToPrefix] {
            let infix = expr.to_minimal_infix();
            prop_assert_eq!(lenient.convert(mode, &infix), convert(mode, &infix));
        }
    }
}

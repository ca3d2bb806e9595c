#[cfg(test)]
use crate::expr::arb_expr;
#[cfg(test)]
use notation::{infix_to_postfix, postfix_to_infix, ConversionResult, ConverterConfig, StepAction};
#[cfg(test)]
use proptest::prelude::*;

#[test]
fn config_loads_from_partial_json() {
    let config: ConverterConfig = serde_json::from_str(r#"{"lenient_parentheses": true}"#).unwrap();
    assert_eq!(config, ConverterConfig::lenient());

    let config: ConverterConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ConverterConfig::default());
}

#[test]
fn results_serialize_with_tagged_steps() {
    let result = infix_to_postfix("A*B").unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["mode"], "infixToPostfix");
    assert_eq!(json["output"], "AB*");
    assert_eq!(json["steps"][0]["action"]["kind"], "begin");
    assert_eq!(json["steps"][0]["action"]["mode"], "infixToPostfix");

    let back: ConversionResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[cfg(test)]
proptest! {
    #[test]
    fn postfix_output_only_grows(expr in arb_expr()) {
        let result = infix_to_postfix(&expr.to_minimal_infix()).unwrap();

        prop_assert_eq!(result.steps.first().map(|s| s.action.kind()), Some("begin"));
        let kinds: Vec<&str> = result.steps.iter().rev().take(2).map(|s| s.action.kind()).collect();
        prop_assert_eq!(kinds, vec!["outcome", "finish"]);

        for pair in result.steps.windows(2) {
            prop_assert!(pair[1].output.starts_with(&pair[0].output));
        }
        prop_assert!(result.steps.iter().all(|s| s.stack.iter().all(|e| e.len() == 1)));
    }

    #[test]
    fn one_combine_per_operator(expr in arb_expr()) {
        let postfix = expr.to_postfix();
        let operators = postfix.chars().filter(|c| !c.is_ascii_alphanumeric()).count();
        let result = postfix_to_infix(&postfix).unwrap();

        let mut depth = 0usize;
        let mut combines = 0usize;
        for step in result.steps.iter() {
            match &step.action {
                StepAction::PushOperand { .. } => depth += 1,
                StepAction::Combine { .. } => {
                    combines += 1;
                    depth -= 1;
                }
                _ => {}
            }
            if !matches!(
                step.action,
                StepAction::Begin { .. } | StepAction::Finish { .. } | StepAction::Outcome { .. }
            ) {
                prop_assert_eq!(step.stack.len(), depth);
            }
        }
        prop_assert_eq!(combines, operators);
        prop_assert_eq!(depth, 1);
    }
}

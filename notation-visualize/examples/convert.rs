use std::path::PathBuf;

use notation::{Converter, ConverterConfig, Mode};
use notation_visualize::visualize::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let converter = Converter::default();

    let samples = [
        (Mode::InfixToPostfix, "A+B*C"),
        (Mode::InfixToPrefix, "(A+B)*C"),
        (Mode::PostfixToInfix, "AB+C*"),
        (Mode::PrefixToInfix, "*+ABC"),
    ];

    for (mode, expr) in samples {
        let (result, viz) = converter.convert_v(mode, expr);
        let result = result?;
        println!("{mode}: {} -> {}", result.input, result.output);

        viz.label(mode.to_string(), expr.to_string())
            .finish(PathBuf::from(format!("{mode}.html")))?;
    }

    // round trip, fused into a single replay
    let (to_postfix, there) = converter.convert_v(Mode::InfixToPostfix, "(A-B)/(C+D)");
    let postfix = to_postfix?.output;
    let (back, back_viz) = converter.convert_v(Mode::PostfixToInfix, &postfix);
    println!("round trip: (A-B)/(C+D) -> {postfix} -> {}", back?.output);

    there
        .label("Round trip".to_string(), "(A-B)/(C+D)".to_string())
        .fuse(back_viz, "Back to infix".to_string(), postfix.clone())
        .finish(PathBuf::from("round_trip.html"))?;

    // an unbalanced expression, strict and lenient
    let (strict, strict_viz) = converter.convert_v(Mode::InfixToPostfix, "A+B)");
    println!("strict: {}", strict.map(|r| r.output).unwrap_or_else(|e| e.to_string()));
    strict_viz.finish(PathBuf::from("strict_error.html"))?;

    let lenient = Converter::new(ConverterConfig::lenient());
    let (tolerated, lenient_viz) = lenient.convert_v(Mode::InfixToPostfix, "A+B)");
    println!("lenient: {}", tolerated?.output);
    lenient_viz.finish(PathBuf::from("lenient.html"))?;

    Ok(())
}

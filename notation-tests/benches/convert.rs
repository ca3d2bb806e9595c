use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use notation::{Converter, ConverterConfig, Expr, ExprFrame, Mode, Operator};
use pprof::criterion::{Output, PProfProfiler};

fn bench_convert(criterion: &mut Criterion) {
    let mut test_cases = Vec::new();

    // balanced trees, alternating operators per level so every precedence path is taken
    for depth in [4usize, 8, 12] {
        let big_expr = Expr::unfold(depth, |x| {
            if x > 0 {
                let op = if x % 2 == 0 { Operator::Add } else { Operator::Mul };
                ExprFrame::Binary(op, x - 1, x - 1)
            } else {
                ExprFrame::Operand('A')
            }
        });

        test_cases.push((depth, big_expr.to_minimal_infix(), big_expr.to_postfix()));
    }

    let with_steps = Converter::default();
    let without_steps = Converter::new(ConverterConfig::default().without_steps());

    let mut group = criterion.benchmark_group("convert expression");

    for (depth, infix, postfix) in test_cases.iter() {
        group.bench_with_input(
            BenchmarkId::new("infix to postfix, recording steps", depth),
            infix,
            |b, expr| b.iter(|| with_steps.convert(Mode::InfixToPostfix, expr)),
        );

        group.bench_with_input(
            BenchmarkId::new("infix to postfix, no steps", depth),
            infix,
            |b, expr| b.iter(|| without_steps.convert(Mode::InfixToPostfix, expr)),
        );

        group.bench_with_input(
            BenchmarkId::new("infix to prefix, no steps", depth),
            infix,
            |b, expr| b.iter(|| without_steps.convert(Mode::InfixToPrefix, expr)),
        );

        group.bench_with_input(
            BenchmarkId::new("postfix to infix, no steps", depth),
            postfix,
            |b, expr| b.iter(|| without_steps.convert(Mode::PostfixToInfix, expr)),
        );

        group.bench_with_input(
            BenchmarkId::new("postfix to tree", depth),
            postfix,
            |b, expr| b.iter(|| Expr::from_postfix(expr)),
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_profiler(
            PProfProfiler::new(100, Output::Flamegraph(None))
        );
    targets = bench_convert
}
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rsl_parser::parser::Parser;

fn program(source: &str) {
    let _ast = Parser::new(source.into()).parse_program().unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "print 1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| program(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "print 1".to_string();
    for _i in 0..200 {
        source.push_str(" - 2 * (3 + 5) * 5");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| program(&source)));
}

fn many_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("many-blocks");

    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!("let f{i} a b = let c = a * b; c + f{i} 1 2;\n", i = i));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many-blocks", |b| b.iter(|| program(&source)));
}

criterion_group!(benches, long_expr, stress_precedence, many_blocks);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use ucum_rs::{canonicalize, convert, parse, quantity};

/// Benchmark parsing performance across different expression complexities.
fn bench_parsing_by_complexity(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing_by_complexity");

    let test_cases = [
        ("simple_unit", "m"),
        ("prefixed_unit", "kg"),
        ("basic_product", "kg.m"),
        ("simple_quotient", "m/s"),
        ("complex_expression", "kg.m/s2"),
        ("medical_units", "mg/dL"),
        ("multiple_powers", "m2.kg/s3"),
        ("nested_quotient", "J/mol/K"),
        ("leading_division", "/min"),
        ("annotation", "m{length}"),
        ("ten_power", "10*3.mol"),
        ("parentheses", "(kg.m)/s2"),
        ("bracket_atom", "[in_i]"),
        ("celsius", "Cel"),
    ];

    for (name, expr) in &test_cases {
        group.bench_with_input(BenchmarkId::new("parse", name), expr, |b, &expr| {
            b.iter(|| parse(black_box(expr)))
        });
    }

    group.finish();
}

/// Benchmark parsing across unit categories.
fn bench_parsing_categories(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing_categories");

    let base_units = ["m", "s", "g", "rad", "K", "cd"];
    for unit in &base_units {
        group.bench_with_input(BenchmarkId::new("base_units", unit), unit, |b, &unit| {
            b.iter(|| parse(black_box(unit)))
        });
    }

    let prefixed_units = ["km", "mg", "kPa", "mL", "cm", "mm", "ng"];
    for unit in &prefixed_units {
        group.bench_with_input(BenchmarkId::new("prefixed", unit), unit, |b, &unit| {
            b.iter(|| parse(black_box(unit)))
        });
    }

    let medical_units = ["mg/dL", "mmol/L", "U/L", "kg/m2"];
    for unit in &medical_units {
        group.bench_with_input(BenchmarkId::new("medical", unit), unit, |b, &unit| {
            b.iter(|| parse(black_box(unit)))
        });
    }

    let engineering_units = ["N", "Pa", "J", "W", "V", "Ohm", "Hz", "kPa"];
    for unit in &engineering_units {
        group.bench_with_input(BenchmarkId::new("engineering", unit), unit, |b, &unit| {
            b.iter(|| parse(black_box(unit)))
        });
    }

    group.finish();
}

/// Benchmark canonicalization (parse + full recursive reduction).
fn bench_canonicalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalization");

    let expressions = [
        ("simple", "kg"),
        ("prefixed", "mg"),
        ("compound", "kg.m/s2"),
        ("complex", "mg/dL"),
        ("special", "Cel"),
        ("derived_chain", "N/m2"),
    ];

    for (name, expr) in expressions {
        group.bench_function(name, |b| b.iter(|| canonicalize(black_box(expr))));
    }

    group.finish();
}

/// Benchmark the conversion engine's three paths (linear, special<->linear,
/// special<->special).
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    group.bench_function("linear", |b| {
        b.iter(|| convert(black_box(1.0), black_box("kg"), black_box("g")))
    });
    group.bench_function("special_to_linear", |b| {
        b.iter(|| convert(black_box(0.0), black_box("Cel"), black_box("K")))
    });
    group.bench_function("special_to_special", |b| {
        b.iter(|| convert(black_box(100.0), black_box("Cel"), black_box("[degF]")))
    });

    group.finish();
}

/// Benchmark quantity algebra operations.
fn bench_quantity_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity_algebra");

    group.bench_function("add", |b| {
        b.iter(|| {
            let a = quantity(black_box(5.0), "kg").unwrap();
            let bq = quantity(black_box(3000.0), "g").unwrap();
            a.add(&bq)
        })
    });
    group.bench_function("multiply", |b| {
        b.iter(|| {
            let a = quantity(black_box(10.0), "kg").unwrap();
            let bq = quantity(black_box(5.0), "m/s2").unwrap();
            a.multiply(&bq)
        })
    });
    group.bench_function("pow", |b| {
        b.iter(|| {
            let a = quantity(black_box(5.0), "m").unwrap();
            a.pow(2)
        })
    });

    group.finish();
}

/// Benchmark parser-specific constructs.
fn bench_parser_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_features");

    let ten_power_cases = ["10*3", "10^-2", "10*6.mol", "10^-12.kg"];
    for expr in &ten_power_cases {
        group.bench_with_input(BenchmarkId::new("ten_power", expr), expr, |b, &expr| {
            b.iter(|| parse(black_box(expr)))
        });
    }

    let annotation_cases = ["m{length}", "kg{mass}", "s{time}", "K{temperature}"];
    for expr in &annotation_cases {
        group.bench_with_input(BenchmarkId::new("annotations", expr), expr, |b, &expr| {
            b.iter(|| parse(black_box(expr)))
        });
    }

    group.finish();
}

/// Benchmark edge cases and error conditions.
fn bench_edge_cases(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_cases");

    group.bench_function("empty", |b| b.iter(|| parse(black_box(""))));
    group.bench_function("single_char", |b| b.iter(|| parse(black_box("m"))));
    group.bench_function("leading_division", |b| b.iter(|| parse(black_box("/min"))));
    group.bench_function("nested_parens", |b| {
        b.iter(|| parse(black_box("((kg.m)/s)/mol")))
    });

    let long_expr = "kg.m.s.rad.K.C.cd/kg.m.s.rad.K.C.cd";
    group.bench_function("long_expression", |b| {
        b.iter(|| parse(black_box(long_expr)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing_by_complexity,
    bench_parsing_categories,
    bench_canonicalization,
    bench_conversion,
    bench_quantity_algebra,
    bench_parser_features,
    bench_edge_cases,
);
criterion_main!(benches);

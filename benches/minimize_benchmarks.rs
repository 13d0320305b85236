//! Benchmarks for exact minimization and circuit synthesis
//!
//! Tables are generated from parity, majority and random functions so the
//! suite needs no data files.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logic_synth::circuit::{convert_ast_to_circuit, optimize_circuit, to_nand_only};
use logic_synth::cover::{minimize, Form};
use logic_synth::{OutputValue, TruthTable};

fn names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Odd parity: no two minterms merge, the worst case for prime generation
fn parity_table(inputs: usize) -> TruthTable {
    let mut table = TruthTable::empty(names("x", inputs), ["y"]).unwrap();
    let patterns: Vec<String> = table.entries().map(|(pattern, _)| pattern).collect();
    for pattern in patterns {
        if pattern.matches('1').count() % 2 == 1 {
            table.set(&pattern, "y", OutputValue::True).unwrap();
        }
    }
    table
}

/// Deterministic pseudo-random table with don't-cares over several outputs
fn random_table(inputs: usize, outputs: usize, seed: u64) -> TruthTable {
    let mut table = TruthTable::empty(names("x", inputs), names("y", outputs)).unwrap();
    let patterns: Vec<String> = table.entries().map(|(pattern, _)| pattern).collect();
    let mut state = seed;
    for pattern in &patterns {
        for output in names("y", outputs) {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let value = match state % 5 {
                0 | 1 => OutputValue::True,
                2 => OutputValue::DontCare,
                _ => OutputValue::False,
            };
            table.set(pattern, &output, value).unwrap();
        }
    }
    table
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for inputs in [4, 6, 8] {
        let table = parity_table(inputs);
        group.throughput(Throughput::Elements(table.num_rows() as u64));
        group.bench_with_input(BenchmarkId::new("parity", inputs), &table, |b, table| {
            b.iter(|| minimize(black_box(table), Form::Sop));
        });
    }

    for inputs in [4, 6, 8] {
        let table = random_table(inputs, 3, 0x9e37_79b9_7f4a_7c15);
        group.throughput(Throughput::Elements(table.num_rows() as u64));
        group.bench_with_input(BenchmarkId::new("random_sop", inputs), &table, |b, table| {
            b.iter(|| minimize(black_box(table), Form::Sop));
        });
        group.bench_with_input(BenchmarkId::new("random_pos", inputs), &table, |b, table| {
            b.iter(|| minimize(black_box(table), Form::Pos));
        });
    }

    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    for inputs in [4, 6, 8] {
        let table = random_table(inputs, 4, 42);
        let results = minimize(&table, Form::Sop);
        let outputs: Vec<_> = results
            .iter()
            .map(|result| (result.output_variable.clone(), &result.expr))
            .collect();

        group.bench_with_input(BenchmarkId::new("lower", inputs), &outputs, |b, outputs| {
            b.iter(|| convert_ast_to_circuit(black_box(outputs.iter().cloned())).unwrap());
        });

        let circuit = convert_ast_to_circuit(outputs.iter().cloned()).unwrap();
        group.bench_with_input(
            BenchmarkId::new("nand_and_peephole", inputs),
            &circuit,
            |b, circuit| {
                b.iter(|| optimize_circuit(&to_nand_only(black_box(circuit)).unwrap()).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_minimize, bench_synthesis);
criterion_main!(benches);

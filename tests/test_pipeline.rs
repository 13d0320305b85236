//! End-to-end tests: expression or table in, minimized forms and mapped
//! circuits out

use std::sync::Arc;

use logic_synth::circuit::{
    circuit_to_expressions, convert_ast_to_circuit, optimize_circuit, NodeRef,
};
use logic_synth::cover::{generate_prime_implicants, minimize, Pattern, Term};
use logic_synth::truth_table::{expression_to_truth_table, pattern_to_assignment, TruthTableError};
use logic_synth::{
    optimize, parse, Circuit, Error, Form, GateLibrary, GateSet, GateType, OptimizeOptions,
    OutputValue, Source, TruthTable,
};
use test_log::test;

/// The circuit agrees with every care cell of the table
fn assert_implements(table: &TruthTable, circuit: &Circuit) {
    for (pattern, values) in table.entries() {
        let assignment = pattern_to_assignment(&pattern, table.input_variables()).unwrap();
        for (output, value) in table.output_variables().iter().zip(values) {
            if let Some(expected) = value.as_bool() {
                assert_eq!(
                    circuit.evaluate_output(output, &assignment).unwrap(),
                    expected,
                    "output {} at {}",
                    output,
                    pattern
                );
            }
        }
    }
}

fn two_output_table() -> TruthTable {
    // Y = ¬A・B + A・B, Z = A・B + A・¬B
    let mut table = TruthTable::empty(["A", "B"], ["Y", "Z"]).unwrap();
    for (pattern, y, z) in [("01", true, false), ("10", false, true), ("11", true, true)] {
        table.set(pattern, "Y", y.into()).unwrap();
        table.set(pattern, "Z", z.into()).unwrap();
    }
    table
}

#[test]
fn test_and_expression_end_to_end() {
    let table = expression_to_truth_table("A & B", "Y").unwrap();
    let values: Vec<OutputValue> = table.entries().map(|(_, values)| values[0]).collect();
    assert_eq!(
        values,
        vec![
            OutputValue::False,
            OutputValue::False,
            OutputValue::False,
            OutputValue::True
        ]
    );

    let output = optimize(
        Source::Expression("A & B".to_string()),
        &OptimizeOptions::default(),
    )
    .unwrap();
    assert_eq!(output.results[0].optimized_expression, "A・B");
    assert_eq!(output.circuit.gate_counts().get(&GateType::And), Some(&1));
}

#[test]
fn test_multi_output_table() {
    let results = minimize(&two_output_table(), Form::Sop);
    assert_eq!(results[0].output_variable.as_ref(), "Y");
    assert_eq!(results[0].optimized_expression, "B");
    assert_eq!(results[1].output_variable.as_ref(), "Z");
    assert_eq!(results[1].optimized_expression, "A");
}

#[test]
fn test_pos_of_or_function() {
    let mut table = TruthTable::empty(["A", "B"], ["Y"]).unwrap();
    for pattern in ["01", "10", "11"] {
        table.set(pattern, "Y", OutputValue::True).unwrap();
    }
    let results = minimize(&table, Form::Pos);
    assert_eq!(results[0].optimized_expression, "(A + B)");
}

#[test]
fn test_xor3_prime_implicants_are_the_minterms() {
    let table = expression_to_truth_table("A ⊕ B ⊕ C", "Y").unwrap();
    let terms: Vec<Term> = table
        .entries()
        .enumerate()
        .filter(|(_, (_, values))| values[0] == OutputValue::True)
        .map(|(index, _)| Term {
            pattern: Pattern::from_index(index, 3),
            outputs: 1,
        })
        .collect();
    let primes = generate_prime_implicants(&terms);
    assert_eq!(primes.len(), 4);
    assert!(primes.iter().all(|prime| !prime.pattern.to_string().contains('-')));
}

#[test]
fn test_double_negation_collapses_to_input() {
    let expr = parse("~(~A)").unwrap();
    let circuit = convert_ast_to_circuit([("Y", &expr)]).unwrap();
    let optimized = optimize_circuit(&circuit).unwrap();
    assert_eq!(optimized.gate_count(), 0);
    assert_eq!(optimized.output("Y"), Some(&NodeRef::Input(Arc::from("A"))));
}

#[test]
fn test_eleven_variables_are_rejected() {
    let err = expression_to_truth_table("A + B + C + D + E + F + G + H + I + J + K", "Y")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::TruthTable(TruthTableError::TooManyVariables { count: 11, max: 10 })
    ));

    let err = optimize(
        Source::Expression("A + B + C + D + E + F + G + H + I + J + K".to_string()),
        &OptimizeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::TruthTable(_)));
}

#[test]
fn test_every_library_implements_the_table() {
    let mut table = TruthTable::empty(["A", "B", "C"], ["Y", "Z"]).unwrap();
    for (pattern, y, z) in [
        ("000", OutputValue::True, OutputValue::False),
        ("011", OutputValue::True, OutputValue::True),
        ("101", OutputValue::DontCare, OutputValue::True),
        ("110", OutputValue::True, OutputValue::DontCare),
        ("111", OutputValue::False, OutputValue::True),
    ] {
        table.set(pattern, "Y", y).unwrap();
        table.set(pattern, "Z", z).unwrap();
    }

    let libraries = [
        GateLibrary::Default,
        GateLibrary::Nand,
        GateLibrary::Nor,
        GateLibrary::Custom([GateType::And, GateType::Not].into_iter().collect()),
        GateLibrary::Custom([GateType::Or, GateType::Nand].into_iter().collect()),
        GateLibrary::Custom(GateSet::all()),
    ];
    for form in [Form::Sop, Form::Pos] {
        for library in &libraries {
            for peephole in [false, true] {
                let options = OptimizeOptions {
                    form,
                    gate_set: library.clone(),
                    peephole,
                    ..OptimizeOptions::default()
                };
                let output = optimize(Source::Table(table.clone()), &options).unwrap();
                assert_implements(&table, &output.circuit);
            }
        }
    }
}

#[test]
fn test_nand_pipeline_uses_only_nand() {
    let options = OptimizeOptions {
        gate_set: GateLibrary::Nand,
        ..OptimizeOptions::default()
    };
    let output = optimize(Source::Expression("A・¬B + C".to_string()), &options).unwrap();
    assert!(output
        .circuit
        .gate_types()
        .iter()
        .all(|gate| *gate == GateType::Nand));
    assert_implements(&output.table, &output.circuit);
}

#[test]
fn test_outputs_share_gates() {
    // Y = A・B + C and Z = A・B share the product term
    let mut table = TruthTable::empty(["A", "B", "C"], ["Y", "Z"]).unwrap();
    for index in 0..8usize {
        let (a, b, c) = (index & 4 != 0, index & 2 != 0, index & 1 != 0);
        let pattern = format!("{}{}{}", a as u8, b as u8, c as u8);
        table.set(&pattern, "Y", ((a && b) || c).into()).unwrap();
        table.set(&pattern, "Z", (a && b).into()).unwrap();
    }

    let output = optimize(Source::Table(table), &OptimizeOptions::default()).unwrap();
    assert_eq!(output.circuit.gate_counts().get(&GateType::And), Some(&1));
    assert_eq!(output.circuit.outputs().len(), 2);
}

#[test]
fn test_rendered_circuit_matches_minimized_text() {
    let output = optimize(
        Source::Expression("A・B + A・B・C + A・C".to_string()),
        &OptimizeOptions::default(),
    )
    .unwrap();
    let expressions = circuit_to_expressions(&output.circuit).unwrap();
    assert_eq!(expressions[0].1.to_string(), "A ・ B + A ・ C");
}

#[test]
fn test_pipeline_is_deterministic() {
    let options = OptimizeOptions {
        gate_set: GateLibrary::Nor,
        form: Form::Pos,
        ..OptimizeOptions::default()
    };
    let run = || {
        optimize(
            Source::Expression("¬A・B + A・¬C + B・C".to_string()),
            &options,
        )
        .unwrap()
    };
    assert_eq!(run(), run());
}

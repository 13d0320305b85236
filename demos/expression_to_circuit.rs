//! Example: From an expression to gate networks
//!
//! Parses a redundant expression, minimizes it, and maps the result onto the
//! default, NAND-only and NOR-only gate libraries.

use logic_synth::circuit::circuit_to_expressions;
use logic_synth::{optimize, GateLibrary, OptimizeOptions, Source};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Expression to Circuit Example ===\n");

    let text = "A・B + A・B・C + ¬A・C";
    println!("Input: {}\n", text);

    for (label, library) in [
        ("and/or/not", GateLibrary::Default),
        ("nand only", GateLibrary::Nand),
        ("nor only", GateLibrary::Nor),
    ] {
        let options = OptimizeOptions {
            gate_set: library,
            ..OptimizeOptions::default()
        };
        let output = optimize(Source::Expression(text.to_string()), &options)?;

        println!("--- {} ---", label);
        for result in &output.results {
            println!("Minimized {} = {}", result.output_variable, result.optimized_expression);
        }
        println!("{} gates:", output.circuit.gate_count());
        println!("{}", output.circuit);
        for (name, node) in circuit_to_expressions(&output.circuit)? {
            println!("{} = {}", name, node);
        }
        println!();
    }

    Ok(())
}

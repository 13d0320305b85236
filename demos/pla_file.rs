//! Example: Reading and minimizing a PLA file
//!
//! Writes a full adder as PLA text, reads it back, minimizes both outputs
//! and writes the table out again.

use std::env;
use std::io::Write;

use logic_synth::{optimize, OptimizeOptions, PLAReader, PLAWriter, Source, TruthTable};
use tempfile::NamedTempFile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== PLA File Minimization Example ===\n");

    let pla_content = r#".i 3
.o 2
.ilb a b cin
.ob sum cout
.p 7
001 10
010 10
100 10
111 11
011 01
101 01
110 01
.e
"#;

    println!("Sample PLA content:");
    println!("{}", pla_content);

    let mut temp_in = NamedTempFile::new()?;
    temp_in.write_all(pla_content.as_bytes())?;
    temp_in.flush()?;

    println!("Reading PLA file...");
    let table = TruthTable::from_pla_file(temp_in.path())?;
    println!(
        "Loaded {} inputs and {} outputs\n",
        table.num_inputs(),
        table.num_outputs()
    );

    let output = optimize(Source::Table(table.clone()), &OptimizeOptions::default())?;
    for result in &output.results {
        println!(
            "{} = {}  ({} implicants: {})",
            result.output_variable,
            result.optimized_expression,
            result.implicants.len(),
            result.implicants.join(" ")
        );
    }
    println!("\nShared circuit uses {} gates", output.circuit.gate_count());

    if let Some(output_path) = env::args().nth(1) {
        println!("\nWriting table to: {}", output_path);
        table.to_pla_file(&output_path)?;
    } else {
        println!("\nTable as PLA text:");
        print!("{}", table.to_pla_string()?);
        println!("\nTo write it to a file, run:");
        println!("cargo run --example pla_file output.pla");
    }

    Ok(())
}

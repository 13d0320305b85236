//! Basic minimization example

use logic_synth::cover::{minimize, Form};
use logic_synth::{OutputValue, TruthTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Boolean Function Minimization Example\n");

    println!("Creating a 3-input, 1-output Boolean function");
    println!("F is 1 on 010, 011, 110 and 111; 101 is a don't-care\n");

    let mut table = TruthTable::empty(["A", "B", "C"], ["F"])?;
    for pattern in ["010", "011", "110", "111"] {
        table.set(pattern, "F", OutputValue::True)?;
    }
    table.set("101", "F", OutputValue::DontCare)?;

    for form in [Form::Sop, Form::Pos] {
        let results = minimize(&table, form);
        println!(
            "{}: F = {}  (cubes: {})",
            form,
            results[0].optimized_expression,
            results[0].implicants.join(" ")
        );
    }

    Ok(())
}

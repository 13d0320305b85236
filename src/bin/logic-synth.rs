//! Logic Synth - Command Line Interface
//!
//! Minimizes an expression or a PLA truth table and prints the two-level
//! forms followed by the synthesized circuit.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, WrapErr};
use log::info;

use logic_synth::circuit::{circuit_to_expressions, SynthesisError};
use logic_synth::{
    optimize, Form, GateLibrary, GateSet, GateType, OptimizeOptions, PLAReader, PLAWriter, Source,
    TruthTable,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormArg {
    /// Sum of products
    Sop,
    /// Product of sums
    Pos,
}

impl From<FormArg> for Form {
    fn from(val: FormArg) -> Self {
        match val {
            FormArg::Sop => Form::Sop,
            FormArg::Pos => Form::Pos,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GatesArg {
    /// AND, OR and NOT as produced by lowering
    Default,
    /// NAND gates only
    Nand,
    /// NOR gates only
    Nor,
    /// The gates listed with --enable
    Custom,
}

#[derive(Parser, Debug)]
#[command(name = "logic-synth")]
#[command(about = "Exact Boolean minimizer and gate-level synthesizer", long_about = None)]
#[command(author, version)]
struct Args {
    /// Boolean expression, e.g. "A・B + ¬C" or "A & B | ~C"
    #[arg(short = 'e', long = "expr", value_name = "TEXT", conflicts_with = "table")]
    expr: Option<String>,

    /// PLA file with the truth table to minimize
    #[arg(short = 't', long = "table", value_name = "FILE")]
    table: Option<PathBuf>,

    /// Two-level form to minimize into
    #[arg(short = 'f', long = "form", value_enum, default_value = "sop")]
    form: FormArg,

    /// Target gate library
    #[arg(short = 'g', long = "gates", value_enum, default_value = "default")]
    gates: GatesArg,

    /// Gates available to --gates custom
    #[arg(long = "enable", value_name = "GATE", value_delimiter = ',')]
    enable: Vec<String>,

    /// Name of the output when minimizing an expression
    #[arg(long = "output-name", value_name = "NAME", default_value = "Y")]
    output_name: String,

    /// Keep double negations in the mapped circuit
    #[arg(long = "no-peephole")]
    no_peephole: bool,

    /// Write the truth table that was minimized as PLA
    #[arg(short = 'w', long = "write-table", value_name = "FILE")]
    write_table: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn gate_library(&self) -> Result<GateLibrary, SynthesisError> {
        Ok(match self.gates {
            GatesArg::Default => GateLibrary::Default,
            GatesArg::Nand => GateLibrary::Nand,
            GatesArg::Nor => GateLibrary::Nor,
            GatesArg::Custom => GateLibrary::Custom(
                self.enable
                    .iter()
                    .map(|name| name.parse::<GateType>())
                    .collect::<Result<GateSet, _>>()?,
            ),
        })
    }

    fn source(&self) -> color_eyre::Result<Source> {
        match (&self.expr, &self.table) {
            (Some(text), _) => Ok(Source::Expression(text.clone())),
            (None, Some(path)) => {
                let table = TruthTable::from_pla_file(path)
                    .wrap_err_with(|| format!("Error reading PLA file '{}'", path.display()))?;
                Ok(Source::Table(table))
            }
            (None, None) => bail!("either --expr or --table is required"),
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let options = OptimizeOptions {
        form: args.form.into(),
        gate_set: args.gate_library()?,
        peephole: !args.no_peephole,
        output_name: args.output_name.as_str().into(),
        ..OptimizeOptions::default()
    };
    let output = optimize(args.source()?, &options)?;

    for result in &output.results {
        println!("{} = {}", result.output_variable, result.optimized_expression);
    }

    println!();
    println!("circuit ({} gates):", output.circuit.gate_count());
    for (name, tree) in circuit_to_expressions(&output.circuit)? {
        println!("  {} = {}", name, tree);
    }

    if let Some(path) = &args.write_table {
        output
            .table
            .to_pla_file(path)
            .wrap_err_with(|| format!("Error writing PLA file '{}'", path.display()))?;
        info!("wrote truth table to {}", path.display());
    }

    Ok(())
}

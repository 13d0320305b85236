//! # Logic Synth
//!
//! Exact two-level Boolean minimization and gate-level synthesis.
//!
//! ## Overview
//!
//! The crate takes a Boolean function, given as an expression or as a truth
//! table with don't-care outputs, and carries it through the classic
//! synthesis flow:
//!
//! 1. **Parsing**: [`expression::parse`] reads infix expressions with
//!    Unicode or ASCII operators (`¬ ・ ⊕ +`, `~ & ^ |`).
//! 2. **Tabulation**: [`truth_table`] evaluates an expression on every input
//!    pattern, or tables are read from PLA files through [`pla`].
//! 3. **Minimization**: [`cover`] runs multi-output Quine–McCluskey and
//!    Petrick's method to give minimal SOP or POS forms.
//! 4. **Synthesis**: [`circuit`] lowers expressions into a gate DAG with
//!    common-subexpression sharing, maps it onto NAND-only, NOR-only or a
//!    custom gate library, and removes double negations.
//!
//! ## Quick Start
//!
//! The [`optimize`] pipeline runs every stage in one call:
//!
//! ```
//! use logic_synth::{optimize, OptimizeOptions, Source};
//!
//! # fn main() -> Result<(), logic_synth::Error> {
//! let output = optimize(
//!     Source::Expression("A・B + A・B・C + A・C".to_string()),
//!     &OptimizeOptions::default(),
//! )?;
//! assert_eq!(output.results[0].optimized_expression, "A・B + A・C");
//! assert_eq!(output.circuit.gate_count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Stage by Stage
//!
//! Each stage is also usable on its own:
//!
//! ```
//! use logic_synth::circuit::{convert_ast_to_circuit, optimize_circuit, to_nand_only};
//! use logic_synth::cover::{minimize, Form};
//! use logic_synth::truth_table::expression_to_truth_table;
//!
//! # fn main() -> Result<(), logic_synth::Error> {
//! let table = expression_to_truth_table("A + B", "Y")?;
//! let results = minimize(&table, Form::Sop);
//!
//! let circuit = convert_ast_to_circuit([("Y", &results[0].expr)])?;
//! let nand = optimize_circuit(&to_nand_only(&circuit)?)?;
//! assert_eq!(nand.gate_count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Building Expressions in Code
//!
//! The [`expr!`] macro builds an [`Expr`] with Rust operator syntax:
//!
//! ```
//! use logic_synth::{expr, Expr};
//!
//! let a = Expr::variable("A");
//! let built = expr!(a * "B" + !a);
//! assert_eq!(built, Expr::parse("A・B + ¬A").unwrap());
//! ```
//!
//! ## Logging
//!
//! All stages log through the [`log`] facade: `debug!` for per-stage
//! summaries, `trace!` for per-step detail, and `warn!` when Petrick's method
//! falls back to a greedy cover. Install any `log` backend to see them.

pub mod circuit;
pub mod cover;
pub mod error;
pub mod expression;
pub mod pla;
pub mod truth_table;

use std::sync::Arc;

use log::{debug, info};

pub use circuit::{Circuit, GateSet, GateType};
pub use cover::{Form, MinimizeConfig, OptimizationResult};
pub use error::Error;
pub use expression::{parse, Expr};
pub use logic_synth_macros::expr;
pub use pla::{PLAReader, PLAWriter};
pub use truth_table::{OutputValue, TruthTable};

/// Where the pipeline's function comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Expression text, tabulated under [`OptimizeOptions::output_name`]
    Expression(String),
    /// A ready-made table, possibly with several outputs and don't-cares
    Table(TruthTable),
}

/// Target gate library for the synthesized circuit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateLibrary {
    /// Keep the gates produced by lowering (`and`, `or`, `not`, constants)
    #[default]
    Default,
    /// NAND gates only
    Nand,
    /// NOR gates only
    Nor,
    /// Any enabled subset, with fallbacks for the rest
    Custom(GateSet),
}

/// Configuration for [`optimize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// SOP or POS minimization
    pub form: Form,
    /// Technology mapping target
    pub gate_set: GateLibrary,
    /// Remove double negations after mapping
    pub peephole: bool,
    /// Tuning for the exact minimizer
    pub minimize: MinimizeConfig,
    /// Output column name used for [`Source::Expression`]
    pub output_name: Arc<str>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        OptimizeOptions {
            form: Form::Sop,
            gate_set: GateLibrary::Default,
            peephole: true,
            minimize: MinimizeConfig::default(),
            output_name: Arc::from("Y"),
        }
    }
}

impl OptimizeOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything [`optimize`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOutput {
    /// The table that was minimized
    pub table: TruthTable,
    /// One minimized form per output column
    pub results: Vec<OptimizationResult>,
    /// All outputs lowered into one shared, mapped circuit
    pub circuit: Circuit,
}

/// Run the whole flow: tabulate, minimize, lower, map and optimize
///
/// Every output of the table is minimized in `options.form`, then all
/// outputs are lowered together so the circuit shares gates across them.
pub fn optimize(source: Source, options: &OptimizeOptions) -> Result<OptimizeOutput, Error> {
    let table = match source {
        Source::Expression(text) => {
            truth_table::expression_to_truth_table(&text, &options.output_name)?
        }
        Source::Table(table) => table,
    };

    let results = cover::minimize_with_config(&table, options.form, &options.minimize);
    for result in &results {
        debug!(
            "{} = {}",
            result.output_variable, result.optimized_expression
        );
    }

    let lowered = circuit::convert_ast_to_circuit(
        results
            .iter()
            .map(|result| (Arc::clone(&result.output_variable), &result.expr)),
    )?;
    let mapped = match &options.gate_set {
        GateLibrary::Default => lowered,
        GateLibrary::Nand => circuit::to_nand_only(&lowered)?,
        GateLibrary::Nor => circuit::to_nor_only(&lowered)?,
        GateLibrary::Custom(set) => circuit::to_custom_gate_set(&lowered, set)?,
    };
    let circuit = if options.peephole {
        circuit::optimize_circuit(&mapped)?
    } else {
        mapped
    };

    info!(
        "synthesized {} outputs into {} gates",
        results.len(),
        circuit.gate_count()
    );
    Ok(OptimizeOutput {
        table,
        results,
        circuit,
    })
}

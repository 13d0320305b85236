//! Exact two-level minimization
//!
//! This module turns a [`TruthTable`] into a minimal sum-of-products or
//! product-of-sums per output:
//!
//! 1. every row that is true or don't-care for some output becomes a
//!    [`Term`] carrying an output mask;
//! 2. [`generate_prime_implicants`] runs multi-output Quine–McCluskey;
//! 3. the prime-implicant table is reduced (essentials, row and column
//!    dominance) until nothing changes;
//! 4. Petrick's method picks the cheapest cover of what is left;
//! 5. the selected implicants are split per output and rendered.
//!
//! POS results minimize the inverted table and read the same cubes with
//! swapped literal polarity.
//!
//! # Examples
//!
//! ```
//! use logic_synth::cover::{minimize, Form};
//! use logic_synth::truth_table::expression_to_truth_table;
//!
//! let table = expression_to_truth_table("A・B + A・B・C + A・C", "Y").unwrap();
//! let results = minimize(&table, Form::Sop);
//! assert_eq!(results[0].optimized_expression, "A・B + A・C");
//! assert_eq!(results[0].implicants, vec!["11-", "1-1"]);
//!
//! let table = expression_to_truth_table("A + B", "Y").unwrap();
//! assert_eq!(minimize(&table, Form::Pos)[0].optimized_expression, "(A + B)");
//! ```
//!
//! # Cost bound
//!
//! Petrick's expansion can grow exponentially on large cyclic cores.
//! [`MinimizeConfig::max_petrick_products`] caps the number of intermediate
//! products; past it the solver logs a warning and completes the cover
//! greedily. The result is then still a correct cover but may not be minimal.

mod cubes;
mod petrick;
mod primes;
mod render;
mod table;


use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

pub use cubes::{Bit, Implicant, OutputMask, Pattern, Term};
pub use primes::generate_prime_implicants;
pub use render::{implicants_to_expr, render_pos, render_sop};

use crate::expression::Expr;
use crate::truth_table::{OutputValue, TruthTable};
use table::{CoverTable, Target};

/// Two-level output form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Form {
    /// Sum of products
    #[default]
    Sop,
    /// Product of sums
    Pos,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Form::Sop => "SOP",
            Form::Pos => "POS",
        })
    }
}

/// Tuning for [`minimize_with_config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizeConfig {
    /// Largest intermediate product count Petrick's method may reach before
    /// switching to a greedy cover
    pub max_petrick_products: usize,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        MinimizeConfig {
            max_petrick_products: 4096,
        }
    }
}

impl MinimizeConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Minimized form of one output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationResult {
    /// Column index in the table
    pub output_index: usize,
    /// Column name
    pub output_variable: Arc<str>,
    /// Selected cubes over `{0,1,-}`, in canonical order
    pub implicants: Vec<String>,
    /// Rendered SOP or POS text
    pub optimized_expression: String,
    /// The same function as an expression tree
    pub expr: Expr,
}

/// Minimize every output of `table` in the requested form
pub fn minimize(table: &TruthTable, form: Form) -> Vec<OptimizationResult> {
    minimize_with_config(table, form, &MinimizeConfig::default())
}

/// [`minimize`] with explicit configuration
pub fn minimize_with_config(
    table: &TruthTable,
    form: Form,
    config: &MinimizeConfig,
) -> Vec<OptimizationResult> {
    debug!(
        "minimizing {} outputs over {} inputs as {}",
        table.num_outputs(),
        table.num_inputs(),
        form
    );

    let selections = match form {
        Form::Sop => select_implicants(table, config),
        Form::Pos => select_implicants(&table.inverted(), config),
    };

    let variables = table.input_variables();
    selections
        .into_iter()
        .enumerate()
        .map(|(output_index, patterns)| {
            let optimized_expression = match form {
                Form::Sop => render_sop(&patterns, variables),
                Form::Pos => render_pos(&patterns, variables),
            };
            OptimizationResult {
                output_index,
                output_variable: Arc::clone(&table.output_variables()[output_index]),
                implicants: patterns.iter().map(Pattern::to_string).collect(),
                expr: implicants_to_expr(&patterns, variables, form),
                optimized_expression,
            }
        })
        .collect()
}

/// Minimal sum of products for every output
pub fn minimize_sop(table: &TruthTable) -> Vec<OptimizationResult> {
    minimize(table, Form::Sop)
}

/// Minimal product of sums for every output
pub fn minimize_pos(table: &TruthTable) -> Vec<OptimizationResult> {
    minimize(table, Form::Pos)
}

/// Selected implicant patterns per output, in canonical order
fn select_implicants(table: &TruthTable, config: &MinimizeConfig) -> Vec<Vec<Pattern>> {
    let width = table.num_inputs();
    let mut terms = Vec::new();
    let mut targets = Vec::new();

    for (index, values) in (0..table.num_rows()).filter_map(|i| table.row(i).map(|v| (i, v))) {
        let mut mask: OutputMask = 0;
        for (output, value) in values.iter().enumerate() {
            if value.may_be_true() {
                mask |= 1 << output;
            }
            if *value == OutputValue::True {
                targets.push(Target {
                    pattern: Pattern::from_index(index, width),
                    output,
                });
            }
        }
        if mask != 0 {
            terms.push(Term {
                pattern: Pattern::from_index(index, width),
                outputs: mask,
            });
        }
    }

    let implicants = generate_prime_implicants(&terms);
    let mut cover = CoverTable::new(&implicants, &targets);
    cover.reduce();

    let literals: Vec<usize> = implicants
        .iter()
        .map(|implicant| implicant.pattern.literal_count())
        .collect();
    let mut chosen: BTreeSet<usize> = cover.essentials().iter().copied().collect();
    chosen.extend(petrick::solve(
        &cover.cyclic_core(),
        &literals,
        config.max_petrick_products,
    ));
    debug!(
        "selected {} of {} prime implicants for {} targets",
        chosen.len(),
        implicants.len(),
        targets.len()
    );

    // implicants are in canonical order, so index order is canonical too
    (0..table.num_outputs())
        .map(|output| {
            chosen
                .iter()
                .map(|&index| &implicants[index])
                .filter(|implicant| implicant.serves(output))
                .map(|implicant| implicant.pattern.clone())
                .collect()
        })
        .collect()
}

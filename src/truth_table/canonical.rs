//! Canonical (unminimized) SOP and POS expressions of a table column

use std::sync::Arc;

use super::{index_to_pattern, OutputValue, TruthTable, TruthTableError};
use crate::expression::{BinaryOp, Expr};

fn literal(name: &Arc<str>, positive: bool) -> Expr {
    let variable = Expr::Variable(Arc::clone(name));
    if positive {
        variable
    } else {
        Expr::Not(Box::new(variable))
    }
}

/// OR of one minterm per `True` row of `output`
///
/// An output that is never true yields the constant `0`; with zero inputs the
/// single minterm is the constant `1`. Don't-care rows are left out.
pub fn truth_table_to_sop(table: &TruthTable, output: &str) -> Result<Expr, TruthTableError> {
    let column = table.output_index(output)?;
    let inputs = table.input_variables();

    let minterms = (0..table.num_rows())
        .filter(|&index| table.rows[index][column] == OutputValue::True)
        .map(|index| {
            let pattern = index_to_pattern(index, inputs.len());
            let literals = inputs
                .iter()
                .zip(pattern.chars())
                .map(|(name, bit)| literal(name, bit == '1'));
            Expr::chain(BinaryOp::And, literals).unwrap_or(Expr::Constant(true))
        });

    Ok(Expr::chain(BinaryOp::Or, minterms).unwrap_or(Expr::Constant(false)))
}

/// AND of one maxterm per `False` row of `output`
///
/// An output that is never false yields the constant `1`; with zero inputs the
/// single maxterm is the constant `0`.
pub fn truth_table_to_pos(table: &TruthTable, output: &str) -> Result<Expr, TruthTableError> {
    let column = table.output_index(output)?;
    let inputs = table.input_variables();

    let maxterms = (0..table.num_rows())
        .filter(|&index| table.rows[index][column] == OutputValue::False)
        .map(|index| {
            let pattern = index_to_pattern(index, inputs.len());
            let literals = inputs
                .iter()
                .zip(pattern.chars())
                .map(|(name, bit)| literal(name, bit == '0'));
            Expr::chain(BinaryOp::Or, literals).unwrap_or(Expr::Constant(false))
        });

    Ok(Expr::chain(BinaryOp::And, maxterms).unwrap_or(Expr::Constant(true)))
}

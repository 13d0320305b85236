//! Expression evaluation

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{EvaluationError, Expr};

/// Variable values keyed by name
///
/// Lookups accept plain `&str` keys.
pub type Assignment = BTreeMap<Arc<str>, bool>;

/// Evaluate `expr` under `assignment`
///
/// Fails on the first variable without a value. Both operands of every
/// connective are evaluated, so a missing variable is reported even when the
/// result would not depend on it.
pub fn evaluate(expr: &Expr, assignment: &Assignment) -> Result<bool, EvaluationError> {
    match expr {
        Expr::Constant(value) => Ok(*value),
        Expr::Variable(name) => {
            assignment
                .get(name)
                .copied()
                .ok_or_else(|| EvaluationError::UndefinedVariable {
                    name: Arc::clone(name),
                })
        }
        Expr::Not(operand) => Ok(!evaluate(operand, assignment)?),
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, assignment)?;
            let right = evaluate(right, assignment)?;
            Ok(op.apply(left, right))
        }
    }
}

impl Expr {
    /// Evaluate this expression under `assignment` (see [`evaluate`])
    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvaluationError> {
        evaluate(self, assignment)
    }
}

//! Boolean expression AST, parser and evaluator
//!
//! Expressions are plain owned trees. Every transformation (truth-table
//! generation, canonical forms, circuit lowering) builds new trees instead of
//! mutating existing ones.
//!
//! # Syntax
//!
//! | Operator | Accepted spellings      | Precedence |
//! |----------|-------------------------|------------|
//! | NOT      | `¬` `~` `!` `！`        | highest    |
//! | AND      | `・` `&` `*`            |            |
//! | XOR      | `⊕` `^`                 |            |
//! | OR       | `+` `\|` `＋` `｜`       | lowest     |
//!
//! Binary operators are left-associative. Parentheses (`(`/`（`, `)`/`）`)
//! group, `0`/`1` (also `０`/`１`) are constants, and variable names start with
//! an ASCII letter followed by letters, digits, `_` or subscript digits
//! (`A₁`).
//!
//! # Examples
//!
//! ```
//! use logic_synth::expression::{parse, Assignment};
//! use std::sync::Arc;
//!
//! let expr = parse("A・¬B + C").unwrap();
//! let mut assignment = Assignment::new();
//! assignment.insert(Arc::from("A"), true);
//! assignment.insert(Arc::from("B"), false);
//! assignment.insert(Arc::from("C"), false);
//! assert!(expr.evaluate(&assignment).unwrap());
//! assert_eq!(expr.to_string(), "A・¬B + C");
//! ```

mod display;
mod error;
mod eval;
mod lexer;
mod operators;
mod parser;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

pub use error::{EvaluationError, ParseError};
pub use eval::{evaluate, Assignment};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::parse;

/// Deepest nesting of parentheses and negations `parse` accepts
///
/// Evaluation, display and circuit lowering walk the tree recursively, so
/// the parser bounds how deep a parsed tree can get.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Binary connectives of the expression language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryOp {
    /// Conjunction (`・`)
    And,
    /// Disjunction (`+`)
    Or,
    /// Exclusive or (`⊕`)
    Xor,
}

impl BinaryOp {
    /// Lower-case name used in structural keys and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
        }
    }

    pub(crate) fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BinaryOp::And => left && right,
            BinaryOp::Or => left || right,
            BinaryOp::Xor => left != right,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Boolean expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Constant `0` or `1`
    Constant(bool),
    /// A named input variable
    Variable(Arc<str>),
    /// Negation
    Not(Box<Expr>),
    /// A binary connective
    Binary {
        /// The connective
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
}

impl Expr {
    /// Create a variable expression
    pub fn variable(name: impl Into<Arc<str>>) -> Self {
        Expr::Variable(name.into())
    }

    /// Create a constant expression
    pub fn constant(value: bool) -> Self {
        Expr::Constant(value)
    }

    /// Build a binary node from owned operands
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Logical AND of two expressions
    pub fn and(&self, other: &Expr) -> Self {
        Expr::binary(BinaryOp::And, self.clone(), other.clone())
    }

    /// Logical OR of two expressions
    pub fn or(&self, other: &Expr) -> Self {
        Expr::binary(BinaryOp::Or, self.clone(), other.clone())
    }

    /// Logical XOR of two expressions
    pub fn xor(&self, other: &Expr) -> Self {
        Expr::binary(BinaryOp::Xor, self.clone(), other.clone())
    }

    /// Logical NOT of this expression
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        Expr::Not(Box::new(self.clone()))
    }

    /// Fold operands into a left-associated chain `((a op b) op c) ...`
    ///
    /// Returns `None` when `operands` is empty.
    pub fn chain<I>(op: BinaryOp, operands: I) -> Option<Self>
    where
        I: IntoIterator<Item = Expr>,
    {
        operands
            .into_iter()
            .reduce(|left, right| Expr::binary(op, left, right))
    }

    /// Unique variable names in first-occurrence order (left to right)
    pub fn variables(&self) -> Vec<Arc<str>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        self.collect_variables(&mut seen, &mut names);
        names
    }

    fn collect_variables(&self, seen: &mut HashSet<Arc<str>>, names: &mut Vec<Arc<str>>) {
        match self {
            Expr::Constant(_) => {}
            Expr::Variable(name) => {
                if seen.insert(Arc::clone(name)) {
                    names.push(Arc::clone(name));
                }
            }
            Expr::Not(operand) => operand.collect_variables(seen, names),
            Expr::Binary { left, right, .. } => {
                left.collect_variables(seen, names);
                right.collect_variables(seen, names);
            }
        }
    }

    /// Parse an expression string (see [`parse`])
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse(text)
    }
}

impl std::str::FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse `text` and evaluate it under `assignment`
pub fn evaluate_expression(text: &str, assignment: &Assignment) -> Result<bool, crate::Error> {
    let expr = parse(text)?;
    Ok(evaluate(&expr, assignment)?)
}

/// Parse `text` and list its variables in first-occurrence order
pub fn get_variables(text: &str) -> Result<Vec<Arc<str>>, ParseError> {
    Ok(parse(text)?.variables())
}

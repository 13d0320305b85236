//! Display formatting for expressions with minimal parentheses

use std::fmt;

use super::{BinaryOp, Expr};

const NOT_PRECEDENCE: u8 = 4;

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 1,
        BinaryOp::Xor => 2,
        BinaryOp::And => 3,
    }
}

fn symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::And => "・",
        BinaryOp::Or => " + ",
        BinaryOp::Xor => " ⊕ ",
    }
}

impl Expr {
    /// Write this expression, parenthesized if it binds looser than `min`
    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        match self {
            Expr::Constant(value) => f.write_str(if *value { "1" } else { "0" }),
            Expr::Variable(name) => f.write_str(name),
            Expr::Not(operand) => {
                f.write_str("¬")?;
                operand.fmt_with_precedence(f, NOT_PRECEDENCE)
            }
            Expr::Binary { op, left, right } => {
                let own = precedence(*op);
                let needs_parens = own < min;
                if needs_parens {
                    f.write_str("(")?;
                }
                left.fmt_with_precedence(f, own)?;
                f.write_str(symbol(*op))?;
                // right operands of equal precedence keep their grouping
                right.fmt_with_precedence(f, own + 1)?;
                if needs_parens {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

/// Renders with `・`, ` + `, ` ⊕ ` and `¬`; the output parses back to the
/// same tree.
///
/// ```
/// use logic_synth::Expr;
///
/// let a = Expr::variable("A");
/// let b = Expr::variable("B");
/// let c = Expr::variable("C");
/// assert_eq!(a.or(&b).and(&c).to_string(), "(A + B)・C");
/// assert_eq!(a.and(&b).not().to_string(), "¬(A・B)");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}
